use crate::error::ScrapeError;
use crate::models::{GameDate, GameRecord, Location};
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use tracing::info;

/// Game-log page for LeBron James, 2017-18 season.
pub const DEFAULT_GAME_LOG_URL: &str =
    "https://www.basketball-reference.com/players/j/jamesle01/gamelog/2018/";

const GAME_LOG_TABLE_ID: &str = "pgl_basic";

pub struct GameLogScraper {
    client: reqwest::Client,
}

impl GameLogScraper {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .build()
                .unwrap(),
        }
    }

    /// Fetch a season game-log page and extract one record per game row.
    pub async fn fetch_game_log(&self, url: &str) -> Result<Vec<GameRecord>, ScrapeError> {
        let response = self.client.get(url).send().await?;
        ensure_not_rate_limited(response.status(), url)?;
        let html = response.error_for_status()?.text().await?;

        let records = parse_game_log(&html)?;
        info!(games = records.len(), url, "parsed game log");
        Ok(records)
    }
}

impl Default for GameLogScraper {
    fn default() -> Self {
        Self::new()
    }
}

/// Basketball-reference signals throttling with a plain 429 page; treat it
/// as terminal rather than letting it surface as a generic status error.
fn ensure_not_rate_limited(status: StatusCode, url: &str) -> Result<(), ScrapeError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ScrapeError::RateLimited {
            url: url.to_string(),
        });
    }
    Ok(())
}

/// Parse the game-log table out of a full page.
///
/// The table body mixes real game rows with repeated header rows carrying
/// class `thead`; those are layout and are skipped. A game row that is
/// missing any expected cell fails the whole parse: a page that no longer
/// matches the expected structure must not produce partial output.
pub fn parse_game_log(html: &str) -> Result<Vec<GameRecord>, ScrapeError> {
    let document = Html::parse_document(html);

    let table_selector = selector(&format!("table#{}", GAME_LOG_TABLE_ID))?;
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| ScrapeError::Parse(format!("table #{} not found", GAME_LOG_TABLE_ID)))?;

    let tbody_selector = selector("tbody")?;
    let tbody = table
        .select(&tbody_selector)
        .next()
        .ok_or_else(|| ScrapeError::Parse("game log table has no tbody".to_string()))?;

    let row_selector = selector("tr")?;
    let mut records = Vec::new();
    for row in tbody.select(&row_selector) {
        if is_header_row(&row) {
            continue;
        }

        let date_text = cell_text(&row, "date_game")?;
        let location_text = cell_text(&row, "game_location")?;
        let opponent = cell_text(&row, "opp_id")?;

        let location = if is_away_game(&location_text) {
            Location::Away
        } else {
            Location::Home
        };

        records.push(GameRecord {
            date: parse_game_date(&date_text)?,
            location,
            opponent,
        });
    }

    Ok(records)
}

/// The upstream marker for away games has flip-flopped between an `@`
/// literal and plain non-emptiness across page revisions. Both collapse to
/// the same rule: any non-blank location field means an away game.
pub fn is_away_game(raw_location: &str) -> bool {
    !raw_location.trim().is_empty()
}

fn is_header_row(row: &ElementRef) -> bool {
    row.value()
        .attr("class")
        .map(|classes| classes.split_whitespace().any(|c| c == "thead"))
        .unwrap_or(false)
}

fn cell_text(row: &ElementRef, data_stat: &str) -> Result<String, ScrapeError> {
    let cell_selector = selector(&format!("td[data-stat=\"{}\"]", data_stat))?;
    let cell = row.select(&cell_selector).next().ok_or_else(|| {
        ScrapeError::Parse(format!("game row is missing the {} cell", data_stat))
    })?;
    Ok(cell.text().collect::<String>().trim().to_string())
}

/// Dates arrive as dash-separated text, e.g. `2017-10-17`.
fn parse_game_date(raw: &str) -> Result<GameDate, ScrapeError> {
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != 3 {
        return Err(ScrapeError::Parse(format!(
            "date {:?} does not split into year-month-day",
            raw
        )));
    }
    let numbers: Vec<i64> = parts
        .iter()
        .map(|p| p.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .map_err(|_| ScrapeError::Parse(format!("date {:?} has a non-numeric component", raw)))?;

    GameDate::new(numbers[0] as i32, numbers[1] as u32, numbers[2] as u32)
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Parse(format!("invalid selector: {}", css)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <html><body>
        <table id="pgl_basic">
          <thead><tr><th>Date</th><th></th><th>Opp</th></tr></thead>
          <tbody>
            <tr class="thead"><td data-stat="date_game">Date</td></tr>
            <tr>
              <th data-stat="ranker">1</th>
              <td data-stat="date_game"><a href="/boxscores/">2017-10-17</a></td>
              <td data-stat="game_location"></td>
              <td data-stat="opp_id"><a href="/teams/BOS/">BOS</a></td>
            </tr>
            <tr>
              <th data-stat="ranker">2</th>
              <td data-stat="date_game"><a href="/boxscores/">2017-10-20</a></td>
              <td data-stat="game_location">@</td>
              <td data-stat="opp_id"><a href="/teams/MIL/">MIL</a></td>
            </tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_first_record_matches_fixture() {
        let records = parse_game_log(FIXTURE).unwrap();
        assert_eq!(
            records[0],
            GameRecord {
                date: GameDate::new(2017, 10, 17).unwrap(),
                location: Location::Home,
                opponent: "BOS".to_string(),
            }
        );
    }

    #[test]
    fn test_header_rows_are_skipped() {
        // 3 tbody rows, 1 of them a repeated header
        let records = parse_game_log(FIXTURE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].location, Location::Away);
        assert_eq!(records[1].opponent, "MIL");
    }

    #[test]
    fn test_parsed_dates_are_sane() {
        for record in parse_game_log(FIXTURE).unwrap() {
            assert!(record.date.year > 0);
            assert!((1..=12).contains(&record.date.month));
            assert!((1..=31).contains(&record.date.day));
        }
    }

    #[test]
    fn test_away_marker_conventions() {
        // Revision A: literal @ marker
        assert!(is_away_game("@"));
        // Revision B: any non-empty text
        assert!(is_away_game("AWAY"));
        // Home is always the empty cell, whitespace included
        assert!(!is_away_game(""));
        assert!(!is_away_game("   "));
    }

    #[test]
    fn test_missing_table_is_a_parse_error() {
        let err = parse_game_log("<html><body><p>no table</p></body></html>").unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }

    #[test]
    fn test_missing_tbody_is_a_parse_error() {
        let html = r#"<table id="pgl_basic"><thead></thead></table>"#;
        let err = parse_game_log(html).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }

    #[test]
    fn test_row_missing_cell_is_a_parse_error() {
        let html = r#"
            <table id="pgl_basic"><tbody>
              <tr><td data-stat="date_game">2017-10-17</td></tr>
            </tbody></table>
        "#;
        let err = parse_game_log(html).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }

    #[test]
    fn test_malformed_date_is_a_parse_error() {
        let html = r#"
            <table id="pgl_basic"><tbody>
              <tr>
                <td data-stat="date_game">Oct 17, 2017</td>
                <td data-stat="game_location"></td>
                <td data-stat="opp_id">BOS</td>
              </tr>
            </tbody></table>
        "#;
        let err = parse_game_log(html).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }

    #[test]
    fn test_rate_limit_status_is_terminal() {
        let err = ensure_not_rate_limited(StatusCode::TOO_MANY_REQUESTS, "http://example.com")
            .unwrap_err();
        assert!(matches!(err, ScrapeError::RateLimited { .. }));
        assert!(ensure_not_rate_limited(StatusCode::OK, "http://example.com").is_ok());
    }
}
