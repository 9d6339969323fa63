use crate::error::ScrapeError;
use crate::models::{GameDate, PlayByPlayRow, Team};
use reqwest::StatusCode;
use scraper::{Html, Selector};

const BASE_URL: &str = "https://www.basketball-reference.com";

/// Source of per-game play-by-play data.
///
/// The export loop only depends on this seam, so tests can substitute a
/// recording stub for the real basketball-reference client.
#[allow(async_fn_in_trait)]
pub trait PlayByPlaySource {
    async fn play_by_play(
        &self,
        home_team: Team,
        date: GameDate,
    ) -> Result<Vec<PlayByPlayRow>, ScrapeError>;
}

/// Fetches play-by-play tables from basketball-reference box-score pages.
pub struct PlayByPlayClient {
    client: reqwest::Client,
    base_url: String,
}

impl PlayByPlayClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .build()
                .unwrap(),
            base_url,
        }
    }

    /// Box-score URLs are keyed by date and the home team's code, with
    /// zero-padded month and day, e.g. `/boxscores/pbp/201710170CLE.html`.
    fn box_score_url(&self, home_team: Team, date: GameDate) -> String {
        format!(
            "{}/boxscores/pbp/{:04}{:02}{:02}0{}.html",
            self.base_url,
            date.year,
            date.month,
            date.day,
            home_team.franchise_code()
        )
    }
}

impl Default for PlayByPlayClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayByPlaySource for PlayByPlayClient {
    async fn play_by_play(
        &self,
        home_team: Team,
        date: GameDate,
    ) -> Result<Vec<PlayByPlayRow>, ScrapeError> {
        let url = self.box_score_url(home_team, date);
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ScrapeError::RateLimited { url });
        }
        let html = response.error_for_status()?.text().await?;
        parse_play_by_play(&html)
    }
}

/// Parse the `#pbp` table of a box-score page into event rows.
///
/// The table interleaves three row shapes: period separators (a single
/// `th` spanning the table), repeated column headers (class `thead`), and
/// event rows. Event rows come in two layouts: six cells for scoring plays
/// (clock, away play, away points, score, home points, home play) and two
/// cells for neutral events. Rows matching neither layout are skipped.
pub fn parse_play_by_play(html: &str) -> Result<Vec<PlayByPlayRow>, ScrapeError> {
    let document = Html::parse_document(html);

    let table_selector = selector("table#pbp")?;
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| ScrapeError::Data("play-by-play table not found".to_string()))?;

    let row_selector = selector("tr")?;
    let th_selector = selector("th")?;
    let td_selector = selector("td")?;

    let mut rows = Vec::new();
    let mut period: u32 = 0;

    for row in table.select(&row_selector) {
        let is_period_break = row
            .select(&th_selector)
            .next()
            .map(|th| th.value().attr("colspan").is_some())
            .unwrap_or(false);
        if is_period_break {
            period += 1;
            continue;
        }

        let is_column_header = row
            .value()
            .attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == "thead"))
            .unwrap_or(false);
        if is_column_header {
            continue;
        }

        let cells: Vec<String> = row
            .select(&td_selector)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();

        match cells.len() {
            2 => {
                // Neutral events carry the running score forward
                let (away_score, home_score) = rows
                    .last()
                    .map(|r: &PlayByPlayRow| (r.away_score, r.home_score))
                    .unwrap_or((0, 0));
                rows.push(PlayByPlayRow {
                    period,
                    remaining_time: cells[0].clone(),
                    side: String::new(),
                    away_score,
                    home_score,
                    description: cells[1].clone(),
                });
            }
            6 => {
                let Some((away_score, home_score)) = parse_score(&cells[3]) else {
                    continue;
                };
                let (side, description) = if !cells[1].is_empty() {
                    ("AWAY", cells[1].clone())
                } else {
                    ("HOME", cells[5].clone())
                };
                rows.push(PlayByPlayRow {
                    period,
                    remaining_time: cells[0].clone(),
                    side: side.to_string(),
                    away_score,
                    home_score,
                    description,
                });
            }
            _ => {}
        }
    }

    Ok(rows)
}

/// Scores read `away-home`, e.g. `12-10`.
fn parse_score(raw: &str) -> Option<(u32, u32)> {
    let (away, home) = raw.split_once('-')?;
    Some((away.trim().parse().ok()?, home.trim().parse().ok()?))
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Parse(format!("invalid selector: {}", css)))
}
