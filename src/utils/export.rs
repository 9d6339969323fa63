use crate::api::play_by_play::PlayByPlaySource;
use crate::error::ScrapeError;
use crate::models::{ExportSummary, GameRecord, Location, PlayByPlayRow, Team};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

/// How the export loop runs: whose game log this is, where CSVs land, how
/// many games to process, and how long to pause between requests.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// The tracked player's own franchise; the home side for HOME games.
    pub team: Team,
    pub output_dir: PathBuf,
    /// `None` exports the whole season.
    pub max_games: Option<usize>,
    /// Throttle between play-by-play requests, to stay under the source
    /// site's rate limits.
    pub delay: Duration,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            team: Team::ClevelandCavaliers,
            output_dir: PathBuf::from("pbp_games"),
            max_games: None,
            delay: Duration::from_secs(15),
        }
    }
}

/// Export play-by-play CSVs for each game record, in order.
///
/// One file per game, named `{year}_{month}_{day}_{homeCode}_PBP_{HOME|AWAY}.csv`
/// where `homeCode` is the franchise code of that game's home team. A
/// failure on one game (network, unmapped opponent, malformed page) is
/// logged and counted; it never aborts the rest of the batch.
pub async fn export_games<S: PlayByPlaySource>(
    source: &S,
    records: &[GameRecord],
    config: &ExportConfig,
) -> Result<ExportSummary, ScrapeError> {
    std::fs::create_dir_all(&config.output_dir)?;

    let limit = config.max_games.unwrap_or(records.len());
    let to_export = &records[..limit.min(records.len())];

    let mut summary = ExportSummary::default();
    for (i, record) in to_export.iter().enumerate() {
        tokio::time::sleep(config.delay).await;
        info!(
            game = i + 1,
            total = to_export.len(),
            date = %record.date,
            opponent = %record.opponent,
            "exporting play-by-play"
        );

        match export_one(source, record, config).await {
            Ok(path) => {
                info!(path = %path.display(), "wrote play-by-play CSV");
                summary.exported += 1;
            }
            Err(e) => {
                error!(
                    date = %record.date,
                    opponent = %record.opponent,
                    error = %e,
                    "skipping game"
                );
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

async fn export_one<S: PlayByPlaySource>(
    source: &S,
    record: &GameRecord,
    config: &ExportConfig,
) -> Result<PathBuf, ScrapeError> {
    let game = format!("{} vs {}", record.date, record.opponent);

    // The play-by-play source is keyed by the game's home franchise: our
    // own team for home games, the mapped opponent for road games.
    let (home_team, suffix) = match record.location {
        Location::Home => (config.team, "HOME"),
        Location::Away => {
            let opponent = Team::from_franchise_code(&record.opponent).ok_or_else(|| {
                ScrapeError::Data(format!("no franchise mapped to code {:?}", record.opponent))
                    .for_game(game.clone())
            })?;
            (opponent, "AWAY")
        }
    };

    let rows = source
        .play_by_play(home_team, record.date)
        .await
        .map_err(|e| e.for_game(game.clone()))?;

    let path = config.output_dir.join(export_filename(record, home_team, suffix));
    write_csv(&path, &rows).map_err(|e| e.for_game(game))?;
    Ok(path)
}

fn export_filename(record: &GameRecord, home_team: Team, suffix: &str) -> String {
    format!(
        "{}_{}_{}_{}_PBP_{}.csv",
        record.date.year,
        record.date.month,
        record.date.day,
        home_team.franchise_code(),
        suffix
    )
}

fn write_csv(path: &Path, rows: &[PlayByPlayRow]) -> Result<(), ScrapeError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
