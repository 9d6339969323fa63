use anyhow::Result;
use clap::Parser;
use pbp_exporter::config::ScrapeConfig;
use pbp_exporter::scrapers::game_log::DEFAULT_GAME_LOG_URL;
use std::path::PathBuf;

/// Export per-game play-by-play CSVs for one player's season game log.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Game-log page to scrape
    #[arg(long, default_value = DEFAULT_GAME_LOG_URL)]
    url: String,

    /// Franchise code of the tracked player's team
    #[arg(long, default_value = "CLE")]
    team: String,

    /// Export at most this many games (default: the whole season)
    #[arg(long, allow_negative_numbers = true)]
    max_games: Option<i64>,

    /// Seconds to pause between play-by-play requests
    #[arg(long, default_value_t = 15)]
    delay_seconds: u64,

    /// Directory for the per-game CSV files
    #[arg(long, default_value = "pbp_games")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = ScrapeConfig {
        url: args.url,
        team_code: args.team,
        max_games: args.max_games,
        delay_seconds: args.delay_seconds,
        output_dir: args.output_dir,
    };

    println!("Play-by-Play Exporter\n");
    println!("Fetching season game log...\n");

    let summary = pbp_exporter::run(&config).await?;

    println!(
        "\nDone: {} games exported, {} failed",
        summary.exported, summary.failed
    );

    // Partial failure is expected under upstream rate limits, but it should
    // still be visible to callers through the exit code.
    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
