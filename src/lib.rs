pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod scrapers;
pub mod utils;

pub use config::ScrapeConfig;
pub use error::ScrapeError;
pub use models::*;

use api::play_by_play::PlayByPlayClient;
use scrapers::game_log::GameLogScraper;
use utils::export::export_games;

/// Run the whole pipeline: fetch and parse the season game log, then export
/// one play-by-play CSV per game.
///
/// Config and game-log failures abort before any file is written; per-game
/// export failures are absorbed into the returned summary.
pub async fn run(config: &ScrapeConfig) -> Result<ExportSummary, ScrapeError> {
    // Validate caller parameters before touching the network
    let export_config = config.export_config()?;

    let scraper = GameLogScraper::new();
    let records = scraper.fetch_game_log(&config.url).await?;

    let client = PlayByPlayClient::new();
    export_games(&client, &records, &export_config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Serve one canned HTTP response on a local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_rate_limited_game_log_aborts_run_with_no_output() {
        let url = serve_once("429 Too Many Requests", "slow down").await;
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("pbp_games");
        let config = ScrapeConfig {
            url,
            delay_seconds: 0,
            output_dir: output_dir.clone(),
            ..ScrapeConfig::default()
        };

        let err = run(&config).await.unwrap_err();
        assert!(matches!(err, ScrapeError::RateLimited { .. }));
        // The run died before the export stage: nothing on disk
        assert!(!output_dir.exists());
    }

    #[tokio::test]
    async fn test_unparseable_page_aborts_run_with_no_output() {
        let url = serve_once("200 OK", "<html><body>not a game log</body></html>").await;
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("pbp_games");
        let config = ScrapeConfig {
            url,
            delay_seconds: 0,
            output_dir: output_dir.clone(),
            ..ScrapeConfig::default()
        };

        let err = run(&config).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
        assert!(!output_dir.exists());
    }
}
