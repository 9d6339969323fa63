use thiserror::Error;

/// Error taxonomy for the scrape-and-export pipeline.
///
/// `Fetch`, `RateLimited`, `Parse`, and `Config` are fatal to the run when
/// raised while fetching or parsing the game log. `Data` and `Export` are
/// recovered per game inside the export loop: logged, counted, skipped.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("rate limited (HTTP 429) fetching {url}")]
    RateLimited { url: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unexpected data: {0}")]
    Data(String),

    #[error("export failed for {context}: {source}")]
    Export {
        context: String,
        #[source]
        source: Box<ScrapeError>,
    },

    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// Wrap a per-game failure with the game it belongs to.
    pub fn for_game(self, context: impl Into<String>) -> Self {
        ScrapeError::Export {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
