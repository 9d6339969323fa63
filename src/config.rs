use crate::error::ScrapeError;
use crate::models::Team;
use crate::scrapers::game_log::DEFAULT_GAME_LOG_URL;
use crate::utils::export::ExportConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Caller-supplied run parameters, as they arrive from the CLI.
///
/// Kept stringly-typed so validation happens in one place, before any
/// network activity: `export_config` rejects a negative game count or an
/// unknown franchise code with a `Config` error.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: String,
    pub team_code: String,
    pub max_games: Option<i64>,
    pub delay_seconds: u64,
    pub output_dir: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GAME_LOG_URL.to_string(),
            team_code: "CLE".to_string(),
            max_games: None,
            delay_seconds: 15,
            output_dir: PathBuf::from("pbp_games"),
        }
    }
}

impl ScrapeConfig {
    /// Validate and convert into the exporter's config.
    pub fn export_config(&self) -> Result<ExportConfig, ScrapeError> {
        let team = Team::from_franchise_code(&self.team_code).ok_or_else(|| {
            ScrapeError::Config(format!("unknown franchise code {:?}", self.team_code))
        })?;

        let max_games = match self.max_games {
            Some(n) if n < 0 => {
                return Err(ScrapeError::Config(format!(
                    "max games must be non-negative, got {}",
                    n
                )))
            }
            Some(n) => Some(n as usize),
            None => None,
        };

        Ok(ExportConfig {
            team,
            output_dir: self.output_dir.clone(),
            max_games,
            delay: Duration::from_secs(self.delay_seconds),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = ScrapeConfig::default().export_config().unwrap();
        assert_eq!(config.team, Team::ClevelandCavaliers);
        assert_eq!(config.max_games, None);
        assert_eq!(config.delay, Duration::from_secs(15));
    }

    #[test]
    fn test_negative_max_games_is_a_config_error() {
        let config = ScrapeConfig {
            max_games: Some(-1),
            ..ScrapeConfig::default()
        };
        let err = config.export_config().unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn test_unknown_team_code_is_a_config_error() {
        let config = ScrapeConfig {
            team_code: "VAN".to_string(),
            ..ScrapeConfig::default()
        };
        let err = config.export_config().unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn test_zero_max_games_is_allowed() {
        let config = ScrapeConfig {
            max_games: Some(0),
            ..ScrapeConfig::default()
        };
        assert_eq!(config.export_config().unwrap().max_games, Some(0));
    }
}
