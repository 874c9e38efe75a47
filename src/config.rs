use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub scraping: ScrapingConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapingConfig {
    /// Index page listing every state with a link to its city listing.
    pub states_index_url: String,

    /// Base URL the two-letter state code is appended to.
    pub state_listing_base_url: String,

    pub request_timeout_seconds: u64,
    pub user_agent: String,

    /// Jittered delay between per-state requests, to stay off the
    /// source site's blocklist.
    pub rate_limit_min_ms: u64,
    pub rate_limit_max_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub progress_interval: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
    pub pretty_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraping: ScrapingConfig {
                states_index_url: "https://www.bestplaces.net/find/".to_string(),
                state_listing_base_url: "https://www.bestplaces.net/find/state.aspx?state="
                    .to_string(),
                request_timeout_seconds: 30,
                user_agent: "Mozilla/5.0 (compatible; CityScraper/1.0)".to_string(),
                rate_limit_min_ms: 500,
                rate_limit_max_ms: 1000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                progress_interval: 10,
            },
            output: OutputConfig {
                directory: "out".to_string(),
                pretty_json: true,
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_rate_limits() {
        let config = Config::default();
        assert!(config.scraping.rate_limit_min_ms <= config.scraping.rate_limit_max_ms);
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            parsed.scraping.states_index_url,
            config.scraping.states_index_url
        );
    }
}
