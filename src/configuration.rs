use std::time::Duration;

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub scraper: ScraperSettings,
    pub storage: StorageSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScraperSettings {
    pub endpoint: String,
    pub user_agent: String,
    pub accept_language: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_workers: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub min_delay_ms: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_delay_ms: u64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StorageSettings {
    pub results_file: String,
}

impl ScraperSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Inclusive pacing range in milliseconds. An inverted range collapses to its lower bound.
    pub fn delay_range_ms(&self) -> (u64, u64) {
        (self.min_delay_ms, self.max_delay_ms.max(self.min_delay_ms))
    }
}

impl Default for ScraperSettings {
    fn default() -> Self {
        ScraperSettings {
            endpoint: "https://html.duckduckgo.com/html/".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            timeout_secs: 15,
            max_workers: 5,
            min_delay_ms: 1000,
            max_delay_ms: 3000,
        }
    }
}

/// Reads `configuration/base.yaml` (if present) and then `APP_*` environment overrides,
/// e.g. `APP_SCRAPER__MAX_WORKERS=8`.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("Failed to determine cwd: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    let scraper = ScraperSettings::default();

    let settings = config::Config::builder()
        .set_default("application.host", "127.0.0.1")?
        .set_default("application.port", 5000)?
        .set_default("scraper.endpoint", scraper.endpoint)?
        .set_default("scraper.user_agent", scraper.user_agent)?
        .set_default("scraper.accept_language", scraper.accept_language)?
        .set_default("scraper.timeout_secs", scraper.timeout_secs)?
        .set_default("scraper.max_workers", scraper.max_workers as u64)?
        .set_default("scraper.min_delay_ms", scraper.min_delay_ms)?
        .set_default("scraper.max_delay_ms", scraper.max_delay_ms)?
        .set_default("storage.results_file", "data/serp_results.json")?
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
