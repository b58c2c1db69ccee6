use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub classifier: ClassifierSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    /// Source of the line-delimited business dataset
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// How long a fetched snapshot stays live before a refetch
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            ttl_secs: default_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_source_url() -> String {
    "https://www.dropbox.com/scl/fi/9lzttqolt0ojmdiian81r/yelp_academic_dataset_business.json?rlkey=0xz2qnm491hudpfspdcfmr4uo&dl=1".to_string()
}
fn default_ttl_secs() -> u64 {
    3600
}
fn default_request_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    /// Hard ceiling on the per-request result cap
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_limit: default_max_limit(),
        }
    }
}

fn default_max_limit() -> u16 {
    100
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    /// Category terms that disqualify a record from the lodging facet
    #[serde(default = "default_excluded_lodging_terms")]
    pub excluded_lodging_terms: Vec<String>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            excluded_lodging_terms: default_excluded_lodging_terms(),
        }
    }
}

fn default_excluded_lodging_terms() -> Vec<String> {
    vec!["Transport".to_string(), "Distilleries".to_string()]
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with TRIPMAP_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with TRIPMAP_)
            // e.g., TRIPMAP_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("TRIPMAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TRIPMAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply bare environment variable conveniences on top of the layered config
///
/// `DATASET_URL` is checked first, then the prefixed `TRIPMAP_DATASET__SOURCE_URL`.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let dataset_url = env::var("DATASET_URL")
        .or_else(|_| env::var("TRIPMAP_DATASET__SOURCE_URL"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = dataset_url {
        builder = builder.set_override("dataset.source_url", url)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_excluded_lodging_terms() {
        let classifier = ClassifierSettings::default();
        assert_eq!(
            classifier.excluded_lodging_terms,
            vec!["Transport", "Distilleries"]
        );
    }

    #[test]
    fn test_default_search_limits() {
        let search = SearchSettings::default();
        assert_eq!(search.max_limit, 100);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_default_dataset_ttl_matches_source_cache() {
        let dataset = DatasetSettings::default();
        assert_eq!(dataset.ttl_secs, 3600);
    }
}
