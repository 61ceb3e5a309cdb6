use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::classifier::ClassifierConfig;
use crate::cli::Cli;
use crate::readings::SourceMode;

pub const DEFAULT_THINGSPEAK_BASE_URL: &str = "https://api.thingspeak.com";
pub const DEFAULT_CHANNEL_ID: &str = "1866623";
pub const DEFAULT_RESULTS_LIMIT: u32 = 8000;
pub const DEFAULT_ARCHIVE_PATH: &str = "feeds.csv";
pub const DEFAULT_ELECTRICITY_RATE: f64 = 1444.70;
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:3000",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub thingspeak_base_url: String,
    pub channel_id: String,
    pub results_limit: u32,
    pub data_source: SourceMode,
    pub archive_path: PathBuf,
    pub electricity_rate: f64,
    pub light_load_max_w: f64,
    pub medium_load_max_w: f64,
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset or blank keys
    /// fall back to their defaults; set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_source = match get("DATA_SOURCE") {
            Some(raw) => raw.parse::<SourceMode>()?,
            None => SourceMode::Remote,
        };

        let cors_allowed_origins = match get("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        let config = Self {
            thingspeak_base_url: get("THINGSPEAK_BASE_URL")
                .unwrap_or_else(|| DEFAULT_THINGSPEAK_BASE_URL.to_string()),
            channel_id: get("THINGSPEAK_CHANNEL_ID")
                .unwrap_or_else(|| DEFAULT_CHANNEL_ID.to_string()),
            results_limit: parse_or(&get, "THINGSPEAK_RESULTS", DEFAULT_RESULTS_LIMIT)?,
            data_source,
            archive_path: get("ARCHIVE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE_PATH)),
            electricity_rate: parse_or(&get, "ELECTRICITY_RATE", DEFAULT_ELECTRICITY_RATE)?,
            light_load_max_w: parse_or(
                &get,
                "LIGHT_LOAD_MAX_W",
                ClassifierConfig::default().light_max_w,
            )?,
            medium_load_max_w: parse_or(
                &get,
                "MEDIUM_LOAD_MAX_W",
                ClassifierConfig::default().medium_max_w,
            )?,
            host: get("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&get, "API_PORT", DEFAULT_PORT)?,
            cors_allowed_origins,
        };

        config.validate()
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_cli(mut self, cli: &Cli) -> Result<Self, String> {
        if let Some(source) = cli.source.as_deref() {
            self.data_source = source.parse()?;
        }
        if let Some(channel_id) = &cli.channel_id {
            self.channel_id = channel_id.clone();
        }
        if let Some(archive) = &cli.archive {
            self.archive_path = archive.clone();
        }
        if let Some(rate) = cli.rate {
            self.electricity_rate = rate;
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        self.validate()
    }

    /// Remote channel feed URL, including the result-count parameter.
    pub fn feeds_url(&self) -> String {
        format!(
            "{}/channels/{}/feeds.json?results={}",
            self.thingspeak_base_url.trim_end_matches('/'),
            self.channel_id,
            self.results_limit
        )
    }

    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            light_max_w: self.light_load_max_w,
            medium_max_w: self.medium_load_max_w,
        }
    }

    fn validate(self) -> Result<Self, String> {
        if !self.electricity_rate.is_finite() || self.electricity_rate < 0.0 {
            return Err(format!(
                "ELECTRICITY_RATE must be a non-negative number, got {}",
                self.electricity_rate
            ));
        }
        if self.results_limit == 0 {
            return Err("THINGSPEAK_RESULTS must be greater than zero".to_string());
        }
        Ok(self)
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number, got '{}'", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.channel_id, DEFAULT_CHANNEL_ID);
        assert_eq!(config.results_limit, 8000);
        assert_eq!(config.data_source, SourceMode::Remote);
        assert_eq!(config.archive_path, PathBuf::from("feeds.csv"));
        assert!((config.electricity_rate - 1444.70).abs() < f64::EPSILON);
        assert!((config.light_load_max_w - 50.0).abs() < f64::EPSILON);
        assert!((config.medium_load_max_w - 500.0).abs() < f64::EPSILON);
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_allowed_origins.len(), 3);
    }

    #[test]
    fn feeds_url_includes_channel_and_result_count() {
        let config = Config::from_lookup(lookup_from(&[
            ("THINGSPEAK_BASE_URL", "http://localhost:9000/"),
            ("THINGSPEAK_CHANNEL_ID", "42"),
            ("THINGSPEAK_RESULTS", "100"),
        ]))
        .unwrap();

        assert_eq!(
            config.feeds_url(),
            "http://localhost:9000/channels/42/feeds.json?results=100"
        );
    }

    #[test]
    fn csv_data_source_selects_local_mode() {
        let config = Config::from_lookup(lookup_from(&[("DATA_SOURCE", "csv")])).unwrap();
        assert_eq!(config.data_source, SourceMode::Local);
    }

    #[test]
    fn unknown_data_source_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("DATA_SOURCE", "ftp")])).unwrap_err();
        assert!(err.contains("DATA_SOURCE"));
    }

    #[test]
    fn non_numeric_rate_is_rejected() {
        let err =
            Config::from_lookup(lookup_from(&[("ELECTRICITY_RATE", "cheap")])).unwrap_err();
        assert!(err.contains("ELECTRICITY_RATE"));
    }

    #[test]
    fn cors_origins_are_split_on_commas() {
        let config = Config::from_lookup(lookup_from(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://a.test, http://b.test,",
        )]))
        .unwrap();

        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn cli_flags_override_environment() {
        let config = Config::from_lookup(lookup_from(&[("DATA_SOURCE", "api")])).unwrap();
        let cli = Cli {
            source: Some("local".to_string()),
            channel_id: Some("7".to_string()),
            archive: Some(PathBuf::from("/tmp/archive.csv")),
            rate: Some(1000.0),
            port: Some(9090),
        };

        let config = config.with_cli(&cli).unwrap();

        assert_eq!(config.data_source, SourceMode::Local);
        assert_eq!(config.channel_id, "7");
        assert_eq!(config.archive_path, PathBuf::from("/tmp/archive.csv"));
        assert!((config.electricity_rate - 1000.0).abs() < f64::EPSILON);
        assert_eq!(config.port, 9090);
    }
}
