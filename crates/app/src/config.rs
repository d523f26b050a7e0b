//! Application configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use countrylist_domain::common::non_blank;
use url::Url;

use crate::application::SelectionSettings;
use crate::infrastructure::geolocation::DEFAULT_GEOLOCATION_URL;
use crate::infrastructure::platform::DEFAULT_PROBE_ADDR;
use crate::infrastructure::resilient_directory::RetryConfig;
use crate::infrastructure::rest_countries::{DirectoryServer, DEFAULT_TIMEOUT_SECS};

/// Configuration that cannot be used as given
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl ToString) -> Self {
        Self::Invalid {
            name,
            reason: reason.to_string(),
        }
    }
}

/// Where the device country comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSource {
    /// Configured name; `None` means always unresolved
    Fixed(Option<String>),
    /// IP geolocation lookup
    Geolocation { url: String },
}

/// Shortlist storage backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// JSON file; `None` uses the platform config directory
    File { path: Option<PathBuf> },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationConfig {
    pub source: LocationSource,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityConfig {
    pub force_offline: bool,
    pub probe_addr: String,
    pub probe_interval: Duration,
}

/// Application configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub directory: DirectoryConfig,
    pub location: LocationConfig,
    pub connectivity: ConnectivityConfig,
    pub storage: StorageBackend,
    pub default_country: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = match var("COUNTRYLIST_DIRECTORY_URL") {
            Some(url) => {
                Url::parse(url.trim())
                    .map_err(|e| ConfigError::invalid("COUNTRYLIST_DIRECTORY_URL", e))?;
                url.trim().to_string()
            }
            None => var("COUNTRYLIST_DIRECTORY_ENV")
                .map(|v| DirectoryServer::from_str(&v))
                .transpose()
                .map_err(|e| ConfigError::invalid("COUNTRYLIST_DIRECTORY_ENV", e))?
                .unwrap_or_default()
                .base_url()
                .to_string(),
        };

        let directory = DirectoryConfig {
            base_url,
            timeout: Duration::from_secs(parse_or(
                &var,
                "COUNTRYLIST_HTTP_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            max_retries: parse_or(
                &var,
                "COUNTRYLIST_MAX_RETRIES",
                RetryConfig::default().max_retries,
            ),
        };

        // Set-but-empty means "never resolves", so read it unfiltered
        let source = match lookup("COUNTRYLIST_LOCATION") {
            Some(name) => LocationSource::Fixed(non_blank(&name).map(str::to_string)),
            None => LocationSource::Geolocation {
                url: var("COUNTRYLIST_GEOLOCATION_URL")
                    .unwrap_or_else(|| DEFAULT_GEOLOCATION_URL.to_string()),
            },
        };
        let location = LocationConfig {
            source,
            timeout: Duration::from_secs(parse_or(
                &var,
                "COUNTRYLIST_LOCATION_TIMEOUT_SECS",
                crate::application::services::selection::DEFAULT_LOCATION_TIMEOUT.as_secs(),
            )),
        };

        let connectivity = ConnectivityConfig {
            force_offline: var("COUNTRYLIST_OFFLINE")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            probe_addr: var("COUNTRYLIST_PROBE_ADDR")
                .unwrap_or_else(|| DEFAULT_PROBE_ADDR.to_string()),
            probe_interval: Duration::from_secs(
                parse_or(&var, "COUNTRYLIST_PROBE_INTERVAL_SECS", 5).max(1),
            ),
        };

        let path = var("COUNTRYLIST_STORAGE_PATH").map(PathBuf::from);
        let storage = match var("COUNTRYLIST_STORAGE")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("file") => StorageBackend::File { path },
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::invalid(
                    "COUNTRYLIST_STORAGE",
                    format!("expected file or memory, got {other}"),
                ))
            }
        };

        let default_country = var("COUNTRYLIST_DEFAULT_COUNTRY")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| crate::application::services::selection::DEFAULT_COUNTRY.to_string());

        Ok(Self {
            directory,
            location,
            connectivity,
            storage,
            default_country,
        })
    }

    pub fn selection_settings(&self) -> SelectionSettings {
        SelectionSettings {
            default_country: self.default_country.clone(),
            location_timeout: self.location.timeout,
            ..SelectionSettings::default()
        }
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.directory.max_retries,
            ..RetryConfig::default()
        }
    }
}

/// Parse `name`, falling back to `default` (with a warning) when malformed.
fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match var(name) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(name, value = %raw, default = %default, "Ignoring malformed setting");
                default
            }
        },
        None => default,
    }
}

/// Load `.env.local` then `.env` from the working directory, if present.
pub fn load_dotenv() {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = PathBuf::from(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!(file = filename, error = %e, "Failed to load env file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::rest_countries::{PRODUCTION_BASE_URL, STAGING_BASE_URL};
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]).unwrap();

        assert_eq!(config.directory.base_url, PRODUCTION_BASE_URL);
        assert_eq!(config.directory.timeout, Duration::from_secs(30));
        assert_eq!(
            config.location.source,
            LocationSource::Geolocation {
                url: DEFAULT_GEOLOCATION_URL.to_string()
            }
        );
        assert_eq!(config.location.timeout, Duration::from_secs(10));
        assert!(!config.connectivity.force_offline);
        assert_eq!(config.connectivity.probe_addr, "1.1.1.1:53");
        assert_eq!(config.storage, StorageBackend::File { path: None });
        assert_eq!(config.default_country, "Russia");
        assert_eq!(config.selection_settings(), SelectionSettings::default());
    }

    #[test]
    fn explicit_url_wins_over_environment_name() {
        let config = load(&[
            ("COUNTRYLIST_DIRECTORY_ENV", "staging"),
            ("COUNTRYLIST_DIRECTORY_URL", "http://localhost:8080/v3.1/"),
        ])
        .unwrap();
        assert_eq!(config.directory.base_url, "http://localhost:8080/v3.1/");

        let config = load(&[("COUNTRYLIST_DIRECTORY_ENV", "Staging")]).unwrap();
        assert_eq!(config.directory.base_url, STAGING_BASE_URL);
    }

    #[test]
    fn unknown_values_are_errors() {
        assert!(matches!(
            load(&[("COUNTRYLIST_DIRECTORY_ENV", "qa")]),
            Err(ConfigError::Invalid {
                name: "COUNTRYLIST_DIRECTORY_ENV",
                ..
            })
        ));
        assert!(matches!(
            load(&[("COUNTRYLIST_DIRECTORY_URL", "not a url")]),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            load(&[("COUNTRYLIST_STORAGE", "redis")]),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn malformed_numbers_fall_back() {
        let config = load(&[
            ("COUNTRYLIST_HTTP_TIMEOUT_SECS", "soon"),
            ("COUNTRYLIST_LOCATION_TIMEOUT_SECS", "3"),
            ("COUNTRYLIST_MAX_RETRIES", "-1"),
        ])
        .unwrap();
        assert_eq!(config.directory.timeout, Duration::from_secs(30));
        assert_eq!(config.location.timeout, Duration::from_secs(3));
        assert_eq!(config.directory.max_retries, RetryConfig::default().max_retries);
    }

    #[test]
    fn fixed_location_including_empty() {
        let config = load(&[("COUNTRYLIST_LOCATION", "Japan")]).unwrap();
        assert_eq!(
            config.location.source,
            LocationSource::Fixed(Some("Japan".to_string()))
        );

        let config = load(&[("COUNTRYLIST_LOCATION", "")]).unwrap();
        assert_eq!(config.location.source, LocationSource::Fixed(None));
    }

    #[test]
    fn offline_memory_and_default_country() {
        let config = load(&[
            ("COUNTRYLIST_OFFLINE", "TRUE"),
            ("COUNTRYLIST_STORAGE", "memory"),
            ("COUNTRYLIST_DEFAULT_COUNTRY", " Japan "),
        ])
        .unwrap();
        assert!(config.connectivity.force_offline);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.selection_settings().default_country, "Japan");
    }

    #[test]
    fn storage_path_is_kept() {
        let config = load(&[("COUNTRYLIST_STORAGE_PATH", "/tmp/shortlist.json")]).unwrap();
        assert_eq!(
            config.storage,
            StorageBackend::File {
                path: Some(PathBuf::from("/tmp/shortlist.json"))
            }
        );
    }
}
