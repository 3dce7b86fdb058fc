pub mod feature_toggles;

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use feature_toggles::FeatureToggles;
use thiserror::Error;

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 3011;
pub const DEFAULT_CATALOG_PATH: &str = "plans.json";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Where the plan catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Proxy to the subscription service over HTTP.
    Upstream { url: String, timeout: Duration },
    /// Read an exported catalog document from disk on every request.
    File { path: PathBuf },
}

impl CatalogSource {
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogSource::Upstream { .. } => "upstream",
            CatalogSource::File { .. } => "file",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub catalog: CatalogSource,
    pub static_dir: Option<PathBuf>,
    pub feature_toggles: FeatureToggles,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let toggles = FeatureToggles::from_env_path();
        Self::from_lookup(|key| std::env::var(key).ok(), toggles)
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F, feature_toggles: FeatureToggles) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = match get("BILLING_SERVICE_HOST") {
            Some(raw) => raw.trim().parse::<IpAddr>().map_err(|e| ConfigError::Invalid {
                key: "BILLING_SERVICE_HOST",
                reason: e.to_string(),
            })?,
            None => DEFAULT_HOST,
        };

        let port = match get("BILLING_SERVICE_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "BILLING_SERVICE_PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let catalog = match get("SUBSCRIPTION_SERVICE_URL") {
            Some(url) => {
                let timeout_secs = match get("SUBSCRIPTION_SERVICE_TIMEOUT_SECS") {
                    Some(raw) => match raw.trim().parse::<u64>() {
                        Ok(0) => {
                            return Err(ConfigError::Invalid {
                                key: "SUBSCRIPTION_SERVICE_TIMEOUT_SECS",
                                reason: "must be greater than zero".to_string(),
                            })
                        }
                        Ok(secs) => secs,
                        Err(e) => {
                            return Err(ConfigError::Invalid {
                                key: "SUBSCRIPTION_SERVICE_TIMEOUT_SECS",
                                reason: e.to_string(),
                            })
                        }
                    },
                    None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
                };
                CatalogSource::Upstream {
                    url: url.trim().to_string(),
                    timeout: Duration::from_secs(timeout_secs),
                }
            }
            None => CatalogSource::File {
                path: PathBuf::from(
                    get("PLAN_CATALOG_PATH").unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string()),
                ),
            },
        };

        let static_dir = get("STATIC_DIR").map(PathBuf::from);

        Ok(Self {
            host,
            port,
            catalog,
            static_dir,
            feature_toggles,
        })
    }

    /// The SPA bundle directory, if it is configured, present on disk and not
    /// switched off.
    pub fn static_site_dir(&self) -> Option<&PathBuf> {
        if !self.feature_toggles.static_site_enabled() {
            return None;
        }
        self.static_dir.as_ref().filter(|dir| dir.is_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[]), FeatureToggles::default()).unwrap();

        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert_eq!(config.port, 3011);
        assert_eq!(
            config.catalog,
            CatalogSource::File { path: PathBuf::from("plans.json") }
        );
        assert_eq!(config.catalog.kind(), "file");
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_upstream_selected_when_url_set() {
        let config = AppConfig::from_lookup(
            lookup(&[
                ("SUBSCRIPTION_SERVICE_URL", " http://subscriptions.internal/plans "),
                ("SUBSCRIPTION_SERVICE_TIMEOUT_SECS", "3"),
                ("PLAN_CATALOG_PATH", "ignored.json"),
            ]),
            FeatureToggles::default(),
        )
        .unwrap();

        assert_eq!(
            config.catalog,
            CatalogSource::Upstream {
                url: "http://subscriptions.internal/plans".to_string(),
                timeout: Duration::from_secs(3),
            }
        );
        assert_eq!(config.catalog.kind(), "upstream");
    }

    #[test]
    fn test_blank_url_falls_back_to_file() {
        let config = AppConfig::from_lookup(
            lookup(&[("SUBSCRIPTION_SERVICE_URL", "  "), ("PLAN_CATALOG_PATH", "/srv/plans.json")]),
            FeatureToggles::default(),
        )
        .unwrap();

        assert_eq!(
            config.catalog,
            CatalogSource::File { path: PathBuf::from("/srv/plans.json") }
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AppConfig::from_lookup(
            lookup(&[("BILLING_SERVICE_PORT", "http")]),
            FeatureToggles::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BILLING_SERVICE_PORT", .. }));

        let err = AppConfig::from_lookup(
            lookup(&[
                ("SUBSCRIPTION_SERVICE_URL", "http://localhost:9000"),
                ("SUBSCRIPTION_SERVICE_TIMEOUT_SECS", "0"),
            ]),
            FeatureToggles::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { key: "SUBSCRIPTION_SERVICE_TIMEOUT_SECS", .. }
        ));

        let err = AppConfig::from_lookup(
            lookup(&[("BILLING_SERVICE_HOST", "not-an-ip")]),
            FeatureToggles::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BILLING_SERVICE_HOST", .. }));
    }

    #[test]
    fn test_static_site_dir_requires_existing_dir_and_toggle() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_string_lossy().to_string();

        let config = AppConfig::from_lookup(
            lookup(&[("STATIC_DIR", dir_str.as_str())]),
            FeatureToggles::default(),
        )
        .unwrap();
        assert_eq!(config.static_site_dir(), Some(&dir.path().to_path_buf()));

        let disabled: FeatureToggles = serde_json::from_str(r#"{"StaticSite": false}"#).unwrap();
        let config = AppConfig::from_lookup(lookup(&[("STATIC_DIR", dir_str.as_str())]), disabled).unwrap();
        assert!(config.static_site_dir().is_none());

        let config = AppConfig::from_lookup(
            lookup(&[("STATIC_DIR", "/definitely/not/here")]),
            FeatureToggles::default(),
        )
        .unwrap();
        assert!(config.static_site_dir().is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        std::env::set_var("BILLING_SERVICE_PORT", "4100");
        std::env::set_var("SUBSCRIPTION_SERVICE_URL", "http://127.0.0.1:9999/plans");
        std::env::remove_var("SUBSCRIPTION_SERVICE_TIMEOUT_SECS");

        let config = AppConfig::from_env();

        std::env::remove_var("BILLING_SERVICE_PORT");
        std::env::remove_var("SUBSCRIPTION_SERVICE_URL");

        let config = config.unwrap();
        assert_eq!(config.port, 4100);
        assert_eq!(
            config.catalog,
            CatalogSource::Upstream {
                url: "http://127.0.0.1:9999/plans".to_string(),
                timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            }
        );
    }
}
