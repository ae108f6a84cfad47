//! ---
//! si_section: "03-configuration"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "TOML configuration with environment overrides."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use tracing::debug;
use url::Url;

use crate::logging::LogFormat;

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_owned()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_notification_ttl() -> Duration {
    Duration::from_secs(5)
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::StructuredJson
}

fn default_stdout() -> bool {
    true
}

/// Primary configuration object for the StudentInfo tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    /// `None` when no file was found and built-in defaults apply.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &'static str = "SI_CONFIG";
    pub const ENV_BACKEND_URL: &'static str = "SI_BACKEND_URL";
    pub const DEFAULT_CANDIDATES: [&'static str; 1] = ["configs/studentinfo.toml"];

    /// Load configuration, respecting `SI_CONFIG` and `SI_BACKEND_URL`.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration together with the effective source path.
    ///
    /// Resolution order: the `SI_CONFIG` file, then the first existing
    /// candidate, then defaults. `SI_BACKEND_URL` is applied last.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        let mut loaded = Self::resolve(candidates)?;
        let backend_override = std::env::var(Self::ENV_BACKEND_URL).ok();
        loaded.config.apply_overrides(backend_override);
        loaded.config.validate()?;
        Ok(loaded)
    }

    fn resolve<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        debug!(
            inspected = %candidates
                .iter()
                .map(|p| p.as_ref().display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            "no configuration file found, using defaults"
        );
        Ok(LoadedAppConfig {
            config: AppConfig::default(),
            source: None,
        })
    }

    fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Apply environment-level overrides. Blank values are ignored.
    pub fn apply_overrides(&mut self, backend_url: Option<String>) {
        if let Some(url) = backend_url.filter(|u| !u.trim().is_empty()) {
            self.backend.base_url = url.trim().to_owned();
        }
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.backend.validate()?;
        if self.ui.notification_ttl.is_zero() {
            return Err(anyhow!("ui.notification_ttl must be greater than zero"));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(anyhow!("ui.tick_rate_ms must be greater than zero"));
        }
        Ok(())
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Where the backend lives and how long to wait for it.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL including any deployment prefix, e.g. `http://host:8080/StudentInfo`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub request_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl BackendConfig {
    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(self.base())
            .with_context(|| format!("backend.base_url '{}' is not a valid URL", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "backend.base_url must use http or https, got '{}'",
                url.scheme()
            ));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(anyhow!(
                "backend.base_url must not carry a query or fragment"
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(anyhow!("backend.request_timeout must be greater than zero"));
        }
        Ok(())
    }
}

/// Console behaviour.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a notification stays visible.
    #[serde(default = "default_notification_ttl")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub notification_ttl: Duration,
    /// Event poll interval; also the notification expiry granularity.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_ttl: default_notification_ttl(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
    /// Mirror events to stdout. The console forces this off.
    #[serde(default = "default_stdout")]
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: default_log_format(),
            file_prefix: None,
            stdout: default_stdout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.ui.notification_ttl, Duration::from_secs(5));
        assert_eq!(config.backend.base(), "http://127.0.0.1:8080");
    }

    #[test]
    fn parses_prefixed_base_url() {
        let config = AppConfig::from_str(
            r#"
            [backend]
            base_url = "http://school.example:8080/StudentInfo/"
            request_timeout = 3

            [ui]
            notification_ttl = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base(), "http://school.example:8080/StudentInfo");
        assert_eq!(config.backend.request_timeout, Duration::from_secs(3));
        assert_eq!(config.ui.notification_ttl, Duration::from_secs(8));
        assert_eq!(config.ui.tick_rate_ms, 250);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = AppConfig::from_str("[backend]\nbase_url = \"ftp://host/\"\n").unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(AppConfig::from_str("[backend]\nrequest_timeout = 0\n").is_err());
    }

    #[test]
    fn override_replaces_base_url() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some("  ".into()));
        assert_eq!(config.backend.base(), "http://127.0.0.1:8080");
        config.apply_overrides(Some("https://records.example/app".into()));
        assert_eq!(config.backend.base(), "https://records.example/app");
    }

    #[test]
    fn first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let present = dir.path().join("studentinfo.toml");
        fs::write(&present, "[ui]\ntick_rate_ms = 100\n").unwrap();

        let loaded = AppConfig::resolve(&[missing, present.clone()]).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(present.as_path()));
        assert_eq!(loaded.config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn no_candidates_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::resolve(&[dir.path().join("nope.toml")]).unwrap();
        assert!(loaded.source.is_none());
    }
}
