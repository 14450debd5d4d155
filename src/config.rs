//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/fip/fip.toml`
//! 3. Environment variables: `FIP_*` prefix
//! 4. Command line (`--host`), applied by the caller

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

pub const DEFAULT_HOST: &str = "http://127.0.0.1:2375";
pub const DEFAULT_API_VERSION: &str = "1.23";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Unified configuration for fip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// API endpoint (`http://`, `https://` or `tcp://`)
    pub host: String,
    /// API version prefix, e.g. "1.23" -> `/v1.23/fips`. None sends unversioned paths.
    pub api_version: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Bearer token sent as `Authorization` header
    pub token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            api_version: Some(DEFAULT_API_VERSION.into()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token: None,
        }
    }
}

/// Raw settings for intermediate parsing (all Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    host: Option<String>,
    api_version: Option<String>,
    timeout_secs: Option<u64>,
    token: Option<String>,
}

/// Get the XDG config directory for fip.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fip").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("fip.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            host: overlay.host.clone().unwrap_or_else(|| self.host.clone()),
            api_version: overlay
                .api_version
                .clone()
                .or_else(|| self.api_version.clone()),
            timeout_secs: overlay.timeout_secs.unwrap_or(self.timeout_secs),
            token: overlay.token.clone().or_else(|| self.token.clone()),
        }
    }

    /// Load settings from defaults, the global config file and `FIP_*` env vars.
    pub fn load() -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_from(global.as_deref())
    }

    /// Load settings using an explicit config file instead of the global one.
    ///
    /// A missing file is an error here; `load()` only passes files that exist.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_file {
            debug!("load_from: config file {}", path.display());
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current, None)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply FIP_* environment variables as explicit overrides.
    ///
    /// `source` replaces the process environment when given.
    fn apply_env_overrides(
        mut settings: Self,
        source: Option<config::Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FIP")
                    .prefix_separator("_")
                    .source(source),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = optional(config.get_string("host"))? {
            settings.host = val;
        }
        if let Some(val) = optional(config.get_string("api_version"))? {
            // empty value switches versioned paths off
            settings.api_version = Some(val).filter(|v| !v.is_empty());
        }
        if let Some(val) = optional(config.get::<u64>("timeout_secs"))? {
            settings.timeout_secs = val;
        }
        if let Some(val) = optional(config.get_string("token"))? {
            settings.token = Some(val);
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.host.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "host must not be empty".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ApplicationError::Config {
                message: "timeout_secs must be greater than 0".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        format!(
            r#"# fip configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/fip/fip.toml
#   Env:    FIP_* environment variables (FIP_HOST, FIP_API_VERSION, FIP_TIMEOUT_SECS, FIP_TOKEN)
#   CLI:    --host

# API endpoint
# host = "{DEFAULT_HOST}"

# API version prefix for request paths
# api_version = "{DEFAULT_API_VERSION}"

# Per-request timeout in seconds
# timeout_secs = {DEFAULT_TIMEOUT_SECS}

# Bearer token for the Authorization header
# token = "..."
"#
        )
    }
}

/// Write the template to `path`, refusing to overwrite an existing file.
pub fn write_template(path: &Path) -> Result<(), ApplicationError> {
    if path.exists() {
        return Err(ApplicationError::Config {
            message: format!("config file already exists: {}", path.display()),
        });
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ApplicationError::OperationFailed {
            context: format!("create config dir {}", parent.display()),
            source: Box::new(e),
        })?;
    }
    std::fs::write(path, Settings::template()).map_err(|e| ApplicationError::OperationFailed {
        context: format!("write config {}", path.display()),
        source: Box::new(e),
    })
}

/// Treat a missing key as "not set", anything else as a real error.
fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn given_defaults_then_points_at_local_daemon() {
        let settings = Settings::default();
        assert_eq!(settings.host, DEFAULT_HOST);
        assert_eq!(settings.api_version.as_deref(), Some(DEFAULT_API_VERSION));
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(settings.token.is_none());
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let overlay = RawSettings {
            host: Some("tcp://10.1.1.1:2375".into()),
            ..Default::default()
        };
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.host, "tcp://10.1.1.1:2375");
        assert_eq!(merged.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn given_env_vars_when_applying_overrides_then_replace_values() {
        let settings = Settings::apply_env_overrides(
            Settings::default(),
            env(&[
                ("FIP_HOST", "http://api.example:8080"),
                ("FIP_TIMEOUT_SECS", "5"),
                ("FIP_TOKEN", "secret"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.host, "http://api.example:8080");
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.token.as_deref(), Some("secret"));
        assert_eq!(settings.api_version.as_deref(), Some(DEFAULT_API_VERSION));
    }

    #[test]
    fn given_empty_api_version_env_when_applying_overrides_then_disables_prefix() {
        let settings =
            Settings::apply_env_overrides(Settings::default(), env(&[("FIP_API_VERSION", "")]))
                .unwrap();
        assert!(settings.api_version.is_none());
    }

    #[test]
    fn given_non_numeric_timeout_env_when_applying_overrides_then_config_error() {
        let result = Settings::apply_env_overrides(
            Settings::default(),
            env(&[("FIP_TIMEOUT_SECS", "soon")]),
        );
        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }

    #[test]
    fn given_zero_timeout_when_validating_then_rejected() {
        let settings = Settings {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.host.is_none());
    }
}
