//! Harness configuration
//!
//! Loaded from `bmx.toml`. Base URL, timeouts, credentials, headless mode
//! and the screenshot directory are all externally supplied; scenarios never
//! embed environment-specific literals.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{HarnessError, Result};

/// Login fixture for scenarios that authenticate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_password")]
    pub password: String,
}

/// Harness-wide configuration
///
/// Loaded from `bmx.toml` in the working directory (or a `--config` path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Base URL of the running target application
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default timeout for wait steps that omit their own
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,

    /// Polling interval for wait conditions
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Wall-clock budget per scenario; overruns are recorded as errored
    #[serde(default = "default_scenario_budget_ms")]
    pub scenario_budget_ms: u64,

    /// Run the browser headless
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Directory screenshots are written to
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    /// Login credentials used by the builtin suite
    #[serde(default)]
    pub credentials: Credentials,
}

// Default value providers
fn default_base_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_poll_interval_ms() -> u64 {
    150
}

fn default_scenario_budget_ms() -> u64 {
    60_000
}

fn default_headless() -> bool {
    true
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_email() -> String {
    "alex@test.com".to_string()
}

fn default_password() -> String {
    "password".to_string()
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: default_email(),
            password: default_password(),
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_timeout_ms: default_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            scenario_budget_ms: default_scenario_budget_ms(),
            headless: default_headless(),
            artifacts_dir: default_artifacts_dir(),
            credentials: Credentials::default(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a TOML file, or use defaults if absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| {
                HarnessError::Config(format!("failed to parse {}: {}", path.display(), e))
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default configuration to `path`
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let config = Self::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| HarnessError::Config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve a scenario URL against the configured base URL
    ///
    /// Absolute URLs pass through untouched so a suite file can still point
    /// a single scenario elsewhere.
    pub fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                url.trim_start_matches('/')
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, "http://localhost:5173");
        assert_eq!(config.default_timeout_ms, 5000);
        assert_eq!(config.poll_interval_ms, 150);
        assert!(config.headless);
        assert_eq!(config.credentials.email, "alex@test.com");
        assert_eq!(config.credentials.password, "password");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = HarnessConfig::load_or_default(&dir.path().join("bmx.toml")).unwrap();
        assert_eq!(config.base_url, "http://localhost:5173");
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bmx.toml");
        std::fs::write(
            &path,
            r#"
base_url = "http://localhost:4173"

[credentials]
password = "test1234"
"#,
        )
        .unwrap();

        let config = HarnessConfig::load_or_default(&path).unwrap();
        assert_eq!(config.base_url, "http://localhost:4173");
        assert_eq!(config.credentials.password, "test1234");
        // Untouched fields keep their defaults
        assert_eq!(config.credentials.email, "alex@test.com");
        assert_eq!(config.default_timeout_ms, 5000);
    }

    #[test]
    fn test_write_default_round_trips() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bmx.toml");
        HarnessConfig::write_default(&path).unwrap();

        let config = HarnessConfig::load_or_default(&path).unwrap();
        assert_eq!(config.scenario_budget_ms, 60_000);
        assert_eq!(config.artifacts_dir, PathBuf::from("artifacts"));
    }

    #[test]
    fn test_resolve_url() {
        let config = HarnessConfig::default();
        assert_eq!(config.resolve_url("/"), "http://localhost:5173/");
        assert_eq!(
            config.resolve_url("dashboard"),
            "http://localhost:5173/dashboard"
        );
        assert_eq!(
            config.resolve_url("http://localhost:3000/"),
            "http://localhost:3000/"
        );
    }
}
