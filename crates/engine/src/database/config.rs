//! Database configuration via `tally.toml`
//!
//! Every field has a default, so an empty or missing file yields the default
//! configuration. Unknown sections are ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tally_core::{Result, TallyError};
use tracing::{debug, info};

use super::transactions::RetryConfig;

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "tally.toml";

/// Database configuration loaded from `tally.toml`.
///
/// # Example
///
/// ```toml
/// [retry]
/// max_retries = 3
/// base_delay_ms = 1
/// max_delay_ms = 50
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyConfig {
    /// Retry policy for conflicting reducer transactions
    #[serde(default)]
    pub retry: RetryConfig,
}

impl TallyConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Config` if the text is not valid TOML or a field
    /// has the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| TallyError::config(format!("failed to parse config: {}", e)))
    }

    /// Load a config file, falling back to defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Config` if the file exists but cannot be read
    /// or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(target: "tally::config", path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            TallyError::config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content).map_err(|e| {
            TallyError::config(format!("{} ({})", e.message(), path.display()))
        })?;
        info!(
            target: "tally::config",
            path = %path.display(),
            max_retries = config.retry.max_retries,
            "Loaded config"
        );
        Ok(config)
    }

    /// Serialize this config to TOML and write it to `path`.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TallyError::internal(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            TallyError::config(format!(
                "failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Tally configuration
#
# Retry policy for reducer transactions that lose an optimistic
# concurrency race. Validation failures are never retried.
[retry]
max_retries = 3      # attempts after the first (0 = no retries)
base_delay_ms = 1    # first backoff delay, doubled per attempt
max_delay_ms = 50    # backoff cap
"#
    }
}
