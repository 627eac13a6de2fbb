//! Database builder for fluent configuration

use std::path::Path;
use std::sync::Arc;

use tally_core::Result;

use super::{Database, RetryConfig, TallyConfig};
use crate::lifecycle::{LifecycleHooks, NoopHooks};

/// Builder for Database configuration
///
/// # Ways to Open a Database
///
/// ```ignore
/// use tally_engine::Database;
///
/// // 1. Defaults, no hooks
/// let db = Database::open();
///
/// // 2. Builder for custom hooks or retry policy
/// let db = Database::builder()
///     .config_file("tally.toml")?
///     .hooks(Presence::default())
///     .open();
/// ```
pub struct DatabaseBuilder {
    config: TallyConfig,
    hooks: Arc<dyn LifecycleHooks>,
}

impl DatabaseBuilder {
    /// Create new builder with default config and no-op hooks
    pub fn new() -> Self {
        Self {
            config: TallyConfig::default(),
            hooks: Arc::new(NoopHooks),
        }
    }

    /// Use `config` instead of the defaults
    pub fn config(mut self, config: TallyConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the config from a `tally.toml` file
    ///
    /// A missing file keeps the defaults.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Config` if the file exists but is invalid.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.config = TallyConfig::load(path.as_ref())?;
        Ok(self)
    }

    /// Override only the retry policy
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Install lifecycle hooks
    pub fn hooks<H: LifecycleHooks + 'static>(mut self, hooks: H) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// Install already shared lifecycle hooks
    pub fn shared_hooks(mut self, hooks: Arc<dyn LifecycleHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Create the database
    pub fn open(self) -> Arc<Database> {
        Arc::new(Database::new(self.config, self.hooks))
    }
}

impl Default for DatabaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
