//! # Configuration
//!
//! Logger options that can live in a file. The stringify strategy and the clock are
//! code-only and are set on the [`LoggerBuilder`] returned by [`LoggerConfig::builder`].
//!
//! ## Configuration File Format
//!
//! ```toml
//! message_label = "msg"
//! level_label = "level"
//! time_label = "app_time"   # omit to emit a bare timestamp
//! force_quotes = false
//! ```
//!
//! Every key is optional. Unknown keys are rejected so a typo fails at load time
//! rather than silently falling back to a default. Label values are validated when the
//! logger is built.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use simplog::config::LoggerConfig;
//! use simplog::logger::{Log, StdoutSink};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LoggerConfig::load("simplog.toml")?;
//!     let log = config.builder(StdoutSink).build()?;
//!     log.log("started")?;
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::logger::{LoggerBuilder, Sink, DEFAULT_LEVEL_LABEL, DEFAULT_MESSAGE_LABEL};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub message_label: String,
    pub level_label: String,
    /// Label prefixed to the timestamp, e.g. `app_time=2024-...`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_label: Option<String>,
    /// Quote every value, not just those containing spaces
    pub force_quotes: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            message_label: DEFAULT_MESSAGE_LABEL.to_string(),
            level_label: DEFAULT_LEVEL_LABEL.to_string(),
            time_label: None,
            force_quotes: false,
        }
    }
}

impl LoggerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        Self::from_toml_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Create a default configuration file
    pub fn create_default(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(&LoggerConfig::default())
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path.display(), e))?;

        Ok(())
    }

    /// Builder preloaded with these options.
    pub fn builder(&self, sink: impl Sink + 'static) -> LoggerBuilder {
        let builder = LoggerBuilder::new(sink)
            .message_label(self.message_label.as_str())
            .level_label(self.level_label.as_str())
            .force_quotes(self.force_quotes);
        match &self.time_label {
            Some(label) => builder.time_label(label.as_str()),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(LoggerConfig::from_toml_str("").unwrap(), LoggerConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = LoggerConfig::from_toml_str("time_label = \"app_time\"\n").unwrap();
        assert_eq!(config.time_label.as_deref(), Some("app_time"));
        assert_eq!(config.message_label, "msg");
        assert!(!config.force_quotes);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(LoggerConfig::from_toml_str("force_quote = true\n").is_err());
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(LoggerConfig::from_toml_str("message_label = 3\n").is_err());
    }
}
