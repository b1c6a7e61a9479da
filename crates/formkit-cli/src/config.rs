//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Every key has a default, so an
//! empty file and no file behave the same. Command-line flags override file
//! values.
//!
//! ```yaml
//! indent: 4
//! fail_on_errors: false
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use formkit_sync::TextOptions;

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Spaces per nesting level when printing documents.
    pub indent: usize,
    /// Exit with status 1 when `validate` finds errors.
    pub fail_on_errors: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            fail_on_errors: true,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(config = ?config, path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn text_options(&self) -> TextOptions {
        TextOptions {
            indent: self.indent,
        }
    }
}
