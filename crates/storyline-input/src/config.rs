//! Timing and policy configuration for inputs and style commands.
//!
//! Every field has a default, so an empty file is a valid config. Files are
//! read as TOML or JSON depending on their extension.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use storyline_text::TogglePolicy;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InputConfig {
    /// Delay before a committed numeric value is reported.
    pub commit_delay_ms: u64,
    /// Delay before re-selecting contents after an arrow-key step.
    pub select_delay_ms: u64,
    /// Delay before a committed color is reported.
    pub color_delay_ms: u64,
    /// Window in which a second click counts as a double click.
    pub double_click_ms: u64,
    /// Style undo steps kept by a store.
    pub undo_depth: usize,
    pub toggle: TogglePolicy,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            commit_delay_ms: 500,
            select_delay_ms: 10,
            color_delay_ms: 100,
            double_click_ms: 200,
            undo_depth: 100,
            toggle: TogglePolicy::default(),
        }
    }
}

impl InputConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let read = || {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&read()?)?,
            Some("json") => Self::from_json_str(&read()?)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        tracing::debug!(target: "storyline::input", path = %path.display(), "loaded input config");
        Ok(config)
    }

    pub fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }

    pub fn select_delay(&self) -> Duration {
        Duration::from_millis(self.select_delay_ms)
    }

    pub fn color_delay(&self) -> Duration {
        Duration::from_millis(self.color_delay_ms)
    }

    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }

    /// An empty store with this config's undo depth.
    pub fn style_store(&self) -> storyline_text::StyleStore {
        storyline_text::StyleStore::with_max_steps(self.undo_depth)
    }

    pub fn toggle_resolver(&self) -> storyline_text::ToggleResolver {
        storyline_text::ToggleResolver::new(self.toggle)
    }
}
