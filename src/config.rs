//! Editor defaults supplied by the host page.
//!
//! The host passes a JSON object to [`crate::engine::Engine::new`]. Every
//! field is optional; missing fields take the defaults below and unknown
//! fields are ignored so older hosts keep working.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{DEFAULT_COLOR, normalize_hex_color};
use crate::consts::MAX_SIZE;
use crate::input::{StrokeStyle, Tool};
use crate::mockup::FrameSpec;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid editor config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown log level: {0}")]
    LogLevel(String),
}

/// Initial editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Initial stroke color.
    pub color: String,
    /// Initial value of the shared size control.
    pub size: u32,
    /// Tool active when the editor opens.
    pub tool: Tool,
    /// Frame enabled when the editor opens.
    pub frame: Option<FrameSpec>,
    /// `log` level name (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { color: DEFAULT_COLOR.to_owned(), size: 3, tool: Tool::Arrow, frame: None, log_level: "info".to_owned() }
    }
}

impl EditorConfig {
    /// Parse host JSON. An empty or blank string yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed JSON or an unknown log level.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_json::from_str(raw)?;
        config.color = normalize_hex_color(&config.color, DEFAULT_COLOR);
        config.size = config.size.clamp(1, MAX_SIZE);
        config.level()?;
        Ok(config)
    }

    /// Parsed log level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LogLevel`] if the name is not a `log` level.
    pub fn level(&self) -> Result<log::Level, ConfigError> {
        log::Level::from_str(self.log_level.trim()).map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Style for new annotations.
    #[must_use]
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::new(&self.color, self.size)
    }
}
