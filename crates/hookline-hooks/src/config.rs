use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EventError, Result};

/// Configuration for ordered event dispatch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// How long an event is held for reordering after its capture time.
    pub reorder_window_ms: u64,
    /// Maximum buffered events before the oldest are released early.
    pub buffer_capacity: usize,
    /// Skip the remaining listeners of an event after the first failure.
    pub stop_on_listener_error: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            reorder_window_ms: 250,
            buffer_capacity: 1024,
            stop_on_listener_error: false,
        }
    }
}

impl DispatchConfig {
    /// Parse from TOML. Missing keys take their default.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| EventError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| EventError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        info!(
            path = %path.display(),
            reorder_window_ms = config.reorder_window_ms,
            buffer_capacity = config.buffer_capacity,
            "dispatch config loaded"
        );
        Ok(config)
    }
}
