//! Controller configuration, optionally loaded from a JSON file.
//!
//! Example `config.json`:
//!
//! ```json
//! {
//!   "selector": { "vendor_id": 1240, "product_id": 61139, "usage_page": 65329, "usage": 98 },
//!   "read_timeout_ms": 500,
//!   "palette": { "purple": "#800080" }
//! }
//! ```
//!
//! Every field is optional. Palette entries are layered over the built-in
//! colors.

use crate::color::Palette;
use crate::device::IdentitySelector;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default wait for the answer to a state query.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Default notification length.
pub const DEFAULT_NOTIFICATION_MS: u64 = 1000;

/// Immutable settings handed to a controller at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Which HID interface to open.
    pub selector: IdentitySelector,
    /// How long a state query waits for the keyboard to answer.
    pub read_timeout_ms: u64,
    /// Notification length used when the caller does not give one.
    pub notification_duration_ms: u64,
    /// Named colors.
    pub palette: Palette,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            selector: IdentitySelector::default(),
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            notification_duration_ms: DEFAULT_NOTIFICATION_MS,
            palette: Palette::default(),
        }
    }
}

impl ControllerConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }
}

/// Default config file location.
///
/// `$XDG_CONFIG_HOME/alt-rgb/config.json`, falling back to
/// `$HOME/.config/alt-rgb/config.json`.
pub fn config_path() -> Result<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .ok_or_else(|| Error::Config("neither XDG_CONFIG_HOME nor HOME is set".to_string()))?;
    Ok(base.join("alt-rgb").join("config.json"))
}

/// Parse a config from JSON text.
pub fn parse_config(text: &str) -> Result<ControllerConfig> {
    serde_json::from_str(text).map_err(|e| Error::Config(format!("invalid config: {e}")))
}

/// Load a config file.
pub fn load_config(path: &Path) -> Result<ControllerConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
    let config = parse_config(&text)?;
    debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Load an explicit config file, or the default location if it exists.
///
/// A missing explicit path is an error; a missing default file yields the
/// built-in defaults.
pub fn load_or_default(explicit: Option<&Path>) -> Result<ControllerConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match config_path() {
        Ok(path) if path.exists() => load_config(&path),
        Ok(path) => {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(ControllerConfig::default())
        }
        Err(e) => {
            debug!("Cannot locate config file ({e}), using defaults");
            Ok(ControllerConfig::default())
        }
    }
}
