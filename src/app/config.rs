//! Application configuration.

use std::path::Path;
use std::time::Duration;

use crate::foundation::core::{Color, Size};
use crate::foundation::error::{TableauError, TableauResult};
use crate::network::transport::Timeouts;

/// Timeouts applied by the HTTP transport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Seconds allowed to establish a connection.
    pub connect_timeout_secs: f64,
    /// Seconds allowed for the whole response.
    pub read_timeout_secs: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30.0,
            read_timeout_secs: 60.0,
        }
    }
}

impl NetworkConfig {
    /// Limits handed to the HTTP transport.
    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: Duration::from_secs_f64(self.connect_timeout_secs),
            read: Duration::from_secs_f64(self.read_timeout_secs),
        }
    }
}

/// Window, frame loop and network settings.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window title.
    pub title: String,
    /// Client width in pixels.
    pub width: u32,
    /// Client height in pixels.
    pub height: u32,
    /// Frame rate cap for [`crate::Application::run`]; `None` runs unthrottled.
    pub frame_rate: Option<f64>,
    /// Color the renderer clears to each frame.
    pub clear_color: Color,
    /// Outline every visible node.
    pub debug_borders: bool,
    /// HTTP settings.
    pub network: NetworkConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "tableau".to_owned(),
            width: 640,
            height: 480,
            frame_rate: Some(60.0),
            clear_color: Color::BLACK,
            debug_borders: false,
            network: NetworkConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> TableauResult<Self> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| TableauError::serde(format!("config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> TableauResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            TableauError::validation(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> TableauResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TableauError::validation("window width/height must be > 0"));
        }
        if let Some(rate) = self.frame_rate
            && !(rate.is_finite() && rate > 0.0)
        {
            return Err(TableauError::validation(format!(
                "frame_rate must be finite and > 0, got {rate}"
            )));
        }
        let NetworkConfig {
            connect_timeout_secs,
            read_timeout_secs,
        } = self.network;
        for (name, secs) in [
            ("connect_timeout_secs", connect_timeout_secs),
            ("read_timeout_secs", read_timeout_secs),
        ] {
            if !(secs.is_finite() && secs > 0.0) {
                return Err(TableauError::validation(format!(
                    "network.{name} must be finite and > 0, got {secs}"
                )));
            }
        }
        Ok(())
    }

    /// Window size as a [`Size`].
    pub fn window_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Target time per frame, if capped.
    pub fn frame_interval(&self) -> Option<Duration> {
        self.frame_rate.map(|rate| Duration::from_secs_f64(1.0 / rate))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/config.rs"]
mod tests;
