use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::annotate::MarkerStyle;
use crate::consts::{
    DEFAULT_BAR_HEIGHT, DEFAULT_FRAME_DELAY_MS, DEFAULT_KERNEL_SIZE, DEFAULT_MARKER_COLOR,
    DEFAULT_MARKER_THICKNESS, DEFAULT_PAUSE_TIMEOUT_MS,
};
use crate::error::{BlobTrackError, Result};

/// Playback and rendering settings. Loaded from TOML; every field is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Input wait between frames while playing.
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,
    /// How long a pause lasts before playback resumes by itself.
    #[serde(default = "default_pause_timeout_ms")]
    pub pause_timeout_ms: u64,
    /// Side of the square structuring element. Must be odd.
    #[serde(default = "default_kernel_size")]
    pub kernel_size: usize,
    #[serde(default = "default_marker_color")]
    pub marker_color: [u8; 3],
    #[serde(default = "default_marker_thickness")]
    pub marker_thickness: u32,
    #[serde(default = "default_bar_height")]
    pub bar_height: u32,
}

fn default_frame_delay_ms() -> u64 {
    DEFAULT_FRAME_DELAY_MS
}
fn default_pause_timeout_ms() -> u64 {
    DEFAULT_PAUSE_TIMEOUT_MS
}
fn default_kernel_size() -> usize {
    DEFAULT_KERNEL_SIZE
}
fn default_marker_color() -> [u8; 3] {
    DEFAULT_MARKER_COLOR
}
fn default_marker_thickness() -> u32 {
    DEFAULT_MARKER_THICKNESS
}
fn default_bar_height() -> u32 {
    DEFAULT_BAR_HEIGHT
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
            pause_timeout_ms: DEFAULT_PAUSE_TIMEOUT_MS,
            kernel_size: DEFAULT_KERNEL_SIZE,
            marker_color: DEFAULT_MARKER_COLOR,
            marker_thickness: DEFAULT_MARKER_THICKNESS,
            bar_height: DEFAULT_BAR_HEIGHT,
        }
    }
}

impl PlaybackConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(BlobTrackError::InvalidConfig(format!(
                "kernel_size must be odd and positive, got {}",
                self.kernel_size
            )));
        }
        if self.marker_thickness == 0 {
            return Err(BlobTrackError::InvalidConfig(
                "marker_thickness must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn pause_timeout(&self) -> Duration {
        Duration::from_millis(self.pause_timeout_ms)
    }

    pub fn marker_style(&self) -> MarkerStyle {
        MarkerStyle {
            color: self.marker_color,
            thickness: self.marker_thickness,
            bar_height: self.bar_height,
        }
    }
}
