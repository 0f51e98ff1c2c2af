//! Viewer configuration, loaded from `~/.cammeter/config.yaml`.

use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::data::element::OverlayStyle;
use crate::data::hotkeys::Hotkeys;
use crate::error::{MeterError, Result};

/// Serializable RGBA color (egui's `Color32` has no serde impls here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl From<Color32> for Rgba {
    fn from(c: Color32) -> Self {
        Rgba(c.to_srgba_unmultiplied())
    }
}

impl From<Rgba> for Color32 {
    fn from(c: Rgba) -> Self {
        let [r, g, b, a] = c.0;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

/// Overlay appearance as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub marker_radius: f64,
    pub stroke_width: f64,
    pub marker_stroke: Rgba,
    pub line_stroke: Rgba,
    pub highlight: Rgba,
    pub default_stroke: Rgba,
    pub pick_tolerance: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayStyle::default().into()
    }
}

impl From<OverlayStyle> for OverlayConfig {
    fn from(s: OverlayStyle) -> Self {
        Self {
            marker_radius: s.marker_radius,
            stroke_width: s.stroke_width,
            marker_stroke: s.marker_stroke.into(),
            line_stroke: s.line_stroke.into(),
            highlight: s.highlight.into(),
            default_stroke: s.default_stroke.into(),
            pick_tolerance: s.pick_tolerance,
        }
    }
}

impl OverlayConfig {
    pub fn style(&self) -> OverlayStyle {
        OverlayStyle {
            marker_radius: self.marker_radius,
            stroke_width: self.stroke_width,
            marker_stroke: self.marker_stroke.into(),
            line_stroke: self.line_stroke.into(),
            highlight: self.highlight.into(),
            default_stroke: self.default_stroke.into(),
            pick_tolerance: self.pick_tolerance,
        }
    }
}

/// Settings for the built-in test-pattern cameras.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub pattern_devices: usize,
    pub width: usize,
    pub height: usize,
    /// Default file name offered when saving a snapshot. Empty means a timestamped name.
    pub snapshot_file_name: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            pattern_devices: 2,
            width: 1280,
            height: 720,
            snapshot_file_name: "CanvasAsImage.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    pub title: String,
    pub overlay: OverlayConfig,
    pub stream: StreamConfig,
    pub hotkeys: Hotkeys,
    /// Where the metering line and calibration are kept between runs.
    pub state_path: Option<PathBuf>,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            title: "CamMeter".to_string(),
            overlay: OverlayConfig::default(),
            stream: StreamConfig::default(),
            hotkeys: Hotkeys::default(),
            state_path: None,
        }
    }
}

impl MeterConfig {
    /// `~/.cammeter`
    pub fn default_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME").map_err(|_| MeterError::NoHomeDir)?;
        Ok(PathBuf::from(home).join(".cammeter"))
    }

    pub fn from_yaml(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| MeterError::io(path, e))?;
        Self::from_yaml(&s)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| MeterError::io(dir, e))?;
        }
        std::fs::write(path, self.to_yaml()?).map_err(|e| MeterError::io(path, e))
    }

    /// Load `~/.cammeter/config.yaml`, falling back to defaults when it does not exist.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_dir()?.join("config.yaml");
        if !path.exists() {
            tracing::debug!(?path, "no config file, using defaults");
            return Ok(Self::default());
        }
        tracing::info!(?path, "loading config");
        Self::load_from_path(&path)
    }

    /// State file path: the configured one, or `~/.cammeter/state.json`.
    pub fn resolved_state_path(&self) -> Result<PathBuf> {
        match &self.state_path {
            Some(p) => Ok(p.clone()),
            None => Ok(Self::default_dir()?.join("state.json")),
        }
    }
}
