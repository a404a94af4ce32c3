use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::Placement;
use crate::error::OverlayError;
use crate::geometry::TickLengths;
use crate::overlay::OverlayStyle;

/// Default geometry constants, all in canvas pixels unless noted.
pub mod defaults {
    /// Margin fraction applied to both canvas axes
    pub const REDUCTION: f64 = 0.05;
    pub const END_TICK_LENGTH: f64 = 10.0;
    pub const MAJOR_TICK_LENGTH: f64 = 10.0;
    pub const MINOR_TICK_LENGTH: f64 = 5.0;
    /// Label distance back along the bar from its first point
    pub const LABEL_LEAD: f64 = 10.0;
    /// Label distance from the bar towards the canvas interior
    pub const LABEL_GAP: f64 = 42.0;

    pub const CANVAS_WIDTH: u32 = 512;
    pub const CANVAS_HEIGHT: u32 = 512;
    /// Visible world extent of the demo viewport (mm)
    pub const WORLD_WIDTH: f64 = 300.0;
    pub const WORLD_HEIGHT: f64 = 300.0;
    pub const VIEWPORT_ID: &str = "CT_AXIAL";
}

fn default_reduction() -> f64 {
    defaults::REDUCTION
}
fn default_end_tick_length() -> f64 {
    defaults::END_TICK_LENGTH
}
fn default_major_tick_length() -> f64 {
    defaults::MAJOR_TICK_LENGTH
}
fn default_minor_tick_length() -> f64 {
    defaults::MINOR_TICK_LENGTH
}
fn default_label_lead() -> f64 {
    defaults::LABEL_LEAD
}
fn default_label_gap() -> f64 {
    defaults::LABEL_GAP
}

/// Scale overlay tool configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OverlayConfig {
    #[serde(default)]
    pub scale_location: Placement,
    #[serde(default = "default_reduction")]
    pub horizontal_reduction: f64,
    #[serde(default = "default_reduction")]
    pub vertical_reduction: f64,
    #[serde(default = "default_end_tick_length")]
    pub end_tick_length: f64,
    #[serde(default = "default_major_tick_length")]
    pub major_tick_length: f64,
    #[serde(default = "default_minor_tick_length")]
    pub minor_tick_length: f64,
    #[serde(default = "default_label_lead")]
    pub label_lead: f64,
    #[serde(default = "default_label_gap")]
    pub label_gap: f64,
    #[serde(default)]
    pub style: OverlayStyle,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            scale_location: Placement::default(),
            horizontal_reduction: default_reduction(),
            vertical_reduction: default_reduction(),
            end_tick_length: default_end_tick_length(),
            major_tick_length: default_major_tick_length(),
            minor_tick_length: default_minor_tick_length(),
            label_lead: default_label_lead(),
            label_gap: default_label_gap(),
            style: OverlayStyle::default(),
        }
    }
}

impl OverlayConfig {
    pub fn with_location(mut self, placement: Placement) -> Self {
        self.scale_location = placement;
        self
    }

    pub fn tick_lengths(&self) -> TickLengths {
        TickLengths {
            major: self.major_tick_length,
            minor: self.minor_tick_length,
        }
    }

    /// Reject margins outside (0, 0.5) and non-positive tick lengths
    pub fn validate(&self) -> Result<(), OverlayError> {
        for (name, value) in [
            ("horizontal_reduction", self.horizontal_reduction),
            ("vertical_reduction", self.vertical_reduction),
        ] {
            if !(value > 0.0 && value < 0.5) {
                return Err(OverlayError::InvalidConfig(format!(
                    "{name} must be in (0, 0.5), got {value}"
                )));
            }
        }

        for (name, value) in [
            ("end_tick_length", self.end_tick_length),
            ("major_tick_length", self.major_tick_length),
            ("minor_tick_length", self.minor_tick_length),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(OverlayError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !(self.label_lead.is_finite() && self.label_gap.is_finite()) {
            return Err(OverlayError::InvalidConfig(
                "label offsets must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings file for the `scaleoverlay` binary
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub canvas_width: Option<u32>,
    #[serde(default)]
    pub canvas_height: Option<u32>,
    #[serde(default)]
    pub world_width: Option<f64>,
    #[serde(default)]
    pub world_height: Option<f64>,
    #[serde(default)]
    pub viewport_id: Option<String>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub overlay: Option<OverlayConfig>,
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded config file");
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to parse config file");
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("scaleoverlay.toml"));
    paths.push(PathBuf::from(".scaleoverlay.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("scaleoverlay").join("config.toml"));
        paths.push(config_dir.join("scaleoverlay.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".scaleoverlay.toml"));
    }

    paths
}
