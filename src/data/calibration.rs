//! Pixel-to-real-world scale derived from a measured reference distance.

use serde::{Deserialize, Serialize};

use crate::error::{MeterError, Result};

/// Deserialization goes through [`Calibration::new`], so a saved state can
/// never carry a zero, negative or non-finite scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCalibration")]
pub struct Calibration {
    pub pixels_per_unit: f64,
    pub unit: String,
}

#[derive(Deserialize)]
struct RawCalibration {
    pixels_per_unit: f64,
    #[serde(default)]
    unit: String,
}

impl TryFrom<RawCalibration> for Calibration {
    type Error = MeterError;

    fn try_from(raw: RawCalibration) -> Result<Self> {
        Calibration::new(raw.pixels_per_unit, &raw.unit)
    }
}

fn normalize_unit(unit: &str) -> String {
    let unit = unit.trim();
    if unit.is_empty() {
        "mm".to_string()
    } else {
        unit.to_string()
    }
}

impl Calibration {
    /// Calibrate from a line of `pixel_length` canvas pixels that is known to
    /// span `real_length` units.
    pub fn from_reference(pixel_length: f64, real_length: f64, unit: &str) -> Result<Self> {
        if !pixel_length.is_finite() || pixel_length <= 0.0 {
            return Err(MeterError::InvalidCalibration(format!(
                "pixel length must be positive, got {pixel_length}"
            )));
        }
        if !real_length.is_finite() || real_length <= 0.0 {
            return Err(MeterError::InvalidCalibration(format!(
                "reference length must be positive, got {real_length}"
            )));
        }
        Self::new(pixel_length / real_length, unit)
    }

    /// Calibration with a known scale. Rejects zero, negative and non-finite values.
    pub fn new(pixels_per_unit: f64, unit: &str) -> Result<Self> {
        if !pixels_per_unit.is_finite() || pixels_per_unit <= 0.0 {
            return Err(MeterError::InvalidCalibration(format!(
                "pixels per unit must be positive, got {pixels_per_unit}"
            )));
        }
        Ok(Self {
            pixels_per_unit,
            unit: normalize_unit(unit),
        })
    }

    pub fn to_real(&self, pixels: f64) -> f64 {
        pixels / self.pixels_per_unit
    }

    /// Human-readable length, e.g. `"12.500 mm"`.
    pub fn format(&self, pixels: f64) -> String {
        format!("{:.3} {}", self.to_real(pixels), self.unit)
    }
}
