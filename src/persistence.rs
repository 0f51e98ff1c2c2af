//! Save and load the metering line and calibration as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::calibration::Calibration;
use crate::data::overlay::MeteringOverlay;
use crate::error::{MeterError, Result};

/// Serializable snapshot of a complete measurement line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSerde {
    pub start: [f64; 2],
    pub end: [f64; 2],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterStateSerde {
    pub line: Option<LineSerde>,
    pub calibration: Option<Calibration>,
}

impl MeterStateSerde {
    /// Capture the resolved line (if complete) and the active calibration.
    pub fn capture(overlay: &MeteringOverlay, calibration: Option<&Calibration>) -> Self {
        Self {
            line: overlay.segment().map(|s| {
                let resolved = s.resolve();
                LineSerde {
                    start: resolved.start,
                    end: resolved.end,
                }
            }),
            calibration: calibration.cloned(),
        }
    }

    /// Restore the saved line into `overlay`; an absent line clears it.
    pub fn apply_to(&self, overlay: &mut MeteringOverlay) {
        match &self.line {
            Some(l) => overlay.restore_line(l.start, l.end),
            None => overlay.clear(),
        }
    }
}

pub fn state_to_json(state: &MeterStateSerde) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

pub fn state_from_json(json: &str) -> Result<MeterStateSerde> {
    Ok(serde_json::from_str(json)?)
}

pub fn save_state_to_path(state: &MeterStateSerde, path: &Path) -> Result<()> {
    let txt = state_to_json(state)?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| MeterError::io(dir, e))?;
    }
    std::fs::write(path, txt).map_err(|e| MeterError::io(path, e))?;
    tracing::info!(?path, "saved metering state");
    Ok(())
}

pub fn load_state_from_path(path: &Path) -> Result<MeterStateSerde> {
    let txt = std::fs::read_to_string(path).map_err(|e| MeterError::io(path, e))?;
    state_from_json(&txt)
}
