use std::path::PathBuf;

use crate::data::calibration::Calibration;
use crate::data::camera::CameraRig;
use crate::data::overlay::{MeteringOverlay, OverlayChange};
use crate::events::{CalibrationMeta, EventController, EventKind, MeterEvent};

/// Actions a panel asks the app to perform after the frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeterRequests {
    pub save_snapshot: bool,
    pub save_state: bool,
    pub load_state: bool,
}

/// Everything the panels read and mutate during one frame.
pub struct MeterData {
    pub rig: CameraRig,
    pub overlay: MeteringOverlay,
    pub calibration: Option<Calibration>,
    pub events: EventController,
    pub pending_requests: MeterRequests,
    pub state_path: Option<PathBuf>,
}

impl MeterData {
    pub fn new(rig: CameraRig, overlay: MeteringOverlay) -> Self {
        Self {
            rig,
            overlay,
            calibration: None,
            events: EventController::new(),
            pending_requests: MeterRequests::default(),
            state_path: None,
        }
    }

    /// Forward overlay changes to event subscribers.
    pub fn publish_changes(&self, changes: impl IntoIterator<Item = OverlayChange>) {
        for change in changes {
            self.events.emit(MeterEvent::from(&change));
        }
    }

    pub fn clear_overlay(&mut self) {
        self.overlay.clear();
        self.publish_changes([OverlayChange::Cleared]);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.rig.is_paused() == paused {
            return;
        }
        self.rig.set_paused(paused);
        let kind = if paused {
            EventKind::PAUSE
        } else {
            EventKind::RESUME
        };
        self.events.emit(MeterEvent::new(kind));
    }

    pub fn toggle_pause(&mut self) {
        let paused = !self.rig.is_paused();
        self.set_paused(paused);
    }

    pub fn set_calibration(&mut self, calibration: Calibration) {
        tracing::info!(
            pixels_per_unit = calibration.pixels_per_unit,
            unit = %calibration.unit,
            "calibration applied"
        );
        let mut evt = MeterEvent::new(EventKind::CALIBRATED);
        evt.calibration = Some(CalibrationMeta {
            pixels_per_unit: calibration.pixels_per_unit,
            unit: calibration.unit.clone(),
        });
        self.calibration = Some(calibration);
        self.events.emit(evt);
    }

    /// Measured length formatted in real units when calibrated, pixels otherwise.
    pub fn length_text(&self) -> Option<String> {
        let px = self.overlay.length()?;
        Some(match &self.calibration {
            Some(cal) => format!("{} ({:.1} px)", cal.format(px), px),
            None => format!("{:.1} px", px),
        })
    }
}
