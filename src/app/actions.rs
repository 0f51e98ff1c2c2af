//! Side effects requested by panels, hotkeys and controllers.

use std::path::{Path, PathBuf};

use crate::data::camera::save_png;
use crate::events::{EventKind, ExportMeta, MeterEvent};
use crate::persistence::{load_state_from_path, save_state_to_path, MeterStateSerde};

use super::MeterApp;

impl MeterApp {
    /// Apply queued controller requests once per frame.
    pub(super) fn apply_controllers(&mut self) {
        let Some(ctrl) = &self.stream_ctrl else {
            return;
        };
        let req = ctrl.take_requests();
        if let Some(paused) = req.pause {
            self.data.set_paused(paused);
        }
        if let Some(id) = req.select {
            if let Err(e) = self.data.rig.select_main(&id) {
                tracing::error!("controller camera selection failed: {e}");
            }
        }
        if req.clear_overlay {
            self.data.clear_overlay();
        }
        if req.snapshot {
            self.data.pending_requests.save_snapshot = true;
        }
        if let Some(path) = req.snapshot_to {
            self.save_snapshot_to(&path);
        }
    }

    /// Handle requests raised by panels during this frame.
    pub(super) fn apply_pending_requests(&mut self) {
        let req = std::mem::take(&mut self.data.pending_requests);
        if req.save_snapshot {
            if let Some(path) = self.prompt_snapshot_path() {
                self.save_snapshot_to(&path);
            }
        }
        if req.save_state {
            self.save_state();
        }
        if req.load_state {
            self.load_state();
        }
    }

    fn prompt_snapshot_path(&self) -> Option<PathBuf> {
        let default_name = if self.snapshot_file_name.is_empty() {
            format!("snapshot_{}.png", chrono::Local::now().format("%Y%m%d_%H%M%S"))
        } else {
            self.snapshot_file_name.clone()
        };
        rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("PNG", &["png"])
            .save_file()
    }

    pub(super) fn save_snapshot_to(&mut self, path: &Path) {
        let Some(frame) = self.data.rig.snapshot() else {
            tracing::warn!("no frame available for snapshot");
            return;
        };
        match save_png(&frame, path) {
            Ok(()) => {
                let mut evt = MeterEvent::new(EventKind::SCREENSHOT);
                evt.export = Some(ExportMeta {
                    path: path.display().to_string(),
                });
                self.data.events.emit(evt);
            }
            Err(e) => tracing::error!("failed to save snapshot: {e}"),
        }
    }

    fn save_state(&self) {
        let Some(path) = &self.data.state_path else {
            tracing::warn!("no state path configured");
            return;
        };
        let state = MeterStateSerde::capture(&self.data.overlay, self.data.calibration.as_ref());
        if let Err(e) = save_state_to_path(&state, path) {
            tracing::error!("failed to save metering state: {e}");
        }
    }

    pub(super) fn load_state(&mut self) {
        let Some(path) = self.data.state_path.clone() else {
            return;
        };
        if !path.exists() {
            tracing::debug!(?path, "no saved metering state");
            return;
        }
        match load_state_from_path(&path) {
            Ok(state) => {
                state.apply_to(&mut self.data.overlay);
                self.data.calibration = state.calibration;
                tracing::info!(?path, "loaded metering state");
            }
            Err(e) => tracing::error!("failed to load metering state: {e}"),
        }
    }
}
