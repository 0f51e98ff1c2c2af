//! Application wiring for the camera viewer.
//!
//! | Sub-module  | Responsibility |
//! | ----------- | -------------- |
//! | [`update`]  | Per-frame polling, hotkeys, top bar, sidebar and preview rendering |
//! | [`actions`] | Snapshot saving, state save/load, and applying controller requests |
//! | [`run`]     | Top-level [`run_cammeter()`] entry point |

mod actions;
mod run;
mod update;

pub use run::run_cammeter;

use crate::config::MeterConfig;
use crate::controllers::StreamController;
use crate::data::camera::CameraRig;
use crate::data::data::MeterData;
use crate::data::hotkeys::Hotkeys;
use crate::data::overlay::MeteringOverlay;
use crate::events::EventController;
use crate::panels::panel_trait::Panel;
use crate::panels::{CamerasPanel, MeteringPanel, PreviewCanvas};

/// Standalone viewer implementing [`eframe::App`].
pub struct MeterApp {
    pub data: MeterData,
    pub hotkeys: Hotkeys,
    /// Panels docked to the right of the preview.
    pub right_side_panels: Vec<Box<dyn Panel>>,
    preview: PreviewCanvas,
    snapshot_file_name: String,
    stream_ctrl: Option<StreamController>,
}

impl MeterApp {
    pub fn new(rig: CameraRig, cfg: &MeterConfig) -> Self {
        let mut data = MeterData::new(rig, MeteringOverlay::new(cfg.overlay.style()));
        data.state_path = cfg.resolved_state_path().ok();
        Self {
            data,
            hotkeys: cfg.hotkeys.clone(),
            right_side_panels: vec![
                Box::new(CamerasPanel::default()),
                Box::new(MeteringPanel::default()),
            ],
            preview: PreviewCanvas::default(),
            snapshot_file_name: cfg.stream.snapshot_file_name.clone(),
            stream_ctrl: None,
        }
    }

    /// Attach a controller for programmatic pause/snapshot requests.
    pub fn set_stream_controller(&mut self, ctrl: Option<StreamController>) {
        self.stream_ctrl = ctrl;
    }

    /// Share the app's event controller with outside subscribers.
    pub fn set_event_controller(&mut self, events: EventController) {
        self.data.events = events;
    }
}
