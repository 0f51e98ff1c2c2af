//! Top-level entry point for running the viewer as a native window.

use eframe::egui;

use crate::config::MeterConfig;
use crate::controllers::StreamController;
use crate::data::camera::{CameraRig, DeviceProvider};
use crate::events::EventController;

use super::MeterApp;

/// Open every camera from `provider` and run the viewer until the window closes.
///
/// Camera setup failures are logged and end the run with an error before any
/// window is shown.
pub fn run_cammeter(
    provider: &dyn DeviceProvider,
    cfg: MeterConfig,
    stream_ctrl: Option<StreamController>,
    events: Option<EventController>,
) -> eframe::Result<()> {
    let rig = CameraRig::open_all(provider).map_err(|e| {
        tracing::error!("camera setup failed: {e}");
        eframe::Error::AppCreation(Box::new(e))
    })?;

    let mut app = MeterApp::new(rig, &cfg);
    app.set_stream_controller(stream_ctrl);
    if let Some(events) = events {
        app.set_event_controller(events);
    }
    app.load_state();

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1400.0, 900.0)),
        ..Default::default()
    };

    eframe::run_native(
        &cfg.title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
