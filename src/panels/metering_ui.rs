use egui::Color32;
use egui_phosphor::regular::{BROOM, FLOPPY_DISK, FOLDER_OPEN, RULER};

use super::panel_trait::{Panel, PanelState};
use crate::data::calibration::Calibration;
use crate::data::data::MeterData;
use crate::data::element::PointRole;
use crate::data::overlay::OverlayState;

/// Sidebar showing the measurement and the calibration controls.
pub struct MeteringPanel {
    state: PanelState,
    reference_length: f64,
    unit: String,
    last_error: Option<String>,
}

impl Default for MeteringPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new(true),
            reference_length: 10.0,
            unit: "mm".to_string(),
            last_error: None,
        }
    }
}

impl MeteringPanel {
    /// Smallest reference length the calibration field accepts.
    pub const MIN_REFERENCE_LENGTH: f64 = 0.001;

    pub const HINT: &'static str =
        "Click the preview to place P1 and P2. Drag a point or the line to adjust; click empty space again to reset.";

    fn state_label(state: OverlayState) -> &'static str {
        match state {
            OverlayState::Empty => "No points",
            OverlayState::OnePoint => "P1 placed",
            OverlayState::Complete => "Line complete",
        }
    }
}

impl Panel for MeteringPanel {
    fn title(&self) -> &'static str {
        "Metering"
    }

    fn icon_only(&self) -> Option<&'static str> {
        Some(RULER)
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut egui::Ui, data: &mut MeterData) {
        ui.label(Self::HINT);
        ui.add_space(6.0);
        ui.label(Self::state_label(data.overlay.state()));

        for role in [PointRole::First, PointRole::Second] {
            match data.overlay.marker(role) {
                Some(m) => ui.colored_label(
                    Color32::YELLOW,
                    format!("{}: x={:.1}  y={:.1}", role.label(), m.center[0], m.center[1]),
                ),
                None => ui.label(format!("{}: –", role.label())),
            };
        }
        if let Some(txt) = data.length_text() {
            ui.colored_label(Color32::LIGHT_GREEN, format!("Length: {txt}"));
        }

        if ui.button(format!("{BROOM} Clear line")).clicked() {
            data.clear_overlay();
        }

        ui.separator();
        ui.label("Calibration");
        ui.horizontal(|ui| {
            ui.label("Line spans");
            ui.add(
                egui::DragValue::new(&mut self.reference_length)
                    .speed(0.1)
                    .range(Self::MIN_REFERENCE_LENGTH..=f64::MAX),
            );
            ui.add(egui::TextEdit::singleline(&mut self.unit).desired_width(40.0));
        });

        let length = data.overlay.length();
        ui.horizontal(|ui| {
            let calibrate = ui.add_enabled(length.is_some(), egui::Button::new("Calibrate"));
            if calibrate.clicked() {
                if let Some(px) = length {
                    match Calibration::from_reference(px, self.reference_length, &self.unit) {
                        Ok(cal) => {
                            data.set_calibration(cal);
                            self.last_error = None;
                        }
                        Err(e) => {
                            tracing::warn!("calibration rejected: {e}");
                            self.last_error = Some(e.to_string());
                        }
                    }
                }
            }
            if ui
                .add_enabled(data.calibration.is_some(), egui::Button::new("Reset"))
                .clicked()
            {
                data.calibration = None;
            }
        });
        if let Some(cal) = &data.calibration {
            ui.label(format!("{:.3} px per {}", cal.pixels_per_unit, cal.unit));
        }
        if let Some(err) = &self.last_error {
            ui.colored_label(Color32::LIGHT_RED, err);
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button(format!("{FLOPPY_DISK} Save")).clicked() {
                data.pending_requests.save_state = true;
            }
            if ui.button(format!("{FOLDER_OPEN} Load")).clicked() {
                data.pending_requests.load_state = true;
            }
        });
    }
}
