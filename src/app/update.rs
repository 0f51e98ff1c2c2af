use std::time::Duration;

use eframe::egui;
use egui_phosphor::regular::{BROOM, CAMERA, PAUSE, PLAY};

use crate::data::hotkeys::{detect_hotkey_actions, format_button_tooltip, HotkeyName};

use super::MeterApp;

/// Repaint interval for the camera streams.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

impl MeterApp {
    fn handle_hotkeys(&mut self, ctx: &egui::Context) {
        for action in detect_hotkey_actions(&self.hotkeys, ctx) {
            match action {
                HotkeyName::Pause => self.data.toggle_pause(),
                HotkeyName::SavePng => self.data.pending_requests.save_snapshot = true,
                HotkeyName::ClearOverlay => self.data.clear_overlay(),
            }
        }
    }

    fn render_menu(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (label, tip) = if self.data.rig.is_paused() {
                (format!("{PLAY} Resume"), "Resume")
            } else {
                (format!("{PAUSE} Pause"), "Pause")
            };
            if ui
                .button(label)
                .on_hover_text(format_button_tooltip(tip, &self.hotkeys.pause))
                .clicked()
            {
                self.data.toggle_pause();
            }
            if ui
                .button(format!("{CAMERA} Save"))
                .on_hover_text(format_button_tooltip("Save snapshot as PNG", &self.hotkeys.save_png))
                .clicked()
            {
                self.data.pending_requests.save_snapshot = true;
            }
            if ui
                .button(format!("{BROOM} Clear"))
                .on_hover_text(format_button_tooltip("Clear metering line", &self.hotkeys.clear_overlay))
                .clicked()
            {
                self.data.clear_overlay();
            }

            ui.separator();
            for panel in self.right_side_panels.iter_mut() {
                let mut visible = panel.state().visible;
                if ui.toggle_value(&mut visible, panel.title_and_icon()).changed() {
                    panel.state_mut().visible = visible;
                }
            }

            ui.separator();
            ui.label(&self.data.rig.main_device().label);
        });
    }
}

impl eframe::App for MeterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_controllers();
        self.handle_hotkeys(ctx);
        self.data.rig.poll();

        egui::TopBottomPanel::top("cammeter_menu").show(ctx, |ui| {
            self.render_menu(ui);
        });

        if self.right_side_panels.iter().any(|p| p.state().visible) {
            egui::SidePanel::right("cammeter_right_sidebar")
                .resizable(true)
                .default_width(240.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        for panel in self.right_side_panels.iter_mut() {
                            if !panel.state().visible {
                                continue;
                            }
                            ui.heading(panel.title_and_icon());
                            panel.render_panel(ui, &mut self.data);
                            ui.separator();
                        }
                    });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.preview.show(ui, &mut self.data);
        });

        self.apply_pending_requests();

        // Thumbnails keep streaming while the main preview is paused.
        ctx.request_repaint_after(FRAME_INTERVAL);
    }
}
