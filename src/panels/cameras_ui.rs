use std::collections::HashMap;

use egui::{TextureHandle, TextureOptions};
use egui_phosphor::regular::VIDEO_CAMERA;

use super::panel_trait::{Panel, PanelState};
use crate::data::camera::downscale;
use crate::data::data::MeterData;
use crate::events::{CameraMeta, EventKind, MeterEvent};

const THUMBNAIL_WIDTH: f32 = 200.0;

/// Thumbnail strip of every camera; clicking one makes it the main preview.
pub struct CamerasPanel {
    state: PanelState,
    textures: HashMap<String, TextureHandle>,
}

impl Default for CamerasPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new(true),
            textures: HashMap::new(),
        }
    }
}

impl Panel for CamerasPanel {
    fn title(&self) -> &'static str {
        "Cameras"
    }

    fn icon_only(&self) -> Option<&'static str> {
        Some(VIDEO_CAMERA)
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut egui::Ui, data: &mut MeterData) {
        let main_id = data.rig.main_device().id.clone();
        let mut selected: Option<String> = None;

        for (device, frame) in data.rig.thumbnails() {
            let is_main = device.id == main_id;
            ui.label(if is_main {
                format!("{} (main)", device.label)
            } else {
                device.label.clone()
            });
            let Some(frame) = frame else {
                ui.label("waiting for frames…");
                continue;
            };
            let thumb = downscale(frame, THUMBNAIL_WIDTH as usize);
            let tex = match self.textures.get_mut(&device.id) {
                Some(tex) => {
                    tex.set(thumb, TextureOptions::LINEAR);
                    tex.clone()
                }
                None => {
                    let tex = ui.ctx().load_texture(
                        format!("thumb_{}", device.id),
                        thumb,
                        TextureOptions::LINEAR,
                    );
                    self.textures.insert(device.id.clone(), tex.clone());
                    tex
                }
            };
            let [w, h] = frame.size;
            let size = egui::vec2(THUMBNAIL_WIDTH, THUMBNAIL_WIDTH * h as f32 / w.max(1) as f32);
            let response = ui.add(
                egui::Image::new((tex.id(), size)).sense(egui::Sense::click()),
            );
            if response.on_hover_text("Show as main camera").clicked() && !is_main {
                selected = Some(device.id.clone());
            }
        }

        if let Some(id) = selected {
            match data.rig.select_main(&id) {
                Ok(()) => {
                    let mut evt = MeterEvent::new(EventKind::CAMERA_SELECTED);
                    evt.camera = Some(CameraMeta { device_id: id });
                    data.events.emit(evt);
                }
                Err(e) => tracing::error!("failed to select camera: {e}"),
            }
        }
    }
}
