//! Main camera preview with the metering overlay painted on top.
//!
//! Canvas coordinates are pixels of the main frame, so the measurement stays
//! put when the window is resized. Screen positions are mapped into that
//! space before reaching the overlay.

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, TextureHandle, TextureOptions};

use crate::data::data::MeterData;
use crate::data::element::ElementId;

/// Maps between screen points and canvas (frame pixel) coordinates.
#[derive(Debug, Clone, Copy)]
pub struct CanvasTransform {
    pub rect: Rect,
    /// Screen points per canvas pixel.
    pub scale: f32,
}

impl CanvasTransform {
    /// Fit a `frame_size` canvas into `available`, centred, preserving aspect ratio.
    pub fn fit(available: Rect, frame_size: [usize; 2]) -> Self {
        let fw = frame_size[0].max(1) as f32;
        let fh = frame_size[1].max(1) as f32;
        let scale = (available.width() / fw).min(available.height() / fh).max(f32::EPSILON);
        let rect = Rect::from_center_size(available.center(), egui::vec2(fw * scale, fh * scale));
        Self { rect, scale }
    }

    pub fn to_canvas(&self, p: Pos2) -> [f64; 2] {
        [
            ((p.x - self.rect.min.x) / self.scale) as f64,
            ((p.y - self.rect.min.y) / self.scale) as f64,
        ]
    }

    pub fn to_screen(&self, c: [f64; 2]) -> Pos2 {
        Pos2::new(
            self.rect.min.x + c[0] as f32 * self.scale,
            self.rect.min.y + c[1] as f32 * self.scale,
        )
    }
}

#[derive(Default)]
pub struct PreviewCanvas {
    texture: Option<TextureHandle>,
    dragging: Option<ElementId>,
}

impl PreviewCanvas {
    pub fn show(&mut self, ui: &mut egui::Ui, data: &mut MeterData) {
        let Some(frame) = data.rig.main_frame() else {
            ui.centered_and_justified(|ui| ui.label("Waiting for camera…"));
            return;
        };
        let frame_size = frame.size;
        match &mut self.texture {
            Some(tex) => tex.set(frame.clone(), TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ui.ctx().load_texture("main_camera", frame.clone(), TextureOptions::LINEAR));
            }
        }

        let (area, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let xf = CanvasTransform::fit(area, frame_size);
        let painter = ui.painter_at(area);
        if let Some(tex) = &self.texture {
            painter.image(
                tex.id(),
                xf.rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        self.handle_pointer(ui, &response, &xf, data);
        self.paint_overlay(&painter, &xf, data);

        if data.overlay.take_redraw_request() {
            ui.ctx().request_repaint();
        }
    }

    fn handle_pointer(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        xf: &CanvasTransform,
        data: &mut MeterData,
    ) {
        let (pressed_at, primary_down) = ui.input(|i| {
            let pressed = if i.pointer.primary_pressed() {
                i.pointer.press_origin()
            } else {
                None
            };
            (pressed, i.pointer.primary_down())
        });

        if let Some(p) = pressed_at.filter(|p| response.rect.contains(*p)) {
            let pos = xf.to_canvas(p);
            let hit = data.overlay.hit_test(pos);
            let change = data.overlay.pointer_down(pos, hit);
            data.publish_changes(change);
            self.dragging = hit;
        }

        if let Some(id) = self.dragging {
            if response.dragged() {
                let d = response.drag_delta() / xf.scale;
                let change = data.overlay.drag_by(id, [d.x as f64, d.y as f64]);
                data.publish_changes(change);
            }
            if !primary_down {
                self.dragging = None;
            }
        } else {
            let hover = response.hover_pos().map(|p| xf.to_canvas(p));
            let changes = data.overlay.update_hover(hover);
            data.publish_changes(changes);
        }
    }

    fn paint_overlay(&self, painter: &egui::Painter, xf: &CanvasTransform, data: &MeterData) {
        let overlay = &data.overlay;
        if let Some(seg) = overlay.segment() {
            let line = seg.resolve();
            let (a, b) = (xf.to_screen(line.start), xf.to_screen(line.end));
            painter.line_segment([a, b], Stroke::new(seg.stroke_width as f32 * xf.scale, seg.stroke));
            if let Some(txt) = data.length_text() {
                painter.text(
                    a.lerp(b, 0.5) - egui::vec2(0.0, 8.0),
                    Align2::CENTER_BOTTOM,
                    txt,
                    FontId::proportional(14.0),
                    Color32::LIGHT_GREEN,
                );
            }
        }
        for m in overlay.markers() {
            let center = xf.to_screen(m.center);
            let radius = m.radius as f32 * xf.scale;
            if let Some(fill) = m.fill {
                painter.circle_filled(center, radius, fill);
            }
            painter.circle_stroke(center, radius, Stroke::new(m.stroke_width as f32 * xf.scale, m.stroke));
        }
    }
}
