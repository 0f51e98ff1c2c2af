//! Shapes placed on the metering overlay: endpoint markers and the segment
//! joining them.

use egui::Color32;

use super::geometry::{
    distance, distance_to_segment, effective_scale, resolve_line_endpoints, LinePoints, LineTransform,
    ResolvedLine,
};

/// Which endpoint of the measurement a marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointRole {
    First,
    Second,
}

impl PointRole {
    pub fn label(&self) -> &'static str {
        match self {
            PointRole::First => "P1",
            PointRole::Second => "P2",
        }
    }
}

/// Address of an element on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Point(PointRole),
    Line,
}

/// Visual settings for newly created overlay elements.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub marker_radius: f64,
    pub stroke_width: f64,
    /// Stroke of a freshly placed marker.
    pub marker_stroke: Color32,
    /// Stroke of a freshly built line.
    pub line_stroke: Color32,
    /// Stroke applied while the pointer hovers an element.
    pub highlight: Color32,
    /// Stroke restored when the pointer leaves an element.
    pub default_stroke: Color32,
    /// Extra slack, in canvas pixels, when picking the thin line.
    pub pick_tolerance: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            marker_radius: 6.0,
            stroke_width: 2.0,
            marker_stroke: Color32::RED,
            line_stroke: Color32::from_rgb(0xff, 0xff, 0x00),
            highlight: Color32::RED,
            default_stroke: Color32::from_rgb(0xff, 0xff, 0x00),
            pick_tolerance: 3.0,
        }
    }
}

/// Minimal capability set shared by everything drawn on the overlay.
pub trait OverlayShape {
    fn position(&self) -> [f64; 2];
    fn set_position(&mut self, pos: [f64; 2]);
    fn stroke(&self) -> Color32;
    fn set_stroke(&mut self, color: Color32);
    /// `true` if `pos` lies on the visible shape, widened by `tolerance`.
    fn hit_test(&self, pos: [f64; 2], tolerance: f64) -> bool;
}

/// Draggable circular handle at one end of the measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub center: [f64; 2],
    pub role: PointRole,
    pub radius: f64,
    pub stroke: Color32,
    pub stroke_width: f64,
    /// `None` draws an outline only.
    pub fill: Option<Color32>,
}

impl Marker {
    pub fn new(center: [f64; 2], role: PointRole, style: &OverlayStyle) -> Self {
        Self {
            center,
            role,
            radius: style.marker_radius,
            stroke: style.marker_stroke,
            stroke_width: style.stroke_width,
            fill: None,
        }
    }
}

impl OverlayShape for Marker {
    fn position(&self) -> [f64; 2] {
        self.center
    }

    fn set_position(&mut self, pos: [f64; 2]) {
        self.center = pos;
    }

    fn stroke(&self) -> Color32 {
        self.stroke
    }

    fn set_stroke(&mut self, color: Color32) {
        self.stroke = color;
    }

    fn hit_test(&self, pos: [f64; 2], tolerance: f64) -> bool {
        distance(pos, self.center) <= self.radius + self.stroke_width * 0.5 + tolerance
    }
}

/// Line drawn between the two markers.
///
/// The stored endpoints only change through [`Segment::set_start`],
/// [`Segment::set_end`] and [`Segment::set_endpoints`], each of which
/// recentres the segment. Dragging the segment moves its center alone, so the
/// stored endpoints go stale until [`Segment::resolve`] is applied back.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    points: LinePoints,
    transform: LineTransform,
    pub stroke: Color32,
    pub stroke_width: f64,
    /// Role of the marker sitting on the start endpoint.
    pub begin: PointRole,
    /// Role of the marker sitting on the end endpoint.
    pub end: PointRole,
}

impl Segment {
    pub fn new(start: [f64; 2], end: [f64; 2], style: &OverlayStyle) -> Self {
        let points = LinePoints::new(start, end);
        Self {
            points,
            transform: LineTransform {
                offset: points.center(),
                ..LineTransform::default()
            },
            stroke: style.line_stroke,
            stroke_width: style.stroke_width,
            begin: PointRole::First,
            end: PointRole::Second,
        }
    }

    /// Stored endpoint fields, which may lag behind a whole-line drag.
    pub fn points(&self) -> LinePoints {
        self.points
    }

    pub fn transform(&self) -> LineTransform {
        self.transform
    }

    pub fn set_start(&mut self, pos: [f64; 2]) {
        self.set_endpoints(pos, self.points.end());
    }

    pub fn set_end(&mut self, pos: [f64; 2]) {
        self.set_endpoints(self.points.start(), pos);
    }

    pub fn set_endpoints(&mut self, start: [f64; 2], end: [f64; 2]) {
        self.points = LinePoints::new(start, end);
        self.transform.offset = self.points.center();
    }

    pub fn set_scale(&mut self, scale_x: f64, scale_y: f64) {
        self.transform.scale_x = scale_x;
        self.transform.scale_y = scale_y;
    }

    pub fn set_flip(&mut self, flip_x: bool, flip_y: bool) {
        self.transform.flip_x = flip_x;
        self.transform.flip_y = flip_y;
    }

    /// Store the resolved endpoints and reset scale and flips, so the
    /// segment resolves to the same line with an identity transform.
    pub fn bake_transform(&mut self) -> ResolvedLine {
        let t = self.transform;
        let identity = effective_scale(t.scale_x) == 1.0
            && effective_scale(t.scale_y) == 1.0
            && !t.flip_x
            && !t.flip_y;
        if identity && t.offset == self.points.center() {
            let (start, end) = (self.points.start(), self.points.end());
            return ResolvedLine {
                start,
                end,
                length: distance(start, end),
            };
        }
        let resolved = self.resolve();
        self.transform.scale_x = 1.0;
        self.transform.scale_y = 1.0;
        self.transform.flip_x = false;
        self.transform.flip_y = false;
        self.set_endpoints(resolved.start, resolved.end);
        resolved
    }

    /// Canvas-space endpoints with position, scale and flips applied.
    pub fn resolve(&self) -> ResolvedLine {
        resolve_line_endpoints(&self.points.relative_to_center(), &self.transform)
    }
}

impl OverlayShape for Segment {
    fn position(&self) -> [f64; 2] {
        self.transform.offset
    }

    fn set_position(&mut self, pos: [f64; 2]) {
        self.transform.offset = pos;
    }

    fn stroke(&self) -> Color32 {
        self.stroke
    }

    fn set_stroke(&mut self, color: Color32) {
        self.stroke = color;
    }

    fn hit_test(&self, pos: [f64; 2], tolerance: f64) -> bool {
        let line = self.resolve();
        distance_to_segment(pos, line.start, line.end) <= self.stroke_width * 0.5 + tolerance
    }
}
