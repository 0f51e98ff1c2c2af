//! Two-point measurement overlay.
//!
//! The overlay holds at most one measurement: two endpoint [`Marker`]s and
//! the [`Segment`] between them. The host drawing surface feeds it pointer
//! down, drag and hover events; every handler runs to completion and leaves
//! the markers and the segment consistent before the next repaint.
//!
//! Clicks on empty canvas advance `Empty -> OnePoint -> Complete`. The click
//! after `Complete` clears everything and does not place a new point.

use super::element::{ElementId, Marker, OverlayShape, OverlayStyle, PointRole, Segment};
use super::geometry::ResolvedLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Empty,
    OnePoint,
    Complete,
}

/// What a handler did, for event reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayChange {
    PointPlaced { role: PointRole, at: [f64; 2] },
    LineCompleted(ResolvedLine),
    Cleared,
    EndpointMoved { role: PointRole, at: [f64; 2] },
    LineMoved(ResolvedLine),
    Hover { element: ElementId, entering: bool },
}

#[derive(Debug, Clone, Default)]
pub struct MeteringOverlay {
    point1: Option<Marker>,
    point2: Option<Marker>,
    line: Option<Segment>,
    style: OverlayStyle,
    hovered: Option<ElementId>,
    redraw_requested: bool,
}

impl MeteringOverlay {
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    pub fn state(&self) -> OverlayState {
        match (&self.point1, &self.line) {
            (None, _) => OverlayState::Empty,
            (Some(_), None) => OverlayState::OnePoint,
            (Some(_), Some(_)) => OverlayState::Complete,
        }
    }

    pub fn marker(&self, role: PointRole) -> Option<&Marker> {
        match role {
            PointRole::First => self.point1.as_ref(),
            PointRole::Second => self.point2.as_ref(),
        }
    }

    fn marker_mut(&mut self, role: PointRole) -> Option<&mut Marker> {
        match role {
            PointRole::First => self.point1.as_mut(),
            PointRole::Second => self.point2.as_mut(),
        }
    }

    /// Markers currently placed, first before second.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.point1.iter().chain(self.point2.iter())
    }

    pub fn segment(&self) -> Option<&Segment> {
        self.line.as_ref()
    }

    pub fn segment_mut(&mut self) -> Option<&mut Segment> {
        self.line.as_mut()
    }

    /// Resolved length of the measurement line, once both points exist.
    pub fn length(&self) -> Option<f64> {
        self.line.as_ref().map(|l| l.resolve().length)
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    fn shape(&self, id: ElementId) -> Option<&dyn OverlayShape> {
        match id {
            ElementId::Point(role) => self.marker(role).map(|m| m as &dyn OverlayShape),
            ElementId::Line => self.line.as_ref().map(|l| l as &dyn OverlayShape),
        }
    }

    fn shape_mut(&mut self, id: ElementId) -> Option<&mut dyn OverlayShape> {
        match id {
            ElementId::Point(role) => self.marker_mut(role).map(|m| m as &mut dyn OverlayShape),
            ElementId::Line => self.line.as_mut().map(|l| l as &mut dyn OverlayShape),
        }
    }

    /// Current position of an element (marker center or line center).
    pub fn position_of(&self, id: ElementId) -> Option<[f64; 2]> {
        self.shape(id).map(|s| s.position())
    }

    /// Topmost element under `pos`. Markers are painted above the line.
    pub fn hit_test(&self, pos: [f64; 2]) -> Option<ElementId> {
        let order = [
            ElementId::Point(PointRole::Second),
            ElementId::Point(PointRole::First),
            ElementId::Line,
        ];
        order.into_iter().find(|&id| {
            let tolerance = match id {
                ElementId::Line => self.style.pick_tolerance,
                ElementId::Point(_) => 0.0,
            };
            self.shape(id)
                .map(|s| s.hit_test(pos, tolerance))
                .unwrap_or(false)
        })
    }

    /// Pointer pressed at `pos`. `hit` is the element under the pointer, if any.
    pub fn pointer_down(&mut self, pos: [f64; 2], hit: Option<ElementId>) -> Option<OverlayChange> {
        if hit.is_some() {
            return None;
        }

        if self.line.is_some() {
            self.clear();
            return Some(OverlayChange::Cleared);
        }

        let role = if self.point1.is_none() {
            PointRole::First
        } else {
            PointRole::Second
        };
        let marker = Marker::new(pos, role, &self.style);
        match role {
            PointRole::First => self.point1 = Some(marker),
            PointRole::Second => self.point2 = Some(marker),
        }
        self.redraw_requested = true;
        tracing::debug!(?role, x = pos[0], y = pos[1], "metering point placed");

        let (Some(p1), Some(p2)) = (&self.point1, &self.point2) else {
            return Some(OverlayChange::PointPlaced { role, at: pos });
        };
        let segment = Segment::new(p1.center, p2.center, &self.style);
        let resolved = segment.resolve();
        self.line = Some(segment);
        tracing::debug!(length = resolved.length, "metering line completed");
        Some(OverlayChange::LineCompleted(resolved))
    }

    /// Element `id` was dragged to `to` (a marker center, or the line's center).
    pub fn drag(&mut self, id: ElementId, to: [f64; 2]) -> Option<OverlayChange> {
        let shape = self.shape_mut(id)?;
        shape.set_position(to);
        self.redraw_requested = true;

        let line = self.line.as_mut()?;
        match id {
            ElementId::Point(role) => {
                let baked = line.bake_transform();
                let (other, other_at) = if role == line.begin {
                    line.set_start(to);
                    (line.end, baked.end)
                } else {
                    line.set_end(to);
                    (line.begin, baked.start)
                };
                if let Some(m) = self.marker_mut(other) {
                    m.set_position(other_at);
                }
                Some(OverlayChange::EndpointMoved { role, at: to })
            }
            ElementId::Line => {
                let resolved = line.bake_transform();
                let (begin, end) = (line.begin, line.end);
                if let Some(m) = self.marker_mut(begin) {
                    m.set_position(resolved.start);
                }
                if let Some(m) = self.marker_mut(end) {
                    m.set_position(resolved.end);
                }
                Some(OverlayChange::LineMoved(resolved))
            }
        }
    }

    /// Drag `id` by a canvas-space delta from its current position.
    pub fn drag_by(&mut self, id: ElementId, delta: [f64; 2]) -> Option<OverlayChange> {
        let [x, y] = self.position_of(id)?;
        self.drag(id, [x + delta[0], y + delta[1]])
    }

    /// Pointer entered (`entering == true`) or left element `id`.
    pub fn hover(&mut self, id: ElementId, entering: bool) -> Option<OverlayChange> {
        let color = if entering {
            self.style.highlight
        } else {
            self.style.default_stroke
        };
        self.shape_mut(id)?.set_stroke(color);
        self.redraw_requested = true;
        Some(OverlayChange::Hover {
            element: id,
            entering,
        })
    }

    /// Track the pointer and emit leave/enter pairs when the hovered element changes.
    pub fn update_hover(&mut self, pos: Option<[f64; 2]>) -> Vec<OverlayChange> {
        let now = pos.and_then(|p| self.hit_test(p));
        if now == self.hovered {
            return Vec::new();
        }
        let mut changes = Vec::new();
        if let Some(prev) = self.hovered.take() {
            changes.extend(self.hover(prev, false));
        }
        if let Some(next) = now {
            changes.extend(self.hover(next, true));
        }
        self.hovered = now;
        changes
    }

    /// Drop both points and the line.
    pub fn clear(&mut self) {
        self.point1 = None;
        self.point2 = None;
        self.line = None;
        self.hovered = None;
        self.redraw_requested = true;
        tracing::debug!("metering overlay cleared");
    }

    /// Rebuild a complete measurement from saved endpoints.
    pub fn restore_line(&mut self, start: [f64; 2], end: [f64; 2]) {
        self.clear();
        self.point1 = Some(Marker::new(start, PointRole::First, &self.style));
        self.point2 = Some(Marker::new(end, PointRole::Second, &self.style));
        self.line = Some(Segment::new(start, end, &self.style));
    }

    /// Returns `true` once per batch of changes that need a repaint.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}
