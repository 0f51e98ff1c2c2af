//! Event system for the viewer.
//!
//! Callers subscribe through [`EventController`] with an [`EventFilter`] and
//! receive [`MeterEvent`]s on an `mpsc` channel. Each event carries a set of
//! [`EventKind`] flags so that one occurrence can match several categories
//! (placing the second point is both `MEASUREMENT_POINT` and
//! `MEASUREMENT_COMPLETE`).

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::data::element::{ElementId, PointRole};
use crate::data::overlay::OverlayChange;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the categories an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u32);

impl EventKind {
    // ── Measurement overlay ─────────────────────────────────────────────
    /// A measurement endpoint was placed.
    pub const MEASUREMENT_POINT: Self = Self(1 << 0);
    /// Both endpoints exist and the line was built.
    pub const MEASUREMENT_COMPLETE: Self = Self(1 << 1);
    /// The measurement was cleared.
    pub const MEASUREMENT_CLEARED: Self = Self(1 << 2);
    /// An endpoint or the whole line was dragged.
    pub const MEASUREMENT_MOVED: Self = Self(1 << 3);
    /// The pointer entered or left an overlay element.
    pub const HOVER: Self = Self(1 << 4);

    // ── Stream ──────────────────────────────────────────────────────────
    pub const PAUSE: Self = Self(1 << 5);
    pub const RESUME: Self = Self(1 << 6);
    /// A different camera became the main preview.
    pub const CAMERA_SELECTED: Self = Self(1 << 7);
    /// A snapshot PNG was written.
    pub const SCREENSHOT: Self = Self(1 << 8);

    // ── Metering ────────────────────────────────────────────────────────
    /// A new pixel-to-unit calibration was applied.
    pub const CALIBRATED: Self = Self(1 << 9);

    /// Wildcard: matches every event kind.
    pub const ALL: Self = Self(u32::MAX);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(EventKind, &str)] = &[
            (EventKind::MEASUREMENT_POINT, "MEASUREMENT_POINT"),
            (EventKind::MEASUREMENT_COMPLETE, "MEASUREMENT_COMPLETE"),
            (EventKind::MEASUREMENT_CLEARED, "MEASUREMENT_CLEARED"),
            (EventKind::MEASUREMENT_MOVED, "MEASUREMENT_MOVED"),
            (EventKind::HOVER, "HOVER"),
            (EventKind::PAUSE, "PAUSE"),
            (EventKind::RESUME, "RESUME"),
            (EventKind::CAMERA_SELECTED, "CAMERA_SELECTED"),
            (EventKind::SCREENSHOT, "SCREENSHOT"),
            (EventKind::CALIBRATED, "CALIBRATED"),
        ];

        let mut names = Vec::new();
        let mut known_bits = 0u32;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Metadata for measurement events. Coordinates are canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementMeta {
    /// Endpoint that was placed or dragged, if the event concerns one.
    pub role: Option<PointRole>,
    pub start: Option<[f64; 2]>,
    pub end: Option<[f64; 2]>,
    /// Resolved line length in pixels (only with both points).
    pub length: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverMeta {
    pub element: ElementId,
    pub entering: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraMeta {
    pub device_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportMeta {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationMeta {
    pub pixels_per_unit: f64,
    pub unit: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// MeterEvent
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MeterEvent {
    pub kinds: EventKind,
    /// Seconds since the controller was created; set on emit.
    pub timestamp: f64,

    pub measurement: Option<MeasurementMeta>,
    pub hover: Option<HoverMeta>,
    pub camera: Option<CameraMeta>,
    pub export: Option<ExportMeta>,
    pub calibration: Option<CalibrationMeta>,
}

impl MeterEvent {
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            measurement: None,
            hover: None,
            camera: None,
            export: None,
            calibration: None,
        }
    }
}

impl From<&OverlayChange> for MeterEvent {
    fn from(change: &OverlayChange) -> Self {
        match change {
            OverlayChange::PointPlaced { role, at } => {
                let mut evt = MeterEvent::new(EventKind::MEASUREMENT_POINT);
                evt.measurement = Some(MeasurementMeta {
                    role: Some(*role),
                    start: (*role == PointRole::First).then_some(*at),
                    end: (*role == PointRole::Second).then_some(*at),
                    length: None,
                });
                evt
            }
            OverlayChange::LineCompleted(line) => {
                let mut evt =
                    MeterEvent::new(EventKind::MEASUREMENT_POINT | EventKind::MEASUREMENT_COMPLETE);
                evt.measurement = Some(MeasurementMeta {
                    role: Some(PointRole::Second),
                    start: Some(line.start),
                    end: Some(line.end),
                    length: Some(line.length),
                });
                evt
            }
            OverlayChange::Cleared => MeterEvent::new(EventKind::MEASUREMENT_CLEARED),
            OverlayChange::EndpointMoved { role, at } => {
                let mut evt = MeterEvent::new(EventKind::MEASUREMENT_MOVED);
                evt.measurement = Some(MeasurementMeta {
                    role: Some(*role),
                    start: (*role == PointRole::First).then_some(*at),
                    end: (*role == PointRole::Second).then_some(*at),
                    length: None,
                });
                evt
            }
            OverlayChange::LineMoved(line) => {
                let mut evt = MeterEvent::new(EventKind::MEASUREMENT_MOVED);
                evt.measurement = Some(MeasurementMeta {
                    role: None,
                    start: Some(line.start),
                    end: Some(line.end),
                    length: Some(line.length),
                });
                evt
            }
            OverlayChange::Hover { element, entering } => {
                let mut evt = MeterEvent::new(EventKind::HOVER);
                evt.hover = Some(HoverMeta {
                    element: *element,
                    entering: *entering,
                });
                evt
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// OR-mask filter: an event is delivered when `event.kinds.intersects(mask)`.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &MeterEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<MeterEvent>,
}

/// Collects UI events and fans them out to subscribers.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    /// Subscribe to events matching the given filter.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<MeterEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    pub fn subscribe_all(&self) -> Receiver<MeterEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Deliver `event` to every subscriber whose filter matches. Subscribers
    /// whose receiver was dropped are pruned when a send to them fails.
    pub fn emit(&self, mut event: MeterEvent) {
        let mut inner = self.inner.lock().unwrap();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        tracing::trace!(kinds = %event.kinds, "emit event");
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().unwrap().subscribers.len()
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geometry::ResolvedLine;

    #[test]
    fn event_kind_union_and_intersection() {
        let point = EventKind::MEASUREMENT_POINT;
        let done = EventKind::MEASUREMENT_COMPLETE;
        let combined = point | done;
        assert!(combined.contains(point));
        assert!(combined.contains(done));
        assert!(!EventKind::PAUSE.intersects(point));
    }

    #[test]
    fn event_kinds_do_not_overlap() {
        let all_kinds = [
            EventKind::MEASUREMENT_POINT,
            EventKind::MEASUREMENT_COMPLETE,
            EventKind::MEASUREMENT_CLEARED,
            EventKind::MEASUREMENT_MOVED,
            EventKind::HOVER,
            EventKind::PAUSE,
            EventKind::RESUME,
            EventKind::CAMERA_SELECTED,
            EventKind::SCREENSHOT,
            EventKind::CALIBRATED,
        ];
        for (i, a) in all_kinds.iter().enumerate() {
            for (j, b) in all_kinds.iter().enumerate() {
                if i != j {
                    assert!(!a.intersects(*b), "EventKind bits {} and {} overlap", i, j);
                }
            }
        }
    }

    #[test]
    fn event_kind_display() {
        assert_eq!(format!("{}", EventKind::HOVER), "HOVER");
        let combo = EventKind::MEASUREMENT_POINT | EventKind::MEASUREMENT_COMPLETE;
        assert_eq!(format!("{}", combo), "MEASUREMENT_POINT|MEASUREMENT_COMPLETE");
        assert_eq!(format!("{}", EventKind::ALL), "ALL");
        assert!(format!("{}", EventKind(1 << 31)).starts_with("0x"));
    }

    #[test]
    fn filtered_subscribers_only_see_matching_events() {
        let ctrl = EventController::new();
        let rx_all = ctrl.subscribe_all();
        let rx_meas = ctrl.subscribe(EventFilter::only(EventKind::MEASUREMENT_COMPLETE));
        let rx_pause = ctrl.subscribe(EventFilter::only(EventKind::PAUSE));

        let line = ResolvedLine {
            start: [0.0, 0.0],
            end: [3.0, 4.0],
            length: 5.0,
        };
        ctrl.emit(MeterEvent::from(&OverlayChange::LineCompleted(line)));

        assert!(rx_all.try_recv().is_ok());
        let evt = rx_meas.try_recv().unwrap();
        assert_eq!(evt.measurement.unwrap().length, Some(5.0));
        assert!(rx_pause.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_is_pruned() {
        let ctrl = EventController::new();
        let rx1 = ctrl.subscribe_all();
        let rx2 = ctrl.subscribe_all();
        drop(rx1);

        ctrl.emit(MeterEvent::new(EventKind::PAUSE));
        assert!(rx2.try_recv().is_ok());
        assert_eq!(ctrl.subscriber_count(), 1);
    }
}
