//! CamMeter crate root: re-exports and module wiring.
//!
//! A camera viewer built on egui/eframe with a two-point metering overlay
//! for calibrating pixel distances against real-world lengths.
//!
//! - `data`: overlay state machine, element shapes, line geometry,
//!   calibration, camera sources
//! - `events`: subscribable overlay/stream events
//! - `controllers`: external control of pause/snapshot/selection
//! - `config`: YAML configuration
//! - `persistence`: JSON save/load of the metering line and calibration
//! - `panels`, `app`: the egui UI

pub mod app;
pub mod config;
pub mod controllers;
pub mod data;
pub mod error;
pub mod events;
pub mod panels;
pub mod persistence;

pub use app::{run_cammeter, MeterApp};
pub use config::MeterConfig;
pub use controllers::StreamController;
pub use data::calibration::Calibration;
pub use data::camera::{CameraDevice, CameraRig, DeviceProvider, FrameSource, TestPatternProvider};
pub use data::element::{ElementId, Marker, OverlayShape, OverlayStyle, PointRole, Segment};
pub use data::geometry::{resolve_line_endpoints, LinePoints, LineTransform, ResolvedLine};
pub use data::overlay::{MeteringOverlay, OverlayChange, OverlayState};
pub use error::{MeterError, Result};
pub use events::{EventController, EventFilter, EventKind, MeterEvent};
