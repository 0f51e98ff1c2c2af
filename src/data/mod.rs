pub mod calibration;
pub mod camera;
pub mod data;
pub mod element;
pub mod geometry;
pub mod hotkeys;
pub mod overlay;
