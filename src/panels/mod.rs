pub mod cameras_ui;
pub mod metering_ui;
pub mod panel_trait;
pub mod preview_ui;

pub use cameras_ui::CamerasPanel;
pub use metering_ui::MeteringPanel;
pub use panel_trait::{Panel, PanelState};
pub use preview_ui::{CanvasTransform, PreviewCanvas};
