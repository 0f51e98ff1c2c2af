use egui::Ui;

use crate::data::data::MeterData;

#[derive(Debug, Clone, Copy, Default)]
pub struct PanelState {
    pub visible: bool,
}

impl PanelState {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }
}

/// A sidebar section of the viewer.
pub trait Panel {
    fn title(&self) -> &'static str;
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    /// Icon glyph shown on the toggle button.
    fn icon_only(&self) -> Option<&'static str> {
        None
    }

    fn title_and_icon(&self) -> String {
        match self.icon_only() {
            Some(icon) => format!("{icon} {}", self.title()),
            None => self.title().to_string(),
        }
    }

    fn render_panel(&mut self, _ui: &mut Ui, _data: &mut MeterData) {}
}
