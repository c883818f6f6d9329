use eframe::egui;

/// Square icon button used in the bottom toolbar.
pub struct ToolButton {
    pub icon: &'static str,
    pub tooltip: &'static str,
    pub enabled: bool,
}

impl ToolButton {
    pub fn new(icon: &'static str, tooltip: &'static str) -> Self {
        Self {
            icon,
            tooltip,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(44.0, 44.0);
        let sense = if self.enabled {
            egui::Sense::click()
        } else {
            egui::Sense::hover()
        };
        let (rect, response) = ui.allocate_exact_size(button_size, sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if !self.enabled {
                egui::Color32::from_gray(235)
            } else if response.is_pointer_button_down_on() {
                egui::Color32::from_rgb(187, 222, 251)
            } else if response.hovered() {
                egui::Color32::from_gray(225)
            } else {
                egui::Color32::from_gray(245)
            };
            ui.painter().rect_filled(rect, 6.0, bg_color);

            let text_color = if self.enabled {
                egui::Color32::from_gray(30)
            } else {
                egui::Color32::from_gray(170)
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.icon,
                egui::FontId::proportional(24.0),
                text_color,
            );
        }

        response.on_hover_text(self.tooltip)
    }
}
