use eframe::egui;

/// One palette color. The active swatch is drawn pressed with a thick ring.
pub struct ColorSwatch {
    pub color: egui::Color32,
    pub selected: bool,
}

impl ColorSwatch {
    pub fn new(color: egui::Color32, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(32.0, 32.0), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let inner = if self.selected { rect.shrink(5.0) } else { rect.shrink(2.0) };
            ui.painter().rect_filled(inner, 4.0, self.color);

            let ring = if self.selected {
                egui::Stroke::new(3.0, egui::Color32::from_gray(60))
            } else if response.hovered() {
                egui::Stroke::new(1.5, egui::Color32::from_gray(120))
            } else {
                egui::Stroke::new(1.0, egui::Color32::from_gray(180))
            };
            ui.painter().rect_stroke(rect.shrink(1.0), 5.0, ring);
        }

        response
    }
}
