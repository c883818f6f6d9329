use crate::app::UiAction;
use crate::brush::Palette;
use crate::components::ColorSwatch;

/// Row of color swatches above the toolbar.
pub fn palette_panel(ctx: &egui::Context, palette: &Palette, actions: &mut Vec<UiAction>) {
    egui::TopBottomPanel::bottom("palette_panel")
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                for (index, swatch) in palette.swatches().iter().enumerate() {
                    let selected = index == palette.selected_index();
                    let response = ColorSwatch::new(swatch.color, selected)
                        .show(ui)
                        .on_hover_text(&swatch.tag);
                    if response.clicked() && !selected {
                        actions.push(UiAction::SelectColor(index));
                    }
                }
            });
            ui.add_space(4.0);
        });
}
