use crate::app::UiAction;
use crate::components::ToolButton;

/// Bottom toolbar: brush size, gallery, undo, redo, save.
pub fn tools_panel(
    ctx: &egui::Context,
    can_undo: bool,
    can_redo: bool,
    exporting: bool,
    actions: &mut Vec<UiAction>,
) {
    egui::TopBottomPanel::bottom("tools_panel")
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ToolButton::new("🖌", "Brush size").show(ui).clicked() {
                    actions.push(UiAction::OpenBrushPicker);
                }
                if ToolButton::new("🖼", "Pick a background picture").show(ui).clicked() {
                    actions.push(UiAction::ImportBackground);
                }
                if ToolButton::new("⟲", "Undo").enabled(can_undo).show(ui).clicked() {
                    actions.push(UiAction::Undo);
                }
                if ToolButton::new("⟳", "Redo").enabled(can_redo).show(ui).clicked() {
                    actions.push(UiAction::Redo);
                }
                if ToolButton::new("💾", "Save and share")
                    .enabled(!exporting)
                    .show(ui)
                    .clicked()
                {
                    actions.push(UiAction::Save);
                }
            });
            ui.add_space(4.0);
        });
}
