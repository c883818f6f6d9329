use crate::app::UiAction;
use crate::brush::{BrushSize, BrushSizes};
use crate::permission::{RATIONALE_DISMISS, RATIONALE_MESSAGE, RATIONALE_TITLE};

fn modal<'open>(title: &str) -> egui::Window<'open> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}

/// "Brush size :" picker with the three presets drawn as dots of their size.
pub fn brush_size_dialog(
    ctx: &egui::Context,
    sizes: &BrushSizes,
    current: BrushSize,
    actions: &mut Vec<UiAction>,
) {
    let mut open = true;
    modal("Brush size :").open(&mut open).show(ctx, |ui| {
        ui.horizontal(|ui| {
            for size in BrushSize::ALL {
                let thickness = sizes.thickness(size);
                let side = thickness.max(24.0) + 16.0;
                let (rect, response) =
                    ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::click());
                if response.hovered() || size == current {
                    ui.painter().rect_filled(rect, 6.0, egui::Color32::from_gray(225));
                }
                ui.painter().circle_filled(
                    rect.center(),
                    thickness / 2.0,
                    egui::Color32::from_gray(40),
                );
                if response.on_hover_text(size.label()).clicked() {
                    actions.push(UiAction::SelectBrush(size));
                }
            }
        });
    });
    if !open {
        actions.push(UiAction::CloseBrushPicker);
    }
}

/// Stand-in for the platform permission prompt.
pub fn permission_prompt(ctx: &egui::Context, app_title: &str, actions: &mut Vec<UiAction>) {
    modal("Permission").show(ctx, |ui| {
        ui.label(format!("Allow {} to access your pictures and files?", app_title));
        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Deny").clicked() {
                actions.push(UiAction::PermissionAnswer(false));
            }
            if ui.button("Allow").clicked() {
                actions.push(UiAction::PermissionAnswer(true));
            }
        });
    });
}

pub fn rationale_dialog(ctx: &egui::Context, actions: &mut Vec<UiAction>) {
    modal(RATIONALE_TITLE).show(ctx, |ui| {
        ui.label(RATIONALE_MESSAGE);
        ui.separator();
        if ui.button(RATIONALE_DISMISS).clicked() {
            actions.push(UiAction::DismissRationale);
        }
    });
}

pub fn progress_dialog(ctx: &egui::Context) {
    egui::Window::new("progress")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Please wait...");
            });
        });
}
