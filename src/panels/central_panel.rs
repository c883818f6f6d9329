use crate::canvas::CanvasSurface;
use crate::gallery::BackgroundImage;
use crate::renderer::Renderer;

/// Where the canvas ended up this frame.
#[derive(Debug, Clone, Copy)]
pub struct CanvasArea {
    pub rect: egui::Rect,
    pub hovered: bool,
}

/// Fills the remaining space with the drawing surface and renders it.
pub fn central_panel(
    ctx: &egui::Context,
    renderer: &mut Renderer,
    canvas: &mut CanvasSurface,
    background: Option<&BackgroundImage>,
) -> CanvasArea {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().inner_margin(egui::Margin::same(6.0)))
        .show(ctx, |ui| {
            let available_size = ui.available_size();
            let (response, painter) = ui.allocate_painter(available_size, egui::Sense::drag());
            let rect = response.rect;

            canvas.resize(rect.size());
            renderer.render(ctx, &painter, rect, canvas, background);

            if canvas.is_drawing() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }

            CanvasArea {
                rect,
                hovered: response.hovered(),
            }
        })
        .inner
}
