use egui::{Color32, ColorImage, Context, Painter, Pos2, Rect, Shape, TextureHandle, TextureId, TextureOptions, Vec2};

use crate::canvas::CanvasSurface;
use crate::gallery::BackgroundImage;

/// Appends the shapes for one stroke: a polyline plus a disc at every vertex,
/// which gives the round caps and joins of a felt-tip brush.
pub fn push_stroke_shapes(
    shapes: &mut Vec<Shape>,
    points: &[Pos2],
    color: Color32,
    thickness: f32,
    offset: Vec2,
) {
    let radius = thickness / 2.0;
    match points {
        [] => {}
        [point] => shapes.push(Shape::circle_filled(*point + offset, radius, color)),
        _ => {
            let moved: Vec<Pos2> = points.iter().map(|p| *p + offset).collect();
            shapes.extend(
                moved
                    .iter()
                    .map(|p| Shape::circle_filled(*p, radius, color)),
            );
            shapes.push(Shape::line(moved, egui::Stroke::new(thickness, color)));
        }
    }
}

/// Owns the GPU copies of the raster buffer and the background picture.
#[derive(Default)]
pub struct Renderer {
    raster_texture: Option<(u64, TextureHandle)>,
    background_texture: Option<(u64, TextureHandle)>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("raster_generation", &self.raster_texture.as_ref().map(|(g, _)| *g))
            .field("background_id", &self.background_texture.as_ref().map(|(id, _)| *id))
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads the canvas raster buffer whenever it has been recreated.
    fn raster_texture(&mut self, ctx: &Context, canvas: &CanvasSurface) -> Option<TextureId> {
        let raster = canvas.raster()?;
        let stale = self
            .raster_texture
            .as_ref()
            .is_none_or(|(generation, _)| *generation != raster.generation());

        if stale {
            let [w, h] = raster.size();
            let image = ColorImage::from_rgba_premultiplied(
                [w as usize, h as usize],
                raster.pixmap().data(),
            );
            let handle = ctx.load_texture("canvas_raster", image, TextureOptions::LINEAR);
            self.raster_texture = Some((raster.generation(), handle));
        }

        self.raster_texture.as_ref().map(|(_, handle)| handle.id())
    }

    fn background_texture(&mut self, ctx: &Context, background: &BackgroundImage) -> TextureId {
        match &self.background_texture {
            Some((id, handle)) if *id == background.id() => handle.id(),
            _ => {
                let handle = ctx.load_texture(
                    format!("background_{}", background.id()),
                    background.to_color_image(),
                    TextureOptions::LINEAR,
                );
                let id = handle.id();
                self.background_texture = Some((background.id(), handle));
                id
            }
        }
    }

    /// Draws the whole view: white paper, the background picture cropped to
    /// fill the surface, then the canvas layers.
    pub fn render(
        &mut self,
        ctx: &Context,
        painter: &Painter,
        rect: Rect,
        canvas: &CanvasSurface,
        background: Option<&BackgroundImage>,
    ) {
        painter.rect_filled(rect, 0.0, Color32::WHITE);

        match background {
            Some(background) => {
                let texture_id = self.background_texture(ctx, background);
                painter.image(
                    texture_id,
                    rect,
                    background.center_crop_uv(rect.size()),
                    Color32::WHITE,
                );
            }
            None => self.background_texture = None,
        }

        let raster = self.raster_texture(ctx, canvas);
        canvas.render(painter, rect, raster);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point_is_a_dot() {
        let mut shapes = Vec::new();
        push_stroke_shapes(
            &mut shapes,
            &[Pos2::new(5.0, 5.0)],
            Color32::RED,
            10.0,
            Vec2::new(100.0, 0.0),
        );
        assert_eq!(shapes.len(), 1);
        match &shapes[0] {
            Shape::Circle(circle) => {
                assert_eq!(circle.center, Pos2::new(105.0, 5.0));
                assert_eq!(circle.radius, 5.0);
            }
            other => panic!("expected a circle, got {other:?}"),
        }
    }

    #[test]
    fn test_polyline_gets_round_joins() {
        let mut shapes = Vec::new();
        let points = [Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0), Pos2::new(10.0, 10.0)];
        push_stroke_shapes(&mut shapes, &points, Color32::BLUE, 4.0, Vec2::ZERO);
        assert_eq!(shapes.len(), points.len() + 1);
        assert!(matches!(shapes.last(), Some(Shape::Path(_))));
    }

    #[test]
    fn test_render_basics() {
        let ctx = egui::Context::default();
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 100.0));
        let painter = Painter::new(ctx.clone(), egui::LayerId::background(), rect);

        let mut canvas = CanvasSurface::default();
        canvas.resize(rect.size());
        canvas.pointer_down(Pos2::new(10.0, 10.0));
        canvas.pointer_move(Pos2::new(20.0, 20.0));

        let mut renderer = Renderer::new();
        renderer.render(&ctx, &painter, rect, &canvas, None);
        assert!(renderer.raster_texture.is_some());
    }
}
