use egui::{Color32, Painter, Pos2, Rect, Shape, TextureId, Vec2};
use std::sync::Arc;
use tiny_skia::Pixmap;

use crate::brush::BrushState;
use crate::gallery::BackgroundImage;
use crate::history::StrokeHistory;
use crate::raster::ViewSnapshot;
use crate::renderer;
use crate::stroke::{MutableStroke, StrokeRef};

/// Off-screen bitmap matching the drawing surface size.
///
/// It is a cache layer drawn beneath the strokes and holds no authoritative
/// state: it is thrown away and recreated whenever the surface is resized.
pub struct RasterBuffer {
    pixmap: Pixmap,
    generation: u64,
}

impl RasterBuffer {
    fn new(width: u32, height: u32, generation: u64) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap, generation })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn size(&self) -> [u32; 2] {
        [self.pixmap.width(), self.pixmap.height()]
    }

    /// Bumped every time the buffer is recreated, so GPU copies know to refresh.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl std::fmt::Debug for RasterBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterBuffer")
            .field("size", &self.size())
            .field("generation", &self.generation)
            .finish()
    }
}

/// The drawing surface: stroke history, the stroke under the pointer and the
/// brush that the next stroke will use.
#[derive(Debug, Default)]
pub struct CanvasSurface {
    history: StrokeHistory,
    current: Option<MutableStroke>,
    brush: BrushState,
    size: Vec2,
    raster: Option<RasterBuffer>,
    raster_generation: u64,
}

fn is_finite(pos: Pos2) -> bool {
    pos.x.is_finite() && pos.y.is_finite()
}

impl CanvasSurface {
    pub fn new(brush: BrushState) -> Self {
        Self {
            brush,
            ..Default::default()
        }
    }

    /// Starts a new stroke at `pos` using the current brush.
    pub fn pointer_down(&mut self, pos: Pos2) {
        if !is_finite(pos) {
            return;
        }
        let mut stroke = MutableStroke::new(self.brush.color, self.brush.thickness);
        stroke.add_point(pos);
        self.current = Some(stroke);
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        if !is_finite(pos) {
            return;
        }
        if let Some(stroke) = &mut self.current {
            stroke.add_point(pos);
        }
    }

    /// Commits the in-progress stroke. Returns the committed stroke, if any.
    pub fn pointer_up(&mut self) -> Option<StrokeRef> {
        let stroke = self.current.take()?;
        if stroke.is_empty() {
            return None;
        }
        let stroke = stroke.into_stroke_ref();
        log::debug!(
            "Committed stroke: {} points, thickness {}",
            stroke.points().len(),
            stroke.thickness()
        );
        self.history.commit(stroke.clone());
        Some(stroke)
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo().is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo().is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Tracks the on-screen size of the surface, recreating the raster buffer
    /// when it changes.
    pub fn resize(&mut self, size: Vec2) {
        if !(size.x.is_finite() && size.y.is_finite()) || size.x < 1.0 || size.y < 1.0 {
            return;
        }
        if size == self.size && self.raster.is_some() {
            return;
        }

        self.size = size;
        self.raster_generation += 1;
        self.raster = RasterBuffer::new(
            size.x.round() as u32,
            size.y.round() as u32,
            self.raster_generation,
        );
        log::debug!("Surface resized to {}x{}", size.x, size.y);
    }

    pub fn set_brush_color(&mut self, color: Color32) {
        self.brush.color = color;
    }

    /// Returns false, leaving the brush alone, unless `thickness` is a
    /// positive finite value.
    pub fn set_brush_thickness(&mut self, thickness: f32) -> bool {
        if !(thickness.is_finite() && thickness > 0.0) {
            return false;
        }
        self.brush.thickness = thickness;
        true
    }

    pub fn brush(&self) -> BrushState {
        self.brush
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn in_progress(&self) -> Option<&MutableStroke> {
        self.current.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn raster(&self) -> Option<&RasterBuffer> {
        self.raster.as_ref()
    }

    /// Shapes for every committed stroke in commit order, then the stroke in
    /// progress, positioned relative to `origin`.
    pub fn shapes(&self, origin: Pos2) -> Vec<Shape> {
        let offset = origin.to_vec2();
        let mut shapes = Vec::new();

        for stroke in self.history.committed() {
            renderer::push_stroke_shapes(
                &mut shapes,
                stroke.points(),
                stroke.color(),
                stroke.thickness(),
                offset,
            );
        }

        if let Some(stroke) = &self.current {
            renderer::push_stroke_shapes(
                &mut shapes,
                stroke.points(),
                stroke.color(),
                stroke.thickness(),
                offset,
            );
        }

        shapes
    }

    /// Draws the raster buffer, the committed strokes and the stroke in progress.
    pub fn render(&self, painter: &Painter, rect: Rect, raster_texture: Option<TextureId>) {
        if let Some(texture_id) = raster_texture {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture_id, Rect::from_min_size(rect.min, self.size), uv, Color32::WHITE);
        }
        painter.extend(self.shapes(rect.min));
    }

    /// Captures what export needs to flatten the current view.
    pub fn snapshot(&self, background: Option<Arc<BackgroundImage>>) -> ViewSnapshot {
        ViewSnapshot {
            width: self.size.x.round() as u32,
            height: self.size.y.round() as u32,
            background,
            raster: self.raster.as_ref().map(|raster| raster.pixmap.clone()),
            strokes: self.history.committed().to_vec(),
        }
    }
}
