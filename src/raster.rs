//! Off-screen rasterization of the drawing with tiny-skia.
//!
//! The on-screen view is drawn by egui; export needs real pixels, so the same
//! layers are flattened here into an RGBA image.

use image::RgbaImage;
use std::sync::Arc;
use thiserror::Error;
use tiny_skia::{
    Color, FillRule, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint,
    Transform,
};

use crate::gallery::BackgroundImage;
use crate::stroke::{Stroke, StrokeRef};

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Cannot flatten a {width}x{height} view")]
    EmptyView { width: u32, height: u32 },
}

/// Everything needed to flatten the view, detached from the UI so it can be
/// handed around freely.
#[derive(Clone)]
pub struct ViewSnapshot {
    pub width: u32,
    pub height: u32,
    pub background: Option<Arc<BackgroundImage>>,
    pub raster: Option<Pixmap>,
    pub strokes: Vec<StrokeRef>,
}

fn skia_color(color: egui::Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::from_rgba8(r, g, b, a)
}

/// Paints a single stroke with round caps and joins.
pub fn paint_stroke(pixmap: &mut Pixmap, stroke: &Stroke) {
    let points = stroke.points();
    let Some(first) = points.first() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(skia_color(stroke.color()));
    paint.anti_alias = true;

    // A tap, or a drag that never left its starting point, leaves a dot.
    if points.iter().all(|p| p == first) {
        if let Some(dot) = PathBuilder::from_circle(first.x, first.y, stroke.thickness() / 2.0) {
            pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
        }
        return;
    }

    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for point in &points[1..] {
        builder.line_to(point.x, point.y);
    }

    if let Some(path) = builder.finish() {
        let line = tiny_skia::Stroke {
            width: stroke.thickness(),
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..tiny_skia::Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &line, Transform::identity(), None);
    }
}

/// Draws `background` scaled to cover the whole pixmap, cropping the overflow.
fn paint_background(pixmap: &mut Pixmap, background: &BackgroundImage) {
    let Some(source) = background.to_pixmap() else {
        log::warn!("Background image could not be converted for export");
        return;
    };
    let (scale, tx, ty) =
        background.center_crop_transform(pixmap.width() as f32, pixmap.height() as f32);
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(
        0,
        0,
        source.as_ref(),
        &paint,
        Transform::from_row(scale, 0.0, 0.0, scale, tx, ty),
        None,
    );
}

/// Flattens the view into an image: white paper, background picture, raster
/// buffer, then every committed stroke in order.
pub fn flatten(snapshot: &ViewSnapshot) -> Result<RgbaImage, RasterError> {
    let mut pixmap = Pixmap::new(snapshot.width, snapshot.height).ok_or(RasterError::EmptyView {
        width: snapshot.width,
        height: snapshot.height,
    })?;

    pixmap.fill(Color::WHITE);

    if let Some(background) = &snapshot.background {
        paint_background(&mut pixmap, background);
    }

    if let Some(raster) = &snapshot.raster {
        pixmap.draw_pixmap(
            0,
            0,
            raster.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    for stroke in &snapshot.strokes {
        paint_stroke(&mut pixmap, stroke);
    }

    Ok(to_rgba_image(&pixmap))
}

/// Converts tiny-skia's premultiplied pixels into a straight-alpha image.
pub fn to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        dst.0 = [color.red(), color.green(), color.blue(), color.alpha()];
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, Pos2};

    fn snapshot(width: u32, height: u32, strokes: Vec<StrokeRef>) -> ViewSnapshot {
        ViewSnapshot {
            width,
            height,
            background: None,
            raster: Pixmap::new(width, height),
            strokes,
        }
    }

    #[test]
    fn test_blank_view_is_white() {
        let image = flatten(&snapshot(40, 30, Vec::new())).unwrap();
        assert_eq!(image.dimensions(), (40, 30));
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_stroke_is_composited_over_white() {
        let stroke = Stroke::new_ref(
            Color32::RED,
            6.0,
            vec![Pos2::new(5.0, 15.0), Pos2::new(35.0, 15.0)],
        );
        let image = flatten(&snapshot(40, 30, vec![stroke])).unwrap();

        assert_eq!(image.get_pixel(20, 15).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(20, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_tap_leaves_a_dot() {
        let stroke = Stroke::new_ref(Color32::BLUE, 10.0, vec![Pos2::new(20.0, 20.0)]);
        let image = flatten(&snapshot(40, 40, vec![stroke])).unwrap();
        assert_eq!(image.get_pixel(20, 20).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(2, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_later_strokes_paint_over_earlier_ones() {
        let under = Stroke::new_ref(
            Color32::RED,
            8.0,
            vec![Pos2::new(0.0, 10.0), Pos2::new(20.0, 10.0)],
        );
        let over = Stroke::new_ref(
            Color32::GREEN,
            8.0,
            vec![Pos2::new(10.0, 0.0), Pos2::new(10.0, 20.0)],
        );
        let image = flatten(&snapshot(20, 20, vec![under, over])).unwrap();
        assert_eq!(image.get_pixel(10, 10).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_empty_view_is_an_error() {
        assert!(matches!(
            flatten(&snapshot(0, 10, Vec::new())),
            Err(RasterError::EmptyView { width: 0, height: 10 })
        ));
    }

    /// 200x100 picture in four 50px bands: green, red, blue, green.
    fn banded_background() -> Arc<BackgroundImage> {
        let (w, h) = (200usize, 100usize);
        let mut rgba = Vec::with_capacity(w * h * 4);
        for _ in 0..h {
            for x in 0..w {
                let px = match x / 50 {
                    1 => [255, 0, 0, 255],
                    2 => [0, 0, 255, 255],
                    _ => [0, 255, 0, 255],
                };
                rgba.extend_from_slice(&px);
            }
        }
        Arc::new(BackgroundImage::from_rgba([w, h], rgba).unwrap())
    }

    fn close(actual: [u8; 4], expected: [u8; 4]) -> bool {
        actual
            .iter()
            .zip(expected)
            .all(|(a, e)| (*a as i16 - e as i16).abs() <= 2)
    }

    #[test]
    fn test_background_is_center_cropped_into_view() {
        let mut view = snapshot(100, 100, Vec::new());
        view.background = Some(banded_background());
        let image = flatten(&view).unwrap();

        assert_eq!(image.dimensions(), (100, 100));
        // Only the middle half of the picture is visible.
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(0, 99).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(25, 50).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(75, 50).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(99, 0).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(99, 99).0, [0, 0, 255, 255]);
        assert!(image.pixels().all(|p| p.0 != [255, 255, 255, 255]));
        assert!(image.pixels().all(|p| p.0 != [0, 255, 0, 255]));
    }

    #[test]
    fn test_strokes_are_painted_over_background() {
        let stroke = Stroke::new_ref(
            Color32::BLACK,
            10.0,
            vec![Pos2::new(0.0, 50.0), Pos2::new(100.0, 50.0)],
        );
        let mut view = snapshot(100, 100, vec![stroke]);
        view.background = Some(banded_background());
        let image = flatten(&view).unwrap();

        assert_eq!(image.get_pixel(25, 50).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(25, 10).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_translucent_background_keeps_its_color() {
        let background =
            BackgroundImage::from_rgba([1, 1], vec![200, 100, 50, 128]).unwrap();
        let pixmap = background.to_pixmap().unwrap();
        let back = to_rgba_image(&pixmap);
        assert!(close(back.get_pixel(0, 0).0, [200, 100, 50, 128]), "{:?}", back.get_pixel(0, 0));

        // Half-transparent black over white paper comes out mid grey.
        let mut view = snapshot(10, 10, Vec::new());
        view.background = Some(Arc::new(
            BackgroundImage::from_rgba([1, 1], vec![0, 0, 0, 128]).unwrap(),
        ));
        let image = flatten(&view).unwrap();
        assert!(image.pixels().all(|p| close(p.0, [127, 127, 127, 255])));
    }
}
