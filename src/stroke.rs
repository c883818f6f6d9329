use egui::{Color32, Pos2};
use std::sync::Arc;

// Immutable stroke, shared between history lists and the export snapshot
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

// Stroke currently being drawn
#[derive(Clone, Debug)]
pub struct MutableStroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    pub fn new(color: Color32, thickness: f32, points: Vec<Pos2>) -> Self {
        Self {
            points,
            color,
            thickness,
        }
    }

    pub fn new_ref(color: Color32, thickness: f32, points: Vec<Pos2>) -> StrokeRef {
        Arc::new(Self::new(color, thickness, points))
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

impl MutableStroke {
    /// Starts an empty stroke that will carry the given brush settings.
    pub fn new(color: Color32, thickness: f32) -> Self {
        Self {
            points: Vec::new(),
            color,
            thickness,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consumes the stroke without copying its points.
    pub fn into_stroke_ref(self) -> StrokeRef {
        Arc::new(Stroke::new(self.color, self.thickness, self.points))
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutable_stroke_keeps_brush_settings() {
        let mut stroke = MutableStroke::new(Color32::RED, 20.0);
        assert!(stroke.is_empty());

        stroke.add_point(Pos2::new(1.0, 2.0));
        stroke.add_point(Pos2::new(3.0, 4.0));

        let frozen = stroke.into_stroke_ref();
        assert_eq!(frozen.color(), Color32::RED);
        assert_eq!(frozen.thickness(), 20.0);
        assert_eq!(frozen.points(), &[Pos2::new(1.0, 2.0), Pos2::new(3.0, 4.0)]);
    }
}
