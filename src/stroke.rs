use egui::{Color32, Pos2};
use uuid::Uuid;

use crate::error::BrushError;

/// Identifier attached to every stroke, used to correlate log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrokeId(Uuid);

impl StrokeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StrokeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A finished gesture. Once built, its points, color and thickness never change.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

impl Stroke {
    pub fn new(color: Color32, thickness: f32, points: Vec<Pos2>) -> Self {
        Self {
            id: StrokeId::new(),
            points,
            color,
            thickness,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
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

/// The stroke currently being drawn.
///
/// Color and thickness are frozen when the stroke is started; only the point
/// list grows. Zero points is a valid state that renders as nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct InProgressStroke {
    id: StrokeId,
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

impl InProgressStroke {
    pub fn new(color: Color32, thickness: f32) -> Self {
        Self {
            id: StrokeId::new(),
            points: Vec::new(),
            color,
            thickness,
        }
    }

    /// Start a stroke with its first point already placed
    pub fn starting_at(point: Pos2, color: Color32, thickness: f32) -> Self {
        let mut stroke = Self::new(color, thickness);
        stroke.add_point(point);
        stroke
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn id(&self) -> StrokeId {
        self.id
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

    /// An empty stroke carrying the same frozen attributes
    pub fn placeholder(&self) -> Self {
        Self::new(self.color, self.thickness)
    }

    /// Finalize into an immutable stroke, keeping the id
    pub fn into_stroke(self) -> Stroke {
        Stroke {
            id: self.id,
            points: self.points,
            color: self.color,
            thickness: self.thickness,
        }
    }
}

/// Current color and thickness, read whenever a new stroke begins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushState {
    pub color: Color32,
    pub thickness: f32,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            thickness: 20.0,
        }
    }
}

impl BrushState {
    pub fn new(color: Color32, thickness: f32) -> Result<Self, BrushError> {
        let mut brush = Self::default();
        brush.set_color(color);
        brush.set_thickness(thickness)?;
        Ok(brush)
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    /// Thickness must be a positive, finite number of pixels
    pub fn set_thickness(&mut self, thickness: f32) -> Result<(), BrushError> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(BrushError::InvalidThickness(thickness));
        }
        self.thickness = thickness;
        Ok(())
    }
}
