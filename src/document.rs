use egui::{Color32, Pos2};
use log::{debug, info};

use crate::error::BrushError;
use crate::history::StrokeStack;
use crate::stroke::{BrushState, InProgressStroke};

/// Stroke model and undo engine.
///
/// Holds the committed strokes in paint order, the strokes removed by undo,
/// the stroke currently being drawn and the brush used for the next one.
/// Every applied operation raises a redraw request that the host collects
/// with [`Document::take_redraw_request`].
///
/// Committing a new stroke does not clear the redo stack, so a redo after new
/// drawing puts the old stroke back on top of the newer ones.
#[derive(Debug, Default)]
pub struct Document {
    committed: StrokeStack,
    undone: StrokeStack,
    in_progress: Option<InProgressStroke>,
    brush: BrushState,
    redraw_requested: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brush(brush: BrushState) -> Self {
        Self {
            brush,
            ..Self::default()
        }
    }

    /// Start a new stroke at `point` using the current brush
    pub fn begin_stroke(&mut self, point: Pos2) {
        let brush = self.brush;
        self.start_stroke(point, brush);
    }

    /// Start a new stroke at `point` with explicit frozen attributes.
    ///
    /// The thickness is checked like [`BrushState::set_thickness`]; on error
    /// the document is left untouched.
    pub fn begin_stroke_with(
        &mut self,
        point: Pos2,
        color: Color32,
        thickness: f32,
    ) -> Result<(), BrushError> {
        let brush = BrushState::new(color, thickness)?;
        self.start_stroke(point, brush);
        Ok(())
    }

    /// An unfinished stroke is discarded without being committed
    fn start_stroke(&mut self, point: Pos2, brush: BrushState) {
        if let Some(previous) = &self.in_progress {
            if !previous.is_empty() {
                debug!(
                    "Discarding unfinished stroke {} ({} points)",
                    previous.id(),
                    previous.points().len()
                );
            }
        }
        self.in_progress = Some(InProgressStroke::starting_at(
            point,
            brush.color,
            brush.thickness,
        ));
        self.redraw_requested = true;
    }

    /// Append a point to the stroke being drawn.
    ///
    /// No-op when nothing is in progress. The empty placeholder left by
    /// [`Document::end_stroke`] does not count: a stroke only starts with a begin.
    pub fn extend_stroke(&mut self, point: Pos2) {
        if let Some(stroke) = self.in_progress.as_mut().filter(|s| !s.is_empty()) {
            stroke.add_point(point);
            self.redraw_requested = true;
        }
    }

    /// Commit the stroke being drawn and leave an empty placeholder carrying
    /// the same attributes.
    pub fn end_stroke(&mut self) {
        let Some(stroke) = self.in_progress.take() else {
            return;
        };

        let placeholder = stroke.placeholder();
        if !stroke.is_empty() {
            let stroke = stroke.into_stroke();
            info!(
                "🖌️ Committed stroke {} ({} points)",
                stroke.id(),
                stroke.points().len()
            );
            self.committed.push(stroke);
        }
        self.in_progress = Some(placeholder);
        self.redraw_requested = true;
    }

    /// Move the last committed stroke onto the undo stack.
    ///
    /// Returns false and leaves everything untouched when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(stroke) => {
                debug!("Undo stroke {}", stroke.id());
                self.undone.push(stroke);
                self.redraw_requested = true;
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone stroke back on top of the committed strokes.
    ///
    /// Returns false and leaves everything untouched when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(stroke) => {
                debug!("Redo stroke {}", stroke.id());
                self.committed.push(stroke);
                self.redraw_requested = true;
                true
            }
            None => {
                debug!("Nothing to redo");
                false
            }
        }
    }

    /// Takes effect on the next stroke only
    pub fn set_brush_color(&mut self, color: Color32) {
        self.brush.set_color(color);
    }

    /// Takes effect on the next stroke only
    pub fn set_brush_thickness(&mut self, thickness: f32) -> Result<(), BrushError> {
        self.brush.set_thickness(thickness)
    }

    /// Drop every stroke, including the undo history
    pub fn clear(&mut self) {
        info!(
            "Clearing canvas ({} committed, {} undone)",
            self.committed.len(),
            self.undone.len()
        );
        self.committed.clear();
        self.undone.clear();
        self.in_progress = None;
        self.redraw_requested = true;
    }

    pub fn committed(&self) -> &StrokeStack {
        &self.committed
    }

    pub fn undone(&self) -> &StrokeStack {
        &self.undone
    }

    pub fn in_progress(&self) -> Option<&InProgressStroke> {
        self.in_progress.as_ref()
    }

    pub fn brush(&self) -> BrushState {
        self.brush
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Returns whether a redraw was requested since the last call, and resets it
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_request_redraw() {
        let mut doc = Document::new();
        assert!(!doc.take_redraw_request());

        doc.begin_stroke(Pos2::ZERO);
        assert!(doc.take_redraw_request());
        assert!(!doc.take_redraw_request());

        doc.extend_stroke(Pos2::new(1.0, 1.0));
        assert!(doc.take_redraw_request());

        doc.end_stroke();
        assert!(doc.take_redraw_request());

        doc.undo();
        assert!(doc.take_redraw_request());

        doc.redo();
        assert!(doc.take_redraw_request());
    }

    #[test]
    fn test_noops_do_not_request_redraw() {
        let mut doc = Document::new();
        doc.extend_stroke(Pos2::ZERO);
        doc.end_stroke();
        doc.undo();
        doc.redo();
        assert!(!doc.take_redraw_request());
        assert!(doc.in_progress().is_none());
    }

    #[test]
    fn test_end_leaves_placeholder_with_frozen_attributes() {
        let mut doc = Document::new();
        doc.begin_stroke_with(Pos2::ZERO, Color32::GREEN, 3.0).unwrap();
        doc.set_brush_color(Color32::RED);
        doc.end_stroke();

        let placeholder = doc.in_progress().unwrap();
        assert!(placeholder.is_empty());
        assert_eq!(placeholder.color(), Color32::GREEN);
        assert_eq!(placeholder.thickness(), 3.0);
    }

    #[test]
    fn test_begin_with_bad_thickness_is_rejected() {
        let mut doc = Document::new();
        doc.begin_stroke(Pos2::ZERO);
        doc.take_redraw_request();

        for thickness in [0.0, -2.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                doc.begin_stroke_with(Pos2::new(5.0, 5.0), Color32::RED, thickness),
                Err(BrushError::InvalidThickness(_))
            ));
        }

        // The stroke already in progress is kept
        let stroke = doc.in_progress().unwrap();
        assert_eq!(stroke.points(), &[Pos2::ZERO]);
        assert_eq!(stroke.thickness(), 20.0);
        assert!(!doc.take_redraw_request());

        doc.end_stroke();
        assert_eq!(doc.committed().len(), 1);
    }

    #[test]
    fn test_clear_drops_history() {
        let mut doc = Document::new();
        doc.begin_stroke(Pos2::ZERO);
        doc.end_stroke();
        doc.begin_stroke(Pos2::ZERO);
        doc.end_stroke();
        doc.undo();

        doc.clear();
        assert!(!doc.can_undo());
        assert!(!doc.can_redo());
        assert!(doc.in_progress().is_none());
    }
}
