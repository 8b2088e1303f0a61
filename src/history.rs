use crate::stroke::Stroke;

/// A stack of strokes. Iteration runs bottom to top, which for the committed
/// list is also paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeStack {
    strokes: Vec<Stroke>,
}

impl StrokeStack {
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn pop(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }

    pub fn as_slice(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }
}

impl<'a> IntoIterator for &'a StrokeStack {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}
