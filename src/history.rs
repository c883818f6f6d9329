use crate::stroke::StrokeRef;

/// Undo/redo bookkeeping for committed strokes.
///
/// A stroke lives in exactly one of `committed` or `undone`. `undone` doubles
/// as the redo stack; `redone` records the strokes brought back by redo since
/// the last fresh commit.
#[derive(Debug, Default, Clone)]
pub struct StrokeHistory {
    /// Strokes visible on the canvas, oldest first
    committed: Vec<StrokeRef>,
    /// Strokes removed by undo, most recently undone last
    undone: Vec<StrokeRef>,
    /// Strokes restored by redo, in the order they were restored
    redone: Vec<StrokeRef>,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits a freshly drawn stroke. Anything waiting to be redone becomes
    /// unreachable.
    pub fn commit(&mut self, stroke: StrokeRef) {
        self.committed.push(stroke);
        if !self.undone.is_empty() {
            log::debug!("Dropping {} redo entries after new commit", self.undone.len());
        }
        self.undone.clear();
        self.redone.clear();
    }

    /// Moves the most recent committed stroke to the undone list.
    pub fn undo(&mut self) -> Option<StrokeRef> {
        let stroke = self.committed.pop()?;
        self.undone.push(stroke.clone());
        Some(stroke)
    }

    /// Moves the most recently undone stroke back on top of the committed list.
    pub fn redo(&mut self) -> Option<StrokeRef> {
        let stroke = self.undone.pop()?;
        self.committed.push(stroke.clone());
        self.redone.push(stroke.clone());
        Some(stroke)
    }

    pub fn committed(&self) -> &[StrokeRef] {
        &self.committed
    }

    pub fn undone(&self) -> &[StrokeRef] {
        &self.undone
    }

    pub fn redone(&self) -> &[StrokeRef] {
        &self.redone
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }
}
