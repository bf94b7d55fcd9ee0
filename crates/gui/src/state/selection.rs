use crate::annotation::DragTarget;

/// What the move tool is currently dragging
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragState {
    /// A lattice point, by index
    Point(usize),
    /// A marker of the parallel line at this index
    LineMarker(usize, DragTarget),
}

/// Lattice point selection (ordered, for line creation) and drag state
#[derive(Default)]
pub struct SelectionState {
    /// Selected point indices (in order of selection)
    selected: Vec<usize>,
    /// Point under the pointer (for visual feedback)
    pub hovered_point: Option<usize>,
    pub drag: Option<DragState>,
}

impl SelectionState {
    /// All selected points
    pub fn points(&self) -> &[usize] {
        &self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Toggle a point, keeping the order of the others
    pub fn toggle(&mut self, index: usize) {
        if let Some(pos) = self.selected.iter().position(|&s| s == index) {
            self.selected.remove(pos);
        } else {
            self.selected.push(index);
        }
    }

    /// Clear all selection
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Number of selected points
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Hand the selection over (e.g. to create a line), leaving it empty
    pub fn take(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.selected)
    }
}
