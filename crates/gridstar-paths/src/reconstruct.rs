use gridstar_core::Pos;

use crate::observer::{SearchEvent, SearchObserver};

/// A path from a start cell to an end cell, both included.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Pos>,
    cost: i32,
}

impl Path {
    /// Build a path from its cells (start first) and total cost.
    pub fn new(cells: Vec<Pos>, cost: i32) -> Self {
        Self { cells, cost }
    }

    /// Cells from start to end inclusive.
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// Consume the path, returning its cells.
    pub fn into_cells(self) -> Vec<Pos> {
        self.cells
    }

    /// First cell of the path.
    pub fn start(&self) -> Option<Pos> {
        self.cells.first().copied()
    }

    /// Last cell of the path.
    pub fn end(&self) -> Option<Pos> {
        self.cells.last().copied()
    }

    /// Number of moves. A path whose start equals its end has zero steps.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Sum of the step costs along the path.
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Whether `p` lies on the path.
    pub fn contains(&self, p: Pos) -> bool {
        self.cells.contains(&p)
    }

    /// Whether every consecutive pair of cells is an axis-aligned step.
    pub fn is_contiguous(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }

    /// Iterate over the cells from start to end.
    pub fn iter(&self) -> std::slice::Iter<'_, Pos> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Pos;
    type IntoIter = std::slice::Iter<'a, Pos>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Walk a predecessor chain back from `end` and return the path it encodes.
///
/// `predecessor` maps a cell to the cell it was reached from, or `None` for
/// the start of the chain. The chain must be acyclic. A
/// [`SearchEvent::PathCell`] is emitted for every strictly interior cell, in
/// order from the end towards the start.
pub fn reconstruct<O: SearchObserver + ?Sized>(
    mut predecessor: impl FnMut(Pos) -> Option<Pos>,
    end: Pos,
    cost: i32,
    observer: &mut O,
) -> Path {
    let mut cells = vec![end];
    let mut current = end;
    while let Some(prev) = predecessor(current) {
        // `current` has a predecessor, so it is interior unless it is `end`.
        if current != end {
            observer.on_event(&SearchEvent::PathCell(current));
        }
        cells.push(prev);
        current = prev;
    }
    cells.reverse();
    Path::new(cells, cost)
}
