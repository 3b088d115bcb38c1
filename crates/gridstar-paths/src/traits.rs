use gridstar_core::{Dims, Grid, Pos};

use crate::distance::{STEP_COST, manhattan};

/// Minimal pathfinding interface — provides extent, passability and
/// neighbor enumeration.
pub trait Pather {
    /// Extent of the searchable area.
    fn dims(&self) -> Dims;

    /// Whether `p` may be stood on. Out-of-bounds positions are not passable.
    fn passable(&self, p: Pos) -> bool;

    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Pos, to: Pos) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Pos, to: Pos) -> i32;
}

// A grid is a 4-connected, unit-cost graph; Manhattan distance is both
// admissible and consistent on it.

impl Pather for Grid {
    #[inline]
    fn dims(&self) -> Dims {
        Grid::dims(self)
    }

    #[inline]
    fn passable(&self, p: Pos) -> bool {
        self.is_open(p)
    }

    #[inline]
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        Grid::neighbors(self, p, buf)
    }
}

impl WeightedPather for Grid {
    #[inline]
    fn cost(&self, _from: Pos, _to: Pos) -> i32 {
        STEP_COST
    }
}

impl AstarPather for Grid {
    #[inline]
    fn estimate(&self, from: Pos, to: Pos) -> i32 {
        manhattan(from, to)
    }
}
