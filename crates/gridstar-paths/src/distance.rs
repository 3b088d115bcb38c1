use gridstar_core::Pos;

/// Cost of a single axis-aligned move. Terrain is uniform.
pub const STEP_COST: i32 = 1;

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// The search heuristic: Manhattan distance from `a` to `b`.
#[inline]
pub fn heuristic(a: Pos, b: Pos) -> i32 {
    manhattan(a, b)
}

/// Cost of stepping between two adjacent cells.
#[inline]
pub fn step_cost(_a: Pos, _b: Pos) -> i32 {
    STEP_COST
}
