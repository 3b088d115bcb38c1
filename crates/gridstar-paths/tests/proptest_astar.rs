//! Property-based tests for the A* search.
//!
//! These check, over randomly generated grids:
//! - optimality on open grids (path length equals Manhattan distance)
//! - every returned path is contiguous and avoids walls
//! - repeated runs on the same grid are identical
//! - unreachable ends yield `NoPath`, never an error

use std::collections::VecDeque;

use gridstar_core::{Grid, Pos};
use gridstar_paths::{AstarSearch, EventLog, SearchOutcome, manhattan};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// A grid size together with two in-bounds cells.
fn sized_endpoints() -> impl Strategy<Value = (i32, Pos, Pos)> {
    (2..16i32).prop_flat_map(|n| {
        let cell = (0..n, 0..n).prop_map(|(r, c)| Pos::new(r, c));
        (Just(n), cell.clone(), cell)
    })
}

/// A grid with random walls and two open endpoints.
fn walled_grid() -> impl Strategy<Value = (Grid, Pos, Pos)> {
    sized_endpoints().prop_flat_map(|(n, start, end)| {
        let len = (n * n) as usize;
        prop::collection::vec(prop::bool::weighted(0.3), len).prop_map(move |walls| {
            let mut grid = Grid::new(n);
            for (i, wall) in walls.into_iter().enumerate() {
                let p = Pos::new(i as i32 / n, i as i32 % n);
                if wall && p != start && p != end {
                    grid.set_wall(p, true).unwrap();
                }
            }
            (grid, start, end)
        })
    })
}

/// Breadth-first distance, used as an independent oracle.
fn bfs_distance(grid: &Grid, start: Pos, end: Pos) -> Option<usize> {
    let n = grid.rows();
    let mut dist = vec![usize::MAX; (n * n) as usize];
    let idx = |p: Pos| (p.row * n + p.col) as usize;
    let mut queue = VecDeque::from([start]);
    dist[idx(start)] = 0;
    while let Some(p) = queue.pop_front() {
        if p == end {
            return Some(dist[idx(p)]);
        }
        for q in grid.neighbors_of(p) {
            if dist[idx(q)] == usize::MAX {
                dist[idx(q)] = dist[idx(p)] + 1;
                queue.push_back(q);
            }
        }
    }
    None
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    /// Property: on an open grid the path length equals the Manhattan distance.
    #[test]
    fn prop_open_grid_is_optimal((n, start, end) in sized_endpoints()) {
        let grid = Grid::new(n);
        let mut search = AstarSearch::new();
        let outcome = search.find_path(&grid, start, end).unwrap();
        let path = outcome.path().expect("open grids are connected");
        prop_assert_eq!(path.steps() as i32, manhattan(start, end));
        prop_assert_eq!(path.start(), Some(start));
        prop_assert_eq!(path.end(), Some(end));
    }

    /// Property: paths are contiguous, avoid walls and match BFS length.
    #[test]
    fn prop_paths_are_valid_and_shortest((grid, start, end) in walled_grid()) {
        let mut search = AstarSearch::new();
        let outcome = search.find_path(&grid, start, end).unwrap();
        match (&outcome, bfs_distance(&grid, start, end)) {
            (SearchOutcome::Found(path), Some(d)) => {
                prop_assert!(path.is_contiguous());
                prop_assert!(path.iter().all(|&p| grid.is_open(p)));
                prop_assert_eq!(path.steps(), d);
                prop_assert_eq!(path.cost() as usize, d);
            }
            (SearchOutcome::NoPath, None) => {}
            (outcome, d) => prop_assert!(false, "outcome {:?} disagrees with bfs {:?}", outcome, d),
        }
    }

    /// Property: running twice yields identical results and event streams.
    #[test]
    fn prop_runs_are_deterministic((grid, start, end) in walled_grid()) {
        let mut search = AstarSearch::new();
        let mut first = EventLog::new();
        let a = search.run(&grid, start, end, &mut first).unwrap();
        let mut second = EventLog::new();
        let b = search.run(&grid, start, end, &mut second).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(first, second);
    }

    /// Property: every expansion is reported exactly once per cell.
    #[test]
    fn prop_cells_expand_at_most_once((grid, start, end) in walled_grid()) {
        let mut search = AstarSearch::new();
        let mut log = EventLog::new();
        search.run(&grid, start, end, &mut log).unwrap();
        let mut expanded = log.positions(|e| matches!(e, gridstar_paths::SearchEvent::Expanded { .. }));
        let total = expanded.len();
        expanded.sort();
        expanded.dedup();
        prop_assert_eq!(expanded.len(), total);
        prop_assert_eq!(total, search.stats().expanded);
    }
}
