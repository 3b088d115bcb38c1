//! Incremental A* search.
//!
//! [`AstarSearch`] owns the per-cell bookkeeping (g and f scores,
//! predecessors, closed flags) in flat arrays indexed like the pather's
//! [`Dims`]. Each run bumps a generation counter, which lazily invalidates
//! every node, so no state leaks from one run into the next and repeated
//! runs do not reallocate.
//!
//! The frontier uses lazy deletion: a cell whose score improves is pushed
//! again instead of being updated in place, and entries for cells that were
//! already expanded are dropped when popped.

use std::fmt;

use gridstar_core::{Dims, GridError, Pos};
use log::{debug, trace};

use crate::cancel::CancelToken;
use crate::config::SearchConfig;
use crate::frontier::Frontier;
use crate::observer::{NoopObserver, SearchEvent, SearchObserver};
use crate::reconstruct::{Path, reconstruct};
use crate::traits::AstarPather;

/// Score of a cell that has not been reached.
pub const UNREACHABLE: i32 = i32::MAX;

const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Node {
    g: i32,
    f: i32,
    parent: usize,
    generation: u32,
    closed: bool,
    discovered: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            f: UNREACHABLE,
            parent: NO_PARENT,
            generation: 0,
            closed: false,
            discovered: false,
        }
    }
}

impl Node {
    /// Reset the node if it belongs to an earlier run.
    #[inline]
    fn refresh(&mut self, generation: u32) {
        if self.generation != generation {
            *self = Node {
                generation,
                ..Node::default()
            };
        }
    }
}

// ---------------------------------------------------------------------------
// Public result types
// ---------------------------------------------------------------------------

/// Lifecycle of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No run has started yet.
    #[default]
    Idle,
    /// A run is in progress (observable from inside an observer).
    Running,
    /// The last run reached the end cell.
    Succeeded,
    /// The last run exhausted the frontier or its expansion budget.
    Failed,
    /// The last run was stopped through its [`CancelToken`].
    Cancelled,
}

/// Result of a search that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A shortest path was found.
    Found(Path),
    /// The end cell cannot be reached from the start.
    NoPath,
}

impl SearchOutcome {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::NoPath => None,
        }
    }

    /// Consume the outcome, returning the path if one was found.
    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::NoPath => None,
        }
    }

    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Counters collected during the last run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Cells expanded (goal pop excluded).
    pub expanded: usize,
    /// Distinct cells that entered the frontier, start included.
    pub discovered: usize,
    /// Frontier pushes, duplicates included.
    pub pushed: u64,
    /// Popped entries dropped because the cell was already expanded.
    pub stale_pops: usize,
}

// ---------------------------------------------------------------------------
// AstarSearch
// ---------------------------------------------------------------------------

/// Reusable A* search engine.
///
/// ```
/// use gridstar_core::{Grid, Pos};
/// use gridstar_paths::{AstarSearch, NoopObserver};
///
/// let grid = Grid::new(5);
/// let mut search = AstarSearch::new();
/// let outcome = search
///     .run(&grid, Pos::new(0, 0), Pos::new(4, 4), &mut NoopObserver)
///     .unwrap();
/// assert_eq!(outcome.path().unwrap().steps(), 8);
/// ```
#[derive(Default)]
pub struct AstarSearch {
    dims: Dims,
    nodes: Vec<Node>,
    generation: u32,
    frontier: Frontier,
    // scratch buffer for neighbor queries
    nbuf: Vec<Pos>,
    config: SearchConfig,
    cancel: Option<CancelToken>,
    state: SearchState,
    stats: SearchStats,
}

impl AstarSearch {
    /// Create a search engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` for subsequent runs.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Check `token` at the top of every search iteration.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// State after the last run.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Counters of the last run.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Best known cost from the start to `p` in the last run, or `None` if
    /// `p` was not reached.
    pub fn g_score(&self, p: Pos) -> Option<i32> {
        self.node(p).map(|n| n.g).filter(|&g| g != UNREACHABLE)
    }

    /// `g + estimate` for `p` in the last run, or `None` if not reached.
    pub fn f_score(&self, p: Pos) -> Option<i32> {
        self.node(p).map(|n| n.f).filter(|&f| f != UNREACHABLE)
    }

    /// The cell `p` was reached from in the last run.
    pub fn predecessor(&self, p: Pos) -> Option<Pos> {
        let n = self.node(p)?;
        (n.parent != NO_PARENT).then(|| self.dims.pos(n.parent))
    }

    /// Whether `p` was expanded in the last run.
    pub fn is_closed(&self, p: Pos) -> bool {
        self.node(p).is_some_and(|n| n.closed)
    }

    fn node(&self, p: Pos) -> Option<&Node> {
        let n = &self.nodes[self.dims.index(p)?];
        (n.generation == self.generation && self.generation != 0).then_some(n)
    }

    fn resize(&mut self, dims: Dims) {
        if dims == self.dims {
            return;
        }
        self.dims = dims;
        self.nodes.clear();
        self.nodes.resize(dims.len(), Node::default());
        self.generation = 0;
    }

    fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale nodes could alias the new generation.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        self.generation
    }

    fn endpoint_index<P: AstarPather>(
        &self,
        pather: &P,
        p: Pos,
        endpoint: Endpoint,
    ) -> Result<usize, SearchError> {
        let idx = self.dims.index(p).ok_or(SearchError::OutOfBounds {
            pos: p,
            dims: self.dims,
        })?;
        if !pather.passable(p) {
            return Err(SearchError::InvalidEndpoint { pos: p, endpoint });
        }
        Ok(idx)
    }

    /// Run A* from `start` to `end` without progress notifications.
    pub fn find_path<P: AstarPather>(
        &mut self,
        pather: &P,
        start: Pos,
        end: Pos,
    ) -> Result<SearchOutcome, SearchError> {
        self.run(pather, start, end, &mut NoopObserver)
    }

    /// Run A* from `start` to `end`, notifying `observer` as the search
    /// progresses.
    ///
    /// Both endpoints must be in bounds and passable. An unreachable end is
    /// not an error: it yields [`SearchOutcome::NoPath`].
    pub fn run<P, O>(
        &mut self,
        pather: &P,
        start: Pos,
        end: Pos,
        observer: &mut O,
    ) -> Result<SearchOutcome, SearchError>
    where
        P: AstarPather,
        O: SearchObserver + ?Sized,
    {
        self.resize(pather.dims());
        self.stats = SearchStats::default();
        self.frontier.clear();

        let start_idx = self.endpoint_index(pather, start, Endpoint::Start)?;
        let end_idx = self.endpoint_index(pather, end, Endpoint::End)?;

        let cur_gen = self.next_generation();
        self.state = SearchState::Running;
        debug!("astar: searching {start} -> {end} on {} grid", self.dims);

        {
            let node = &mut self.nodes[start_idx];
            node.refresh(cur_gen);
            node.g = 0;
            node.f = pather.estimate(start, end);
            node.discovered = true;
            self.frontier.push(node.f, start, start_idx);
            self.stats.discovered = 1;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let result = 'search: loop {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                break 'search Err(SearchError::Cancelled {
                    expanded: self.stats.expanded,
                });
            }
            let Some(entry) = self.frontier.pop() else {
                break 'search Ok(false);
            };
            let ci = entry.idx;

            // Skip stale entries.
            let cn = &self.nodes[ci];
            if cn.closed || entry.f > cn.f {
                self.stats.stale_pops += 1;
                continue;
            }

            if ci == end_idx {
                break 'search Ok(true);
            }

            // Only a (limit + 1)-th expansion fails.
            if let Some(limit) = self.config.max_expansions {
                if self.stats.expanded >= limit {
                    break 'search Err(SearchError::ExpansionLimit { limit });
                }
            }

            self.nodes[ci].closed = true;
            let current = entry.pos;
            let current_g = self.nodes[ci].g;

            nbuf.clear();
            pather.neighbors(current, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.dims.index(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current, np);

                let n = &mut self.nodes[ni];
                n.refresh(cur_gen);
                if tentative_g >= n.g {
                    continue;
                }

                n.g = tentative_g;
                n.f = tentative_g + pather.estimate(np, end);
                n.parent = ci;
                // Only reachable with an inconsistent estimate.
                n.closed = false;
                self.frontier.push(n.f, np, ni);

                if !n.discovered {
                    n.discovered = true;
                    self.stats.discovered += 1;
                    observer.on_event(&SearchEvent::Discovered(np));
                }
            }

            self.stats.expanded += 1;
            let cn = &self.nodes[ci];
            trace!(
                "astar: expanded {current} g={} f={} frontier={}",
                cn.g,
                cn.f,
                self.frontier.len()
            );
            observer.on_event(&SearchEvent::Expanded {
                pos: current,
                g: cn.g,
                f: cn.f,
                frontier_len: self.frontier.len(),
            });

            if ci != start_idx {
                observer.on_event(&SearchEvent::Closed(current));
            }
        };

        self.nbuf = nbuf;
        self.stats.pushed = self.frontier.pushed();

        let outcome = match result {
            Ok(true) => {
                self.state = SearchState::Succeeded;
                let path = if self.config.report_path_cells {
                    self.path_to(end_idx, observer)
                } else {
                    self.path_to(end_idx, &mut NoopObserver)
                };
                observer.on_event(&SearchEvent::GoalReached(end));
                debug!(
                    "astar: found path of {} steps after {} expansions",
                    path.steps(),
                    self.stats.expanded
                );
                SearchOutcome::Found(path)
            }
            Ok(false) => {
                self.state = SearchState::Failed;
                debug!(
                    "astar: no path from {start} to {end} after {} expansions",
                    self.stats.expanded
                );
                SearchOutcome::NoPath
            }
            Err(err) => {
                self.state = match err {
                    SearchError::Cancelled { .. } => SearchState::Cancelled,
                    _ => SearchState::Failed,
                };
                debug!("astar: stopped: {err}");
                return Err(err);
            }
        };
        Ok(outcome)
    }

    fn path_to<O: SearchObserver + ?Sized>(&self, goal_idx: usize, observer: &mut O) -> Path {
        let dims = self.dims;
        let nodes = &self.nodes;
        let cost = nodes[goal_idx].g;
        reconstruct(
            |p| {
                let parent = nodes[dims.index(p)?].parent;
                (parent != NO_PARENT).then(|| dims.pos(parent))
            },
            dims.pos(goal_idx),
            cost,
            observer,
        )
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Which endpoint of a search an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Errors that stop a search before it can report a result.
///
/// An unreachable end is not an error; see [`SearchOutcome::NoPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// A coordinate lies outside the grid.
    OutOfBounds { pos: Pos, dims: Dims },
    /// The start or end cell is a wall.
    InvalidEndpoint { pos: Pos, endpoint: Endpoint },
    /// The run observed its cancellation token.
    Cancelled { expanded: usize },
    /// The run hit [`SearchConfig::max_expansions`].
    ExpansionLimit { limit: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, dims } => {
                write!(f, "position {pos} is outside the {dims} grid")
            }
            Self::InvalidEndpoint { pos, endpoint } => {
                write!(f, "{endpoint} cell {pos} is a wall")
            }
            Self::Cancelled { expanded } => {
                write!(f, "search cancelled after {expanded} expansions")
            }
            Self::ExpansionLimit { limit } => {
                write!(f, "search needs more than {limit} expansions")
            }
        }
    }
}

impl std::error::Error for SearchError {}

impl From<GridError> for SearchError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::OutOfBounds { pos, dims } => Self::OutOfBounds { pos, dims },
        }
    }
}
