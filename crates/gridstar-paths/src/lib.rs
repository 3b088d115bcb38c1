//! Incremental A* search on uniform grids.
//!
//! This crate finds shortest paths on 4-connected, unit-cost grids and
//! reports its progress after every step so that a host can render or log
//! the search as it unfolds:
//!
//! - **A\*** search with deterministic tie-breaking ([`AstarSearch::run`])
//! - **Progress events** through [`SearchObserver`]
//! - **Cooperative cancellation** through [`CancelToken`]
//! - **Path reconstruction** from predecessor chains ([`reconstruct`])
//!
//! [`AstarSearch`] owns and reuses its node arrays, so repeated searches on
//! the same grid incur no allocations after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | extent, passability, neighbors |
//! | [`WeightedPather`] : [`Pather`] | step cost |
//! | [`AstarPather`] : [`WeightedPather`] | heuristic estimate |
//!
//! [`gridstar_core::Grid`] implements all three with unit step cost and the
//! Manhattan distance heuristic.

mod astar;
mod cancel;
mod config;
mod distance;
mod frontier;
mod observer;
mod reconstruct;
mod traits;

pub use astar::{
    AstarSearch, Endpoint, SearchError, SearchOutcome, SearchState, SearchStats, UNREACHABLE,
};
pub use cancel::CancelToken;
pub use config::SearchConfig;
pub use distance::{STEP_COST, heuristic, manhattan, step_cost};
pub use observer::{EventLog, NoopObserver, SearchEvent, SearchObserver};
pub use reconstruct::{Path, reconstruct};
pub use traits::{AstarPather, Pather, WeightedPather};
