//! Progress notifications emitted while a search runs.
//!
//! Observers are called synchronously from inside the search loop and
//! should return promptly. Typical observers render the grid, log, or
//! record the events for later replay.

use gridstar_core::Pos;

/// A single progress notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchEvent {
    /// A cell entered the frontier for the first time this run.
    Discovered(Pos),
    /// A cell finished expanding. Emitted once per expansion, after all of
    /// its neighbors were relaxed.
    Expanded {
        pos: Pos,
        g: i32,
        f: i32,
        frontier_len: usize,
    },
    /// An expanded cell (other than the start) was closed.
    Closed(Pos),
    /// An interior cell of the final path, reported from the goal back
    /// towards the start. The endpoints themselves are not reported.
    PathCell(Pos),
    /// The search reached the end cell.
    GoalReached(Pos),
}

impl SearchEvent {
    /// The cell this event refers to.
    pub fn pos(&self) -> Pos {
        match *self {
            Self::Discovered(p)
            | Self::Closed(p)
            | Self::PathCell(p)
            | Self::GoalReached(p) => p,
            Self::Expanded { pos, .. } => pos,
        }
    }

    /// Whether this is a per-step notification, i.e. one that a renderer
    /// would redraw after.
    pub fn is_step(&self) -> bool {
        matches!(self, Self::Expanded { .. } | Self::PathCell(_))
    }
}

/// Receives [`SearchEvent`]s from a running search.
pub trait SearchObserver {
    fn on_event(&mut self, event: &SearchEvent);
}

impl<F: FnMut(&SearchEvent)> SearchObserver for F {
    #[inline]
    fn on_event(&mut self, event: &SearchEvent) {
        self(event)
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    #[inline]
    fn on_event(&mut self, _event: &SearchEvent) {}
}

/// Observer that records every event in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<SearchEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events.
    pub fn events(&self) -> &[SearchEvent] {
        &self.events
    }

    /// Number of per-step notifications recorded.
    pub fn steps(&self) -> usize {
        self.events.iter().filter(|e| e.is_step()).count()
    }

    /// Positions of all events matching `pred`, in order.
    pub fn positions(&self, pred: impl Fn(&SearchEvent) -> bool) -> Vec<Pos> {
        self.events
            .iter()
            .filter(|e| pred(e))
            .map(SearchEvent::pos)
            .collect()
    }

    /// Forget all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl SearchObserver for EventLog {
    fn on_event(&mut self, event: &SearchEvent) {
        self.events.push(*event);
    }
}
