//! The A* open set: a min-heap keyed by `(f, seq)`.
//!
//! Lower `f` scores are popped first; ties are broken by insertion order
//! (FIFO), so equal-score cells always leave the frontier in the order they
//! entered it.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use gridstar_core::Pos;

/// A frontier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrontierEntry {
    pub(crate) f: i32,
    /// Monotonically increasing push counter. Lower = pushed earlier.
    pub(crate) seq: u64,
    pub(crate) pos: Pos,
    /// Flat node index of `pos`.
    pub(crate) idx: usize,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order; the heap wraps entries in Reverse.
        self.f.cmp(&other.f).then(self.seq.cmp(&other.seq))
    }
}

/// Priority queue of discovered-but-unexpanded cells.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    seq: u64,
}

impl Frontier {
    /// Push a cell with score `f`.
    pub(crate) fn push(&mut self, f: i32, pos: Pos, idx: usize) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(FrontierEntry { f, seq, pos, idx }));
    }

    /// Pop the entry with the smallest `(f, seq)`.
    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|Reverse(e)| e)
    }

    /// Number of entries, stale duplicates included.
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Total number of pushes since the last [`clear`](Self::clear).
    pub(crate) fn pushed(&self) -> u64 {
        self.seq
    }

    /// Remove all entries and restart the sequence counter at 0.
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(fr: &mut Frontier, f: i32, row: i32) {
        fr.push(f, Pos::new(row, 0), row as usize);
    }

    #[test]
    fn pops_lowest_f_first() {
        let mut fr = Frontier::default();
        push(&mut fr, 5, 0);
        push(&mut fr, 2, 1);
        push(&mut fr, 9, 2);
        assert_eq!(fr.pop().unwrap().f, 2);
        assert_eq!(fr.pop().unwrap().f, 5);
        assert_eq!(fr.pop().unwrap().f, 9);
        assert!(fr.pop().is_none());
    }

    #[test]
    fn ties_are_fifo() {
        let mut fr = Frontier::default();
        for row in 0..5 {
            push(&mut fr, 7, row);
        }
        let order: Vec<i32> = std::iter::from_fn(|| fr.pop()).map(|e| e.pos.row).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn sequence_starts_at_zero_and_counts_pushes() {
        let mut fr = Frontier::default();
        push(&mut fr, 1, 0);
        push(&mut fr, 1, 1);
        assert_eq!(fr.pushed(), 2);
        assert_eq!(fr.pop().map(|e| e.seq), Some(0));
        fr.clear();
        assert_eq!(fr.len(), 0);
        assert_eq!(fr.pushed(), 0);
        push(&mut fr, 1, 3);
        assert_eq!(fr.pop().map(|e| (e.seq, e.idx)), Some((0, 3)));
    }

    #[test]
    fn lower_f_beats_earlier_seq() {
        let mut fr = Frontier::default();
        push(&mut fr, 4, 0);
        push(&mut fr, 3, 1);
        assert_eq!(fr.len(), 2);
        assert_eq!(fr.pop().unwrap().pos, Pos::new(1, 0));
    }
}
