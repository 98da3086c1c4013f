//! Iterative-deepening negamax search.
//!
//! A [`Searcher`] holds the per-search mutable state: node counter, killer
//! table, principal variation and the cancellation flag it polls. Positions are
//! never shared between searches; every branch works on its own copy.

pub mod constants;
mod iterative;
mod killers;
mod negamax;
mod ordering;
mod parallel;

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use constants::{CHECKMATE, INFINITY, KILLER_SCORE, MATE_THRESHOLD, STALEMATE};
pub use iterative::{DepthOutcome, SearchResult};
pub use killers::KillerMoveHistory;
pub use ordering::{move_score, mvv_lva, order_moves};
pub use parallel::run_search_task;

use crate::board::types::{Move, MAX_PLY};
use crate::pool::{SearchTask, WorkerPool};
use crate::sync::StopFlag;
use constants::DEFAULT_POLL_INTERVAL_LOG2;

/// Knobs that change how nodes are searched
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchOptions {
    /// Continue with captures at the horizon instead of evaluating statically
    pub quiescence: bool,
    /// The stop flag is read once every `2^poll_interval_log2` nodes
    pub poll_interval_log2: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            quiescence: false,
            poll_interval_log2: DEFAULT_POLL_INTERVAL_LOG2,
        }
    }
}

/// Triangular principal-variation table
#[derive(Clone, Debug)]
pub(crate) struct PvTable {
    lines: Box<[[Move; MAX_PLY]; MAX_PLY]>,
    lengths: [usize; MAX_PLY],
}

impl PvTable {
    pub(crate) fn new() -> Self {
        PvTable {
            lines: Box::new([[Move::NULL; MAX_PLY]; MAX_PLY]),
            lengths: [0; MAX_PLY],
        }
    }

    #[inline]
    pub(crate) fn clear_ply(&mut self, ply: usize) {
        if ply < MAX_PLY {
            self.lengths[ply] = 0;
        }
    }

    /// `mv` followed by the line found one ply deeper becomes the line at `ply`
    pub(crate) fn update(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        self.lines[ply][0] = mv;
        let mut len = 1;
        if ply + 1 < MAX_PLY {
            let child_len = self.lengths[ply + 1].min(MAX_PLY - 1);
            let (head, tail) = self.lines.split_at_mut(ply + 1);
            head[ply][1..=child_len].copy_from_slice(&tail[0][..child_len]);
            len += child_len;
        }
        self.lengths[ply] = len;
    }

    /// Overwrite the line at `ply`, truncated to what fits below it
    pub(crate) fn set_line(&mut self, ply: usize, line: &[Move]) {
        if ply >= MAX_PLY {
            return;
        }
        let len = line.len().min(MAX_PLY - ply);
        self.lines[ply][..len].copy_from_slice(&line[..len]);
        self.lengths[ply] = len;
    }

    pub(crate) fn line(&self, ply: usize) -> &[Move] {
        if ply >= MAX_PLY {
            return &[];
        }
        &self.lines[ply][..self.lengths[ply]]
    }
}

impl Default for PvTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-search state for negamax with alpha-beta pruning
pub struct Searcher {
    stop: StopFlag,
    options: SearchOptions,
    poll_mask: u64,
    cancelled: bool,
    nodes: u64,
    killers: KillerMoveHistory,
    pv: PvTable,
    pool: Option<Arc<WorkerPool<SearchTask>>>,
}

impl Searcher {
    #[must_use]
    pub fn new(stop: StopFlag, options: SearchOptions) -> Self {
        let poll_mask = (1u64 << options.poll_interval_log2.min(32)) - 1;
        Searcher {
            stop,
            options,
            poll_mask,
            cancelled: false,
            nodes: 0,
            killers: KillerMoveHistory::new(),
            pv: PvTable::new(),
            pool: None,
        }
    }

    /// Split each root ply across `pool` instead of searching it on this thread
    #[must_use]
    pub fn with_pool(mut self, pool: Arc<WorkerPool<SearchTask>>) -> Self {
        self.pool = Some(pool);
        self
    }

    #[must_use]
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// True once cancellation has been observed
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    #[must_use]
    pub fn killers(&self) -> &KillerMoveHistory {
        &self.killers
    }

    /// Principal variation of the last completed root search
    #[must_use]
    pub fn principal_variation(&self) -> &[Move] {
        self.pv.line(0)
    }

    /// Count a node and, every `2^poll_interval_log2` nodes, read the stop flag.
    /// Cancellation latches: once seen, every later call reports it.
    #[inline]
    fn tick(&mut self) -> bool {
        self.nodes += 1;
        if !self.cancelled && self.nodes & self.poll_mask == 0 && self.stop.is_stopped() {
            self.cancelled = true;
        }
        self.cancelled
    }
}
