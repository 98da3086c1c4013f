//! Root splitting over the worker pool.
//!
//! Every legal root move becomes one [`SearchTask`] searched with a full window
//! on its own position copy and its own killer table. Tasks finish in any
//! order; results are read from the per-task slots after the pool drains, and
//! the best score wins with ties going to the earlier root move.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::constants::INFINITY;
use super::iterative::DepthOutcome;
use super::negamax::terminal_score;
use super::ordering::order_moves;
use super::Searcher;
use crate::board::types::{Color, Move};
use crate::board::Position;
use crate::pool::{SearchTask, TaskResult};

/// Worker function: search one task and fill its result slot.
pub fn run_search_task(task: SearchTask) {
    let mut searcher = Searcher::new(task.stop.clone(), task.options);
    let score = searcher.negamax(&task.position, task.side, task.depth, 1, task.alpha, task.beta);
    task.result.score.store(score, Ordering::Relaxed);
    task.result.nodes.store(searcher.nodes, Ordering::Relaxed);
    *task.result.pv.lock() = searcher.pv.line(1).to_vec();
}

impl Searcher {
    pub(super) fn search_depth_parallel(
        &mut self,
        pos: &Position,
        side: Color,
        depth: u32,
    ) -> DepthOutcome {
        let Some(pool) = self.pool.clone() else {
            return DepthOutcome::Aborted;
        };

        let ordered = order_moves(&pos.generate_moves(side), &self.killers.at(0));
        let mut submitted: Vec<(Move, Arc<TaskResult>)> = Vec::with_capacity(ordered.len());
        for scored in ordered.iter() {
            let Some(next) = pos.make_legal_move(side, scored.mv) else {
                continue;
            };
            let result = Arc::new(TaskResult::default());
            pool.assign(SearchTask {
                position: next,
                side: side.opponent(),
                depth: depth - 1,
                alpha: -INFINITY,
                beta: INFINITY,
                stop: self.stop.clone(),
                options: self.options,
                result: Arc::clone(&result),
            });
            submitted.push((scored.mv, result));
        }
        pool.wait();

        self.nodes += submitted
            .iter()
            .map(|(_, result)| result.nodes.load(Ordering::Relaxed))
            .sum::<u64>();
        if self.stop.is_stopped() {
            self.cancelled = true;
            return DepthOutcome::Aborted;
        }

        let mut best: Option<(Move, i32, &Arc<TaskResult>)> = None;
        for (mv, result) in &submitted {
            let score = -result.score.load(Ordering::Relaxed);
            if best.map_or(true, |(_, best_score, _)| score > best_score) {
                best = Some((*mv, score, result));
            }
        }

        match best {
            Some((best_move, score, result)) => {
                self.pv.clear_ply(1);
                let child_line = result.pv.lock().clone();
                self.pv.set_line(1, &child_line);
                self.pv.update(0, best_move);
                DepthOutcome::Complete { best_move, score }
            }
            None => DepthOutcome::NoLegalMoves {
                score: terminal_score(pos, side, depth),
            },
        }
    }
}
