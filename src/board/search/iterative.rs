use log::{debug, warn};

use super::constants::{INFINITY, MATE_THRESHOLD};
use super::negamax::terminal_score;
use super::ordering::order_moves;
use super::Searcher;
use crate::board::types::{Color, Move};
use crate::board::Position;

/// Result of searching the root to one fixed depth
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthOutcome {
    /// The depth finished; `score` is from the root side's point of view
    Complete { best_move: Move, score: i32 },
    /// The root side has no legal move (checkmate or stalemate score)
    NoLegalMoves { score: i32 },
    /// Cancelled before the depth finished; nothing from it is usable
    Aborted,
}

/// Best line found by a search
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the root side has no legal move
    pub best_move: Option<Move>,
    /// Score of the last completed depth, from the root side's point of view
    pub score: i32,
    /// Last completed depth, 0 if none finished
    pub depth: u32,
    pub nodes: u64,
    pub pv: Vec<Move>,
    /// No legal move at the root
    pub game_over: bool,
}

impl SearchResult {
    /// Principal variation in UCI notation separated by spaces
    #[must_use]
    pub fn pv_string(&self) -> String {
        self.pv
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn is_mate_score(&self) -> bool {
        self.score.abs() >= MATE_THRESHOLD
    }
}

impl Searcher {
    /// Search the root of `pos` to `depth` plies with a full window.
    pub fn search_depth(&mut self, pos: &Position, side: Color, depth: u32) -> DepthOutcome {
        let depth = depth.max(1);
        if self.pool.is_some() && depth > 1 {
            return self.search_depth_parallel(pos, side, depth);
        }

        self.pv.clear_ply(0);
        let ordered = order_moves(&pos.generate_moves(side), &self.killers.at(0));
        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best: Option<(Move, i32)> = None;

        for scored in ordered.iter() {
            let mv = scored.mv;
            let Some(next) = pos.make_legal_move(side, mv) else {
                continue;
            };
            let score = -self.negamax(&next, side.opponent(), depth - 1, 1, -beta, -alpha);
            if self.cancelled {
                return DepthOutcome::Aborted;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
                self.pv.update(0, mv);
            }
            if score > alpha {
                alpha = score;
            }
        }

        match best {
            Some((best_move, score)) => DepthOutcome::Complete { best_move, score },
            None => DepthOutcome::NoLegalMoves {
                score: terminal_score(pos, side, depth),
            },
        }
    }

    /// Iterative deepening from depth 1 to `max_depth`.
    ///
    /// Each completed depth replaces the previous result; a cancelled depth is
    /// discarded. `on_iteration` runs after every completed depth. If even depth
    /// 1 is cancelled, the first legal move in generation order is returned at
    /// depth 0 so a move is always available.
    pub fn iterative_deepening<F>(
        &mut self,
        pos: &Position,
        side: Color,
        max_depth: u32,
        mut on_iteration: F,
    ) -> SearchResult
    where
        F: FnMut(&SearchResult),
    {
        let mut result = SearchResult::default();

        for depth in 1..=max_depth.max(1) {
            match self.search_depth(pos, side, depth) {
                DepthOutcome::Complete { best_move, score } => {
                    result.best_move = Some(best_move);
                    result.score = score;
                    result.depth = depth;
                    result.nodes = self.nodes;
                    result.pv = self.principal_variation().to_vec();
                    if result.pv.first() != Some(&best_move) {
                        result.pv = vec![best_move];
                    }
                    debug!(
                        "depth {} score {} nodes {} pv {}",
                        depth,
                        score,
                        self.nodes,
                        result.pv_string()
                    );
                    on_iteration(&result);
                }
                DepthOutcome::NoLegalMoves { score } => {
                    result.score = score;
                    result.game_over = true;
                    result.nodes = self.nodes;
                    warn!("no legal moves for {side}, score {score}");
                    break;
                }
                DepthOutcome::Aborted => break,
            }
        }

        if result.best_move.is_none() && !result.game_over {
            match pos.legal_moves(side).iter().next().copied() {
                Some(mv) => {
                    result.best_move = Some(mv);
                    result.pv = vec![mv];
                    result.score = pos.evaluate(side);
                }
                None => {
                    result.game_over = true;
                    result.score = terminal_score(pos, side, 1);
                }
            }
            result.nodes = self.nodes;
        }
        result
    }
}
