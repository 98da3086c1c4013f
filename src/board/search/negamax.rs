use super::constants::{CANCELLED, CHECKMATE, INFINITY, STALEMATE};
use super::ordering::order_moves;
use super::Searcher;
use crate::board::types::{Color, Move};
use crate::board::Position;

/// Score of a node with no legal moves for `side`
#[inline]
pub(super) fn terminal_score(pos: &Position, side: Color, depth: u32) -> i32 {
    if pos.in_check(side) {
        CHECKMATE - depth as i32
    } else {
        STALEMATE
    }
}

impl Searcher {
    /// Alpha-beta negamax. `depth` is the remaining depth, `ply` the distance
    /// from the root. Returns `CANCELLED` as soon as cancellation is observed.
    pub(crate) fn negamax(
        &mut self,
        pos: &Position,
        side: Color,
        depth: u32,
        ply: usize,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        if self.tick() {
            return CANCELLED;
        }
        self.pv.clear_ply(ply);

        if depth == 0 {
            return if self.options.quiescence {
                self.quiesce(pos, side, ply, alpha, beta)
            } else {
                pos.evaluate(side)
            };
        }

        let ordered = order_moves(&pos.generate_moves(side), &self.killers.at(ply));
        let mut best = -INFINITY;
        let mut any_legal = false;

        for scored in ordered.iter() {
            let mv = scored.mv;
            let Some(next) = pos.make_legal_move(side, mv) else {
                continue;
            };
            any_legal = true;

            let score = -self.negamax(&next, side.opponent(), depth - 1, ply + 1, -beta, -alpha);
            if self.cancelled {
                return CANCELLED;
            }

            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
                self.pv.update(ply, mv);
            }
            if alpha >= beta {
                self.killers.record(ply, mv);
                break;
            }
        }

        if !any_legal {
            return terminal_score(pos, side, depth);
        }
        best
    }

    /// Capture-only search below the horizon with a stand-pat bound.
    pub(crate) fn quiesce(
        &mut self,
        pos: &Position,
        side: Color,
        ply: usize,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        if self.tick() {
            return CANCELLED;
        }
        self.pv.clear_ply(ply);

        let stand_pat = pos.evaluate(side);
        if stand_pat >= beta {
            return stand_pat;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let ordered = order_moves(&pos.generate_captures(side), &[Move::NULL; 2]);
        for scored in ordered.iter() {
            let mv = scored.mv;
            let Some(next) = pos.make_legal_move(side, mv) else {
                continue;
            };
            let score = -self.quiesce(&next, side.opponent(), ply + 1, -beta, -alpha);
            if self.cancelled {
                return CANCELLED;
            }
            if score >= beta {
                return score;
            }
            if score > alpha {
                alpha = score;
                self.pv.update(ply, mv);
            }
        }
        alpha
    }

    /// Unpruned full-width negamax to `depth`, for checking the pruned search.
    ///
    /// Root moves are tried in the same order the pruned root uses and a later
    /// move only replaces the best on a strictly higher score. Leaves are
    /// evaluated statically regardless of the quiescence option. The stop flag
    /// is not consulted.
    pub fn reference_negamax(&mut self, pos: &Position, side: Color, depth: u32) -> (Option<Move>, i32) {
        if depth == 0 {
            return (None, pos.evaluate(side));
        }
        let ordered = order_moves(&pos.generate_moves(side), &self.killers.at(0));
        let mut best_move = None;
        let mut best = -INFINITY;
        for scored in ordered.iter() {
            let Some(next) = pos.make_legal_move(side, scored.mv) else {
                continue;
            };
            let score = -self.full_width(&next, side.opponent(), depth - 1);
            if best_move.is_none() || score > best {
                best = score;
                best_move = Some(scored.mv);
            }
        }
        match best_move {
            Some(mv) => (Some(mv), best),
            None => (None, terminal_score(pos, side, depth)),
        }
    }

    fn full_width(&mut self, pos: &Position, side: Color, depth: u32) -> i32 {
        self.nodes += 1;
        if depth == 0 {
            return pos.evaluate(side);
        }
        let mut best = -INFINITY;
        let mut any_legal = false;
        for &mv in &pos.generate_moves(side) {
            if let Some(next) = pos.make_legal_move(side, mv) {
                any_legal = true;
                best = best.max(-self.full_width(&next, side.opponent(), depth - 1));
            }
        }
        if any_legal {
            best
        } else {
            terminal_score(pos, side, depth)
        }
    }
}
