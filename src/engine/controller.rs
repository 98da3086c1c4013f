//! Engine handle: owns the current position and runs searches in the background.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info};
use parking_lot::Mutex;

use super::config::EngineConfig;
use super::EngineError;
use crate::board::attack_tables;
use crate::board::search::run_search_task;
use crate::board::{
    parse_fen, Color, Move, MoveError, PieceKind, Position, SearchResult, Searcher, Square,
};
use crate::pool::{SearchTask, WorkerPool};
use crate::sync::StopFlag;
use crate::timer::DeadlineTimer;

/// Search thread stack size (32 MB)
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Snapshot returned by [`Engine::search_info`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchInfo {
    /// The search thread has finished
    pub done: bool,
    /// Score of the last completed depth in centipawns, side to move's view
    pub score_cp: i32,
    /// Last completed depth
    pub depth: u32,
    pub nodes: u64,
    pub nps: u64,
    /// Milliseconds left in the time budget, 0 without a budget
    pub time_remaining_ms: u64,
    /// Principal variation in UCI notation
    pub pv: String,
}

/// Progress shared between the search thread and the handle
struct Progress {
    done: bool,
    started: Instant,
    deadline: Option<Instant>,
    score: i32,
    depth: u32,
    nodes: u64,
    pv: String,
    best_move: Option<Move>,
}

impl Progress {
    fn idle() -> Self {
        Progress {
            done: true,
            started: Instant::now(),
            deadline: None,
            score: 0,
            depth: 0,
            nodes: 0,
            pv: String::new(),
            best_move: None,
        }
    }

    fn started(deadline: Option<Instant>) -> Self {
        Progress {
            done: false,
            deadline,
            ..Progress::idle()
        }
    }

    fn record(&mut self, result: &SearchResult) {
        self.score = result.score;
        self.depth = result.depth;
        self.nodes = result.nodes;
        self.pv = result.pv_string();
        self.best_move = result.best_move;
    }
}

/// Active search job state
struct SearchJob {
    stop: StopFlag,
    handle: JoinHandle<()>,
}

impl SearchJob {
    /// Stop the search and wait for the thread to finish
    fn stop_and_wait(self) {
        self.stop.stop();
        let _ = self.handle.join();
    }
}

/// A chess engine instance. Every handle is independent; there is no global
/// engine state beyond the shared immutable attack tables.
pub struct Engine {
    config: EngineConfig,
    position: Position,
    side_to_move: Color,
    last_move: Option<Move>,
    progress: Arc<Mutex<Progress>>,
    current_job: Option<SearchJob>,
    pool: Option<Arc<WorkerPool<SearchTask>>>,
}

impl Engine {
    /// Create an engine at the starting position.
    ///
    /// Builds the attack tables on first use and, for more than one thread,
    /// starts the worker pool.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        attack_tables::init()?;

        let pool = if config.threads > 1 {
            let pool = WorkerPool::<SearchTask>::new(config.threads, Arc::new(run_search_task))
                .map_err(EngineError::ThreadSpawn)?;
            Some(Arc::new(pool))
        } else {
            None
        };

        info!(
            "engine ready: {} ms budget, depth {}, {} threads, quiescence {}",
            config.time_budget_ms, config.max_depth, config.threads, config.quiescence
        );
        Ok(Engine {
            config,
            position: Position::start(),
            side_to_move: Color::White,
            last_move: None,
            progress: Arc::new(Mutex::new(Progress::idle())),
            current_job: None,
            pool,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Side to move as set by the last position setter or applied move
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Replace the position; stops any running search.
    pub fn set_position(&mut self, position: Position, side: Color) {
        self.stop_search();
        self.position = position;
        self.side_to_move = side;
        self.last_move = None;
    }

    pub fn set_start_position(&mut self) {
        self.set_position(Position::start(), Color::White);
    }

    /// Board-only or full FEN. On error the current position is kept.
    pub fn set_position_from_fen(&mut self, fen: &str) -> Result<(), EngineError> {
        let (position, side) = parse_fen(fen)?;
        self.set_position(position, side);
        Ok(())
    }

    /// 64-character board string in square order; White to move.
    pub fn set_position_from_board_string(&mut self, board: &str) -> Result<(), EngineError> {
        let position = Position::from_board_string(board)?;
        self.set_position(position, Color::White);
        Ok(())
    }

    #[must_use]
    pub fn board_string(&self) -> String {
        self.position.to_board_string()
    }

    #[must_use]
    pub fn fen(&self, side: Color) -> String {
        self.position.to_fen(side)
    }

    /// Source and destination of the last applied move
    #[must_use]
    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move.map(|mv| (mv.from(), mv.to()))
    }

    /// Apply the legal move of `side` from `from` to `to`, promoting to a queen.
    ///
    /// Castles are matched by the king's source and destination. On error the
    /// position is unchanged.
    pub fn apply_move(&mut self, side: Color, from: Square, to: Square) -> Result<Move, EngineError> {
        self.apply_move_promoting(side, from, to, PieceKind::Queen)
    }

    /// As [`Engine::apply_move`], with the piece kind a promoting pawn becomes.
    pub fn apply_move_promoting(
        &mut self,
        side: Color,
        from: Square,
        to: Square,
        promotion: PieceKind,
    ) -> Result<Move, EngineError> {
        self.stop_search();
        let found = self.position.legal_moves(side).iter().copied().find(|mv| {
            mv.from() == from
                && mv.to() == to
                && (!mv.is_promotion() || mv.promoted().kind() == Some(promotion))
        });
        let next = found.and_then(|mv| self.position.make_legal_move(side, mv).map(|pos| (mv, pos)));
        let Some((mv, position)) = next else {
            return Err(MoveError::IllegalMove { from, to }.into());
        };
        debug!("{side} plays {mv}");
        self.position = position;
        self.side_to_move = side.opponent();
        self.last_move = Some(mv);
        Ok(mv)
    }

    /// A search thread exists and has not finished
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.current_job.is_some() && !self.progress.lock().done
    }

    /// Start searching the current position for `side` in the background.
    pub fn start_search(&mut self, side: Color) -> Result<(), EngineError> {
        if self.is_searching() {
            return Err(EngineError::SearchRunning);
        }
        self.stop_search();

        let stop = StopFlag::new();
        let budget = Duration::from_millis(self.config.time_budget_ms);
        let deadline = (!budget.is_zero()).then(|| Instant::now() + budget);
        let timer = DeadlineTimer::start(budget, stop.clone()).map_err(EngineError::ThreadSpawn)?;
        *self.progress.lock() = Progress::started(deadline);

        let position = self.position;
        let options = self.config.search_options();
        let max_depth = self.config.max_depth;
        let progress = Arc::clone(&self.progress);
        let pool = self.pool.clone();
        let thread_stop = stop.clone();

        let spawned = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let _timer = timer;
                let mut searcher = Searcher::new(thread_stop, options);
                if let Some(pool) = pool {
                    searcher = searcher.with_pool(pool);
                }
                let result = searcher.iterative_deepening(&position, side, max_depth, |iteration| {
                    progress.lock().record(iteration);
                });
                info!(
                    "search finished: depth {} score {} nodes {} best {}",
                    result.depth,
                    result.score,
                    result.nodes,
                    result.best_move.map_or_else(|| "none".to_string(), |mv| mv.to_string())
                );
                let mut progress = progress.lock();
                progress.record(&result);
                progress.done = true;
            });

        match spawned {
            Ok(handle) => {
                self.current_job = Some(SearchJob { stop, handle });
                Ok(())
            }
            Err(err) => {
                self.progress.lock().done = true;
                Err(EngineError::ThreadSpawn(err))
            }
        }
    }

    /// Stop any active search and wait for it. Idempotent.
    pub fn stop_search(&mut self) {
        if let Some(job) = self.current_job.take() {
            job.stop_and_wait();
        }
    }

    /// Current progress of the running or last search
    #[must_use]
    pub fn search_info(&self) -> SearchInfo {
        let progress = self.progress.lock();
        let now = Instant::now();
        let elapsed_ms = now.duration_since(progress.started).as_millis().max(1) as u64;
        let time_remaining_ms = match (progress.done, progress.deadline) {
            (false, Some(deadline)) => deadline.saturating_duration_since(now).as_millis() as u64,
            _ => 0,
        };
        SearchInfo {
            done: progress.done,
            score_cp: progress.score,
            depth: progress.depth,
            nodes: progress.nodes,
            nps: progress.nodes.saturating_mul(1000) / elapsed_ms,
            time_remaining_ms,
            pv: progress.pv.clone(),
        }
    }

    /// Best move of the finished search.
    pub fn best_move(&self) -> Result<Move, EngineError> {
        let progress = self.progress.lock();
        if !progress.done {
            return Err(EngineError::SearchRunning);
        }
        progress.best_move.ok_or(EngineError::NoBestMove)
    }

    /// Block until the running search finishes on its own
    pub fn wait_for_search(&mut self) {
        if let Some(job) = self.current_job.take() {
            let _ = job.handle.join();
        }
    }

    /// Stop searching and release worker threads. Idempotent; also run on drop.
    pub fn shutdown(&mut self) {
        self.stop_search();
        if let Some(pool) = self.pool.take() {
            // the search thread is joined, so this is the last reference
            drop(pool);
            debug!("worker pool released");
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
