//! Fixed-size worker pool for independent search branches.
//!
//! One mutex guards the task queue, the pending count and the stop flag. Workers
//! sleep on `work_available`; callers of [`WorkerPool::wait`] sleep on
//! `all_done`, which the worker finishing the last pending task signals.
//! A task that panics is logged and counted as finished; its worker carries on.

use std::collections::VecDeque;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicI32, AtomicU64};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, warn};
use parking_lot::{Condvar, Mutex};

use crate::board::search::SearchOptions;
use crate::board::{Color, Move, Position};
use crate::sync::StopFlag;

/// Stack size for pool workers, which run deep recursive searches
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

/// The function every worker applies to each task
pub type TaskFn<T> = Arc<dyn Fn(T) + Send + Sync>;

/// One subtree to search: a position snapshot and where to put the answer
#[derive(Clone, Debug)]
pub struct SearchTask {
    pub position: Position,
    /// Side to move in `position`
    pub side: Color,
    pub depth: u32,
    pub alpha: i32,
    pub beta: i32,
    pub stop: StopFlag,
    pub options: SearchOptions,
    /// Written by the worker, read by the submitter after `wait`
    pub result: Arc<TaskResult>,
}

/// Output slot of a [`SearchTask`]
#[derive(Debug, Default)]
pub struct TaskResult {
    /// Score from the task side's point of view
    pub score: AtomicI32,
    pub nodes: AtomicU64,
    /// Principal variation below the task position
    pub pv: Mutex<Vec<Move>>,
}

struct PoolState<T> {
    queue: VecDeque<T>,
    pending: usize,
    stopping: bool,
}

struct Shared<T> {
    state: Mutex<PoolState<T>>,
    work_available: Condvar,
    all_done: Condvar,
}

/// Decrements the pending count when a task finishes
struct PendingGuard<'a, T> {
    shared: &'a Shared<T>,
}

impl<T> Drop for PendingGuard<'_, T> {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.pending -= 1;
        if state.pending == 0 {
            self.shared.all_done.notify_all();
        }
    }
}

pub struct WorkerPool<T: Send + 'static> {
    shared: Arc<Shared<T>>,
    workers: Vec<JoinHandle<()>>,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Start `threads` workers (at least one) that run `job` on every task.
    pub fn new(threads: usize, job: TaskFn<T>) -> io::Result<Self> {
        let shared = Arc::new(Shared {
            state: Mutex::new(PoolState {
                queue: VecDeque::new(),
                pending: 0,
                stopping: false,
            }),
            work_available: Condvar::new(),
            all_done: Condvar::new(),
        });
        let mut pool = WorkerPool {
            shared,
            workers: Vec::with_capacity(threads.max(1)),
        };

        for id in 0..threads.max(1) {
            let shared = Arc::clone(&pool.shared);
            let job = Arc::clone(&job);
            // on failure `pool` drops here and joins the workers already started
            let handle = thread::Builder::new()
                .name(format!("search-worker-{id}"))
                .stack_size(WORKER_STACK_SIZE)
                .spawn(move || worker_loop(&shared, &job))?;
            pool.workers.push(handle);
        }
        debug!("worker pool started with {} threads", pool.workers.len());
        Ok(pool)
    }

    #[must_use]
    pub fn threads(&self) -> usize {
        self.workers.len()
    }

    /// Queue a task for the next idle worker
    pub fn assign(&self, task: T) {
        let mut state = self.shared.state.lock();
        state.queue.push_back(task);
        state.pending += 1;
        drop(state);
        self.shared.work_available.notify_one();
    }

    /// Block until every assigned task has finished
    pub fn wait(&self) {
        let mut state = self.shared.state.lock();
        while state.pending > 0 {
            self.shared.all_done.wait(&mut state);
        }
    }

    /// Stop the workers once the queue is drained and join them. Idempotent.
    pub fn shutdown(&mut self) {
        self.shared.state.lock().stopping = true;
        self.shared.work_available.notify_all();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

impl<T: Send + 'static> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop<T>(shared: &Shared<T>, job: &TaskFn<T>) {
    loop {
        let task = {
            let mut state = shared.state.lock();
            loop {
                if let Some(task) = state.queue.pop_front() {
                    break Some(task);
                }
                if state.stopping {
                    break None;
                }
                shared.work_available.wait(&mut state);
            }
        };
        let Some(task) = task else {
            return;
        };
        let _guard = PendingGuard { shared };
        if panic::catch_unwind(AssertUnwindSafe(|| job(task))).is_err() {
            warn!(
                "task panicked on {}",
                thread::current().name().unwrap_or("pool worker")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn wait_sees_every_task_finish() {
        let sum = Arc::new(AtomicUsize::new(0));
        let job_sum = Arc::clone(&sum);
        let pool: WorkerPool<usize> = WorkerPool::new(
            4,
            Arc::new(move |n| {
                job_sum.fetch_add(n, Ordering::SeqCst);
            }),
        )
        .unwrap();
        assert_eq!(pool.threads(), 4);

        for n in 1..=100 {
            pool.assign(n);
        }
        pool.wait();
        assert_eq!(sum.load(Ordering::SeqCst), 5050);

        // the pool is reusable after a wait
        pool.assign(1);
        pool.wait();
        assert_eq!(sum.load(Ordering::SeqCst), 5051);
    }

    #[test]
    fn wait_with_nothing_assigned_returns() {
        let pool: WorkerPool<()> = WorkerPool::new(2, Arc::new(|()| {})).unwrap();
        pool.wait();
    }

    #[test]
    fn shutdown_is_idempotent_and_drains_queue() {
        let count = Arc::new(AtomicUsize::new(0));
        let job_count = Arc::clone(&count);
        let mut pool: WorkerPool<()> = WorkerPool::new(
            1,
            Arc::new(move |()| {
                job_count.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();
        for _ in 0..10 {
            pool.assign(());
        }
        pool.shutdown();
        pool.shutdown();
        assert_eq!(count.load(Ordering::SeqCst), 10);
        assert_eq!(pool.threads(), 0);
    }

    #[test]
    fn panicking_task_leaves_worker_running() {
        let count = Arc::new(AtomicUsize::new(0));
        let job_count = Arc::clone(&count);
        let pool: WorkerPool<usize> = WorkerPool::new(
            1,
            Arc::new(move |n| {
                if n % 3 == 0 {
                    panic!("task {n} failed");
                }
                job_count.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();
        for n in 0..9 {
            pool.assign(n);
        }
        pool.wait();
        assert_eq!(count.load(Ordering::SeqCst), 6);

        pool.assign(1);
        pool.wait();
        assert_eq!(count.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn zero_threads_still_starts_one_worker() {
        let pool: WorkerPool<()> = WorkerPool::new(0, Arc::new(|()| {})).unwrap();
        assert_eq!(pool.threads(), 1);
        pool.assign(());
        pool.wait();
    }
}
