//! Timer utilities for search time management.
//!
//! A deadline timer is one background thread that waits out the search's time
//! budget and then sets the search's stop flag. Cancelling wakes the thread so
//! it exits without touching the flag.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::debug;
use parking_lot::{Condvar, Mutex};

use crate::sync::StopFlag;

/// Calculate the duration from now until a deadline, if the deadline is in the future.
///
/// Returns `None` if the deadline has already passed.
#[inline]
fn duration_until(deadline: Instant) -> Option<Duration> {
    let now = Instant::now();
    if deadline > now {
        Some(deadline - now)
    } else {
        None
    }
}

#[derive(Default)]
struct CancelSignal {
    cancelled: Mutex<bool>,
    wake: Condvar,
}

/// A timer that signals a stop flag when a deadline is reached.
pub struct DeadlineTimer {
    handle: Option<JoinHandle<()>>,
    signal: Arc<CancelSignal>,
    deadline: Instant,
}

impl DeadlineTimer {
    /// Start a timer thread that stops `stop_flag` after `duration`.
    ///
    /// Returns `Ok(None)` for a zero duration (no time limit).
    pub fn start(duration: Duration, stop_flag: StopFlag) -> io::Result<Option<Self>> {
        if duration.is_zero() {
            return Ok(None);
        }

        let deadline = Instant::now() + duration;
        let signal = Arc::new(CancelSignal::default());
        let thread_signal = Arc::clone(&signal);
        let handle = thread::Builder::new()
            .name("search-timer".to_string())
            .spawn(move || {
                let mut cancelled = thread_signal.cancelled.lock();
                while !*cancelled {
                    if thread_signal.wake.wait_until(&mut cancelled, deadline).timed_out() {
                        if !*cancelled {
                            debug!("search deadline reached");
                            stop_flag.stop();
                        }
                        break;
                    }
                }
            })?;

        Ok(Some(DeadlineTimer {
            handle: Some(handle),
            signal,
            deadline,
        }))
    }

    /// Time left before the deadline, zero once it has passed.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        duration_until(self.deadline).unwrap_or(Duration::ZERO)
    }

    /// Stop the timer thread without setting the flag and wait for it.
    /// Calling this more than once is harmless.
    pub fn cancel(&mut self) {
        *self.signal.cancelled.lock() = true;
        self.signal.wake.notify_all();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_triggers() {
        let flag = StopFlag::new();
        let timer = DeadlineTimer::start(Duration::from_millis(30), flag.clone()).unwrap();
        assert!(timer.is_some());

        thread::sleep(Duration::from_millis(150));
        assert!(flag.is_stopped());
        assert_eq!(timer.unwrap().remaining(), Duration::ZERO);
    }

    #[test]
    fn test_timer_zero_duration() {
        let flag = StopFlag::new();
        let timer = DeadlineTimer::start(Duration::ZERO, flag.clone()).unwrap();
        assert!(timer.is_none());
        assert!(!flag.is_stopped());
    }

    #[test]
    fn test_cancel_leaves_flag_clear() {
        let flag = StopFlag::new();
        let mut timer = DeadlineTimer::start(Duration::from_secs(30), flag.clone())
            .unwrap()
            .unwrap();
        assert!(timer.remaining() > Duration::from_secs(1));
        let started = Instant::now();
        timer.cancel();
        timer.cancel();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!flag.is_stopped());
    }
}
