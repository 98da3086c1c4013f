//! Synchronization primitives for the chess engine.
//!
//! Provides thread-safe utilities for search control.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A thread-safe stop flag for controlling search termination.
///
/// Clones share the same flag. Each search gets a fresh flag so a timer left
/// over from an earlier search can never stop a later one.
#[derive(Clone, Debug)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new stop flag (initially not stopped).
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Create a stop flag that is already set.
    #[must_use]
    pub fn stopped() -> Self {
        StopFlag(Arc::new(AtomicBool::new(true)))
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_flag_lifecycle() {
        let flag = StopFlag::new();
        assert!(!flag.is_stopped());

        flag.stop();
        assert!(flag.is_stopped());
        flag.stop();
        assert!(flag.is_stopped());
    }

    #[test]
    fn test_stop_flag_clone_shares_state() {
        let flag1 = StopFlag::new();
        let flag2 = flag1.clone();

        flag1.stop();
        assert!(flag2.is_stopped());
        assert!(StopFlag::stopped().is_stopped());
    }

    #[test]
    fn test_stop_flag_across_threads() {
        let flag = StopFlag::new();
        let remote = flag.clone();
        std::thread::spawn(move || remote.stop()).join().unwrap();
        assert!(flag.is_stopped());
    }
}
