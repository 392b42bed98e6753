//! Global atomic counters for cross-thread progress tracking
//!
//! These counters exist for observability only: the progress reporter
//! polls them, but workers never block on them. Relaxed ordering keeps
//! the cost of a counter bump negligible next to a lock acquisition.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Counters shared between the workers of one trial and its progress
/// reporter.
pub struct GlobalCounters {
    /// Operations completed so far (all workers combined)
    ops_finished: AtomicU64,

    /// Shutdown signal for the progress reporter
    shutdown: AtomicBool,

    /// Total operations the trial will execute
    total_operations: u64,
}

impl GlobalCounters {
    /// Create counters for a trial of `total` operations
    pub fn with_operations(total: u64) -> Self {
        Self {
            ops_finished: AtomicU64::new(0),
            shutdown: AtomicBool::new(false),
            total_operations: total,
        }
    }

    /// Record completed operations
    #[inline]
    pub fn record_finished(&self, count: u64) {
        self.ops_finished.fetch_add(count, Ordering::Relaxed);
    }

    /// Operations completed so far
    #[inline]
    pub fn finished(&self) -> u64 {
        self.ops_finished.load(Ordering::Relaxed)
    }

    /// Total operations the trial will execute
    pub fn total(&self) -> u64 {
        self.total_operations
    }

    /// True once every operation has been recorded
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.finished() >= self.total_operations
    }

    /// Signal the progress reporter to stop
    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Check if shutdown has been signaled
    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_record_and_progress() {
        let counters = GlobalCounters::with_operations(100);

        assert_eq!(counters.finished(), 0);
        assert!(!counters.is_complete());

        counters.record_finished(60);
        counters.record_finished(40);

        assert_eq!(counters.finished(), 100);
        assert!(counters.is_complete());
    }

    #[test]
    fn test_concurrent_records_sum_exactly() {
        let counters = GlobalCounters::with_operations(4000);

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..1000 {
                        counters.record_finished(1);
                    }
                });
            }
        });

        assert_eq!(counters.finished(), 4000);
        assert!(counters.is_complete());
    }

    #[test]
    fn test_shutdown_signal() {
        let counters = GlobalCounters::with_operations(10);

        assert!(!counters.is_shutdown());
        counters.signal_shutdown();
        assert!(counters.is_shutdown());
    }
}
