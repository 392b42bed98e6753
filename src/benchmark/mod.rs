//! Benchmark orchestration and workers
//!
//! This module provides the multi-threaded benchmark execution system:
//! - GlobalCounters: atomic progress counters shared across workers
//! - TrialWorker: one worker consuming its operation stream under the lock
//! - Harness: populates the set, runs the thread-count sweep, times trials

pub mod counters;
pub mod harness;
pub mod worker;

pub use counters::GlobalCounters;
pub use harness::{Harness, TrialResult};
pub use worker::{OpStats, TrialWorker, WorkerResult};
