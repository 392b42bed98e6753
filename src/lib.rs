//! setlock-benchmark library
//!
//! Benchmarks coarse-grained synchronization strategies (one mutex vs.
//! one reader/writer lock) over a shared sorted linked set, driving a
//! probabilistic member/insert/delete workload across a sweep of thread
//! counts.

pub mod benchmark;
pub mod config;
pub mod report;
pub mod set;
pub mod sync;
pub mod utils;
pub mod workload;
