//! Benchmark worker implementation
//!
//! Each worker owns its operation stream (and therefore its random
//! source) exclusively. The only cross-thread state it touches is the
//! guarded set itself and the relaxed progress counter.

use std::time::Instant;

use hdrhistogram::Histogram;

use super::counters::GlobalCounters;
use crate::sync::GuardedSet;
use crate::workload::{OpKind, OpStream};

/// Latency histogram bounds: 1ns to 60s, 3 significant digits
const HIST_LOW_NS: u64 = 1;
const HIST_HIGH_NS: u64 = 60_000_000_000;
const HIST_SIGFIGS: u8 = 3;

/// Per-kind outcome tallies.
///
/// A "hit" is a membership test that found its key, an insert that added
/// a new key, or a delete that removed one. Misses are the normal
/// complement (absent key, duplicate insert), never errors, and never
/// subtracted from operation totals.
#[derive(Debug, Default, Clone)]
pub struct OpStats {
    pub member_hits: u64,
    pub member_misses: u64,
    pub insert_added: u64,
    pub insert_duplicates: u64,
    pub delete_removed: u64,
    pub delete_misses: u64,
}

impl OpStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one operation outcome
    pub fn record(&mut self, kind: OpKind, hit: bool) {
        match (kind, hit) {
            (OpKind::Member, true) => self.member_hits += 1,
            (OpKind::Member, false) => self.member_misses += 1,
            (OpKind::Insert, true) => self.insert_added += 1,
            (OpKind::Insert, false) => self.insert_duplicates += 1,
            (OpKind::Delete, true) => self.delete_removed += 1,
            (OpKind::Delete, false) => self.delete_misses += 1,
        }
    }

    /// Fold another worker's tallies into this one
    pub fn merge(&mut self, other: &OpStats) {
        self.member_hits += other.member_hits;
        self.member_misses += other.member_misses;
        self.insert_added += other.insert_added;
        self.insert_duplicates += other.insert_duplicates;
        self.delete_removed += other.delete_removed;
        self.delete_misses += other.delete_misses;
    }

    /// Total operations across all kinds
    pub fn total(&self) -> u64 {
        self.member_hits
            + self.member_misses
            + self.insert_added
            + self.insert_duplicates
            + self.delete_removed
            + self.delete_misses
    }

    /// Net change in set size (inserts that landed minus deletes that
    /// landed)
    pub fn net_growth(&self) -> i64 {
        self.insert_added as i64 - self.delete_removed as i64
    }
}

/// Result from one worker
pub struct WorkerResult {
    /// Worker ID
    pub worker_id: usize,
    /// Operations this worker executed
    pub ops_executed: u64,
    /// Per-operation latencies in nanoseconds
    pub histogram: Histogram<u64>,
    /// Outcome tallies
    pub stats: OpStats,
}

/// One benchmark worker (runs on a dedicated OS thread).
///
/// Consumes its operation stream, dispatching each request to the shared
/// set through whichever locking discipline the trial is using.
pub struct TrialWorker {
    id: usize,
    stream: OpStream,
    histogram: Histogram<u64>,
    stats: OpStats,
}

impl TrialWorker {
    /// Create a worker over its private operation stream
    pub fn new(id: usize, stream: OpStream) -> Self {
        let histogram = Histogram::new_with_bounds(HIST_LOW_NS, HIST_HIGH_NS, HIST_SIGFIGS)
            .expect("Failed to create histogram");
        Self {
            id,
            stream,
            histogram,
            stats: OpStats::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Main worker loop: drain the stream against the shared set.
    pub fn run(mut self, set: &GuardedSet, counters: &GlobalCounters) -> WorkerResult {
        let mut ops_executed = 0u64;

        for op in &mut self.stream {
            let start = Instant::now();
            let hit = match op.kind {
                OpKind::Member => set.member(op.value),
                OpKind::Insert => set.insert(op.value),
                OpKind::Delete => set.delete(op.value),
            };
            self.histogram
                .record(start.elapsed().as_nanos() as u64)
                .ok();

            self.stats.record(op.kind, hit);
            ops_executed += 1;
            counters.record_finished(1);
        }

        WorkerResult {
            worker_id: self.id,
            ops_executed,
            histogram: self.histogram,
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::OrderedSet;
    use crate::sync::LockStrategy;
    use crate::workload::OpMix;

    #[test]
    fn test_op_stats_record_and_total() {
        let mut stats = OpStats::new();

        stats.record(OpKind::Member, true);
        stats.record(OpKind::Member, false);
        stats.record(OpKind::Insert, true);
        stats.record(OpKind::Insert, false);
        stats.record(OpKind::Delete, true);
        stats.record(OpKind::Delete, false);

        assert_eq!(stats.member_hits, 1);
        assert_eq!(stats.insert_duplicates, 1);
        assert_eq!(stats.delete_misses, 1);
        assert_eq!(stats.total(), 6);
        assert_eq!(stats.net_growth(), 0);
    }

    #[test]
    fn test_op_stats_merge() {
        let mut a = OpStats::new();
        a.record(OpKind::Insert, true);
        a.record(OpKind::Member, true);

        let mut b = OpStats::new();
        b.record(OpKind::Insert, true);
        b.record(OpKind::Delete, false);

        a.merge(&b);
        assert_eq!(a.insert_added, 2);
        assert_eq!(a.delete_misses, 1);
        assert_eq!(a.total(), 4);
        assert_eq!(a.net_growth(), 2);
    }

    #[test]
    fn test_worker_executes_exact_budget() {
        let mix = OpMix::new(0.6, 0.2, 0.2).unwrap();
        let guarded = GuardedSet::new(LockStrategy::Mutex, OrderedSet::new());
        let counters = GlobalCounters::with_operations(500);

        let worker = TrialWorker::new(0, OpStream::new(11, mix, 64, 500));
        let result = worker.run(&guarded, &counters);

        assert_eq!(result.ops_executed, 500);
        assert_eq!(result.stats.total(), 500);
        assert_eq!(result.histogram.len(), 500);
        assert_eq!(counters.finished(), 500);
        assert!(counters.is_complete());
    }

    #[test]
    fn test_worker_outcomes_track_set_size() {
        // Net inserted-minus-deleted must equal the final set size when
        // starting from empty.
        let mix = OpMix::new(0.0, 0.5, 0.5).unwrap();
        let guarded = GuardedSet::new(LockStrategy::Rwlock, OrderedSet::new());
        let counters = GlobalCounters::with_operations(2000);

        let worker = TrialWorker::new(0, OpStream::new(5, mix, 32, 2000));
        let result = worker.run(&guarded, &counters);

        assert_eq!(result.stats.net_growth(), guarded.len() as i64);
    }
}
