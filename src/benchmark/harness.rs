//! Benchmark harness
//!
//! Runs the thread-count sweep for one locking strategy. Every trial
//! gets a freshly populated set (no residual state carries over between
//! thread counts), a fixed operation budget split across its workers,
//! and a wall-clock measurement spanning first spawn to last join.

use std::thread;
use std::time::{Duration, Instant};

use hdrhistogram::Histogram;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use super::counters::GlobalCounters;
use super::worker::{OpStats, TrialWorker, WorkerResult};
use crate::config::BenchmarkConfig;
use crate::report::format_count;
use crate::set::OrderedSet;
use crate::sync::{GuardedSet, LockStrategy};
use crate::workload::{OpMix, OpStream};

/// Seed offset separating the population PRNG from worker 0's stream
const POPULATE_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Result of one trial: one thread count under one strategy
pub struct TrialResult {
    /// Locking strategy the trial ran under
    pub strategy: LockStrategy,
    /// Worker threads spawned
    pub thread_count: u32,
    /// Wall-clock time from first spawn to last join
    pub elapsed: Duration,
    /// Total operations executed (always the configured budget)
    pub operations: u64,
    /// Operation mix the workers ran
    pub mix: OpMix,
    /// Merged per-operation latencies in nanoseconds
    pub histogram: Histogram<u64>,
    /// Merged outcome tallies
    pub stats: OpStats,
}

impl TrialResult {
    /// Operations per second over the whole trial
    pub fn throughput(&self) -> f64 {
        self.operations as f64 / self.elapsed.as_secs_f64()
    }

    /// Percentile latency in microseconds
    pub fn percentile_us(&self, p: f64) -> f64 {
        self.histogram.value_at_percentile(p) as f64 / 1000.0
    }

    /// Print the per-trial console summary
    pub fn print_summary(&self) {
        println!(
            "Time with {} threads = {:.6} seconds",
            self.thread_count,
            self.elapsed.as_secs_f64()
        );
        println!(
            "  Throughput: {} ops/s | Operations: {}",
            format_count(self.throughput() as u64),
            format_count(self.operations)
        );
        println!(
            "  Latency (us): avg={:.2} p50={:.2} p95={:.2} p99={:.2} max={:.2}",
            self.histogram.mean() / 1000.0,
            self.percentile_us(50.0),
            self.percentile_us(95.0),
            self.percentile_us(99.0),
            self.histogram.max() as f64 / 1000.0
        );
        println!(
            "  Outcomes: member {}/{} hit | insert {} new, {} dup | delete {} removed, {} absent",
            format_count(self.stats.member_hits),
            format_count(self.stats.member_hits + self.stats.member_misses),
            format_count(self.stats.insert_added),
            format_count(self.stats.insert_duplicates),
            format_count(self.stats.delete_removed),
            format_count(self.stats.delete_misses)
        );
    }
}

/// Benchmark harness: owns the validated configuration and runs the
/// sweep trial by trial.
pub struct Harness {
    config: BenchmarkConfig,
}

impl Harness {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Run the configured thread-count sweep, one `TrialResult` per
    /// thread count.
    pub fn run_sweep(&self) -> Vec<TrialResult> {
        let mut results = Vec::with_capacity(self.config.threads.len());

        for &thread_count in &self.config.threads {
            info!(
                "running trial: strategy={} threads={}",
                self.config.strategy, thread_count
            );
            let result = self.run_trial(thread_count);
            if !self.config.quiet {
                result.print_summary();
            }
            results.push(result);
        }

        results
    }

    /// Run one trial: populate a fresh set, spawn the workers, time the
    /// run from just before the first spawn to just after the last join.
    pub fn run_trial(&self, thread_count: u32) -> TrialResult {
        debug!("populating {} unique keys", self.config.population);
        let set = self.populate();
        let guarded = GuardedSet::new(self.config.strategy, set);

        let shares = split_operations(self.config.operations, thread_count);
        let workers: Vec<TrialWorker> = shares
            .iter()
            .enumerate()
            .map(|(id, &ops)| {
                let stream = OpStream::new(
                    self.worker_seed(id),
                    self.config.mix,
                    self.config.domain as i32,
                    ops,
                );
                TrialWorker::new(id, stream)
            })
            .collect();

        let counters = GlobalCounters::with_operations(self.config.operations);
        debug!("spawning {} workers", thread_count);

        let (worker_results, elapsed) = thread::scope(|scope| {
            if !self.config.quiet {
                let counters = &counters;
                scope.spawn(move || report_progress(counters));
            }

            let start = Instant::now();

            let handles: Vec<_> = workers
                .into_iter()
                .map(|worker| {
                    let guarded = &guarded;
                    let counters = &counters;
                    thread::Builder::new()
                        .name(format!("worker-{}", worker.id()))
                        .spawn_scoped(scope, move || worker.run(guarded, counters))
                        .expect("Failed to spawn worker thread")
                })
                .collect();

            // Join all workers before reading the clock: elapsed time
            // covers every operation of the trial.
            let results: Vec<WorkerResult> = handles
                .into_iter()
                .map(|h| h.join().expect("Worker thread panicked"))
                .collect();

            let elapsed = start.elapsed();
            counters.signal_shutdown();
            (results, elapsed)
        });

        self.merge_results(thread_count, worker_results, elapsed)
    }

    /// Merge per-worker results into the trial result
    fn merge_results(
        &self,
        thread_count: u32,
        worker_results: Vec<WorkerResult>,
        elapsed: Duration,
    ) -> TrialResult {
        let mut histogram = Histogram::new_with_bounds(1, 60_000_000_000, 3)
            .expect("Failed to create histogram");
        let mut stats = OpStats::new();
        let mut operations = 0u64;

        for result in worker_results {
            histogram.add(&result.histogram).ok();
            stats.merge(&result.stats);
            operations += result.ops_executed;
        }

        TrialResult {
            strategy: self.config.strategy,
            thread_count,
            elapsed,
            operations,
            mix: self.config.mix,
            histogram,
            stats,
        }
    }

    /// Populate a fresh set with exactly `population` unique keys drawn
    /// uniformly without replacement from the domain.
    fn populate(&self) -> OrderedSet {
        let mut rng = fastrand::Rng::with_seed(self.populate_seed());
        let keys = sample_unique(
            &mut rng,
            self.config.population as u32,
            self.config.domain,
        );

        let mut set = OrderedSet::new();
        for key in keys {
            set.insert(key);
        }

        debug_assert_eq!(set.len() as u64, self.config.population);
        set
    }

    /// Worker i derives `seed + i`; seed 0 means fully random
    fn worker_seed(&self, worker_id: usize) -> u64 {
        if self.config.seed == 0 {
            fastrand::u64(..)
        } else {
            self.config.seed.wrapping_add(worker_id as u64)
        }
    }

    /// Population PRNG, kept apart from the worker seed sequence
    fn populate_seed(&self) -> u64 {
        if self.config.seed == 0 {
            fastrand::u64(..)
        } else {
            self.config.seed ^ POPULATE_SEED_MIX
        }
    }
}

/// Split `total` operations across `thread_count` workers: `total / T`
/// each, with the remainder going one-per-worker to the lowest-indexed
/// workers so no operation is dropped.
pub fn split_operations(total: u64, thread_count: u32) -> Vec<u64> {
    let threads = u64::from(thread_count);
    let base = total / threads;
    let remainder = total % threads;

    (0..threads)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Draw `n` distinct values uniformly from `[0, domain)`.
///
/// Sparse partial Fisher-Yates: the virtual array [0, domain) is never
/// materialized; only displaced slots are tracked, so memory scales with
/// `n`. Terminates after exactly `n` draws for any `n <= domain`.
fn sample_unique(rng: &mut fastrand::Rng, n: u32, domain: u32) -> Vec<i32> {
    use std::collections::HashMap;

    let mut displaced: HashMap<u32, u32> = HashMap::new();
    let mut keys = Vec::with_capacity(n as usize);

    for i in 0..n {
        let j = rng.u32(i..domain);
        let chosen = displaced.get(&j).copied().unwrap_or(j);
        let at_i = displaced.get(&i).copied().unwrap_or(i);
        displaced.insert(j, at_i);
        keys.push(chosen as i32);
    }

    keys
}

/// Poll the shared counters and render a progress bar until the trial
/// completes (or shutdown is signaled).
fn report_progress(counters: &GlobalCounters) {
    let pb = ProgressBar::new(counters.total());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({msg})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut last_finished = 0u64;
    let mut last_time = start;

    while !counters.is_shutdown() {
        let finished = counters.finished();
        pb.set_position(finished);

        let now = Instant::now();
        let interval = now.duration_since(last_time).as_secs_f64();
        if interval >= 0.5 {
            let throughput = (finished - last_finished) as f64 / interval;
            pb.set_message(format!("{}/s", format_count(throughput as u64)));
            last_finished = finished;
            last_time = now;
        }

        if finished >= counters.total() {
            break;
        }

        thread::sleep(Duration::from_millis(100));
    }

    pb.finish_and_clear();
}
