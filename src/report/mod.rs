//! Result reporting: CSV rows, optional JSON export, console helpers
//!
//! The CSV destination is opened before any trial runs and rows are
//! written only after the whole sweep completes, so a run either records
//! every trial or records nothing.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use serde_json::json;

use crate::benchmark::TrialResult;
use crate::utils::Result;

/// CSV destination for sweep results.
///
/// Appends to an existing file; the header row is written only when the
/// destination is newly created (empty).
pub struct CsvReporter {
    file: File,
}

impl CsvReporter {
    /// Open the destination, creating it if needed. Failing here aborts
    /// the run before any trial executes.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Write one row per trial (plus the header on a fresh file)
    pub fn write_results(&mut self, results: &[TrialResult]) -> Result<()> {
        if self.file.metadata()?.len() == 0 {
            writeln!(
                self.file,
                "Threads,Time(seconds),Operations,mMember,mInsert,mDelete"
            )?;
        }

        for result in results {
            writeln!(
                self.file,
                "{},{:.6},{},{:.6},{:.6},{:.6}",
                result.thread_count,
                result.elapsed.as_secs_f64(),
                result.operations,
                result.mix.member,
                result.mix.insert,
                result.mix.delete
            )?;
        }

        self.file.flush()?;
        Ok(())
    }
}

/// Export the sweep as JSON
pub fn export_json(results: &[TrialResult], path: &Path) -> Result<()> {
    let trials: Vec<serde_json::Value> = results
        .iter()
        .map(|r| {
            json!({
                "strategy": r.strategy.as_str(),
                "threads": r.thread_count,
                "seconds": r.elapsed.as_secs_f64(),
                "operations": r.operations,
                "throughput": r.throughput(),
                "mix": r.mix,
                "latency_us": {
                    "avg": r.histogram.mean() / 1000.0,
                    "p50": r.percentile_us(50.0),
                    "p95": r.percentile_us(95.0),
                    "p99": r.percentile_us(99.0),
                    "max": r.histogram.max() as f64 / 1000.0,
                },
                "outcomes": {
                    "member_hits": r.stats.member_hits,
                    "member_misses": r.stats.member_misses,
                    "insert_added": r.stats.insert_added,
                    "insert_duplicates": r.stats.insert_duplicates,
                    "delete_removed": r.stats.delete_removed,
                    "delete_misses": r.stats.delete_misses,
                },
            })
        })
        .collect();

    let doc = json!({ "trials": trials });
    let mut file = File::create(path)?;
    writeln!(file, "{}", serde_json::to_string_pretty(&doc)?)?;
    Ok(())
}

/// Format large numbers with thousands separators
/// Examples: 1,234,567 or 987,654
pub fn format_count(value: u64) -> String {
    let s = value.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::OpStats;
    use crate::sync::LockStrategy;
    use crate::workload::OpMix;
    use hdrhistogram::Histogram;
    use std::time::Duration;

    fn fake_result(threads: u32, secs: f64) -> TrialResult {
        TrialResult {
            strategy: LockStrategy::Rwlock,
            thread_count: threads,
            elapsed: Duration::from_secs_f64(secs),
            operations: 10000,
            mix: OpMix::new(0.9, 0.05, 0.05).unwrap(),
            histogram: Histogram::new_with_bounds(1, 60_000_000_000, 3).unwrap(),
            stats: OpStats::new(),
        }
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("setlock-bench-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(123), "123");
        assert_eq!(format_count(1234), "1,234");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_csv_header_written_once() {
        let path = temp_path("header.csv");
        let _ = std::fs::remove_file(&path);

        let mut reporter = CsvReporter::open(&path).unwrap();
        reporter
            .write_results(&[fake_result(1, 0.5), fake_result(2, 0.25)])
            .unwrap();
        drop(reporter);

        // Second run appends rows without repeating the header
        let mut reporter = CsvReporter::open(&path).unwrap();
        reporter.write_results(&[fake_result(4, 0.125)]).unwrap();
        drop(reporter);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Threads,Time(seconds),Operations,mMember,mInsert,mDelete"
        );
        assert!(lines[1].starts_with("1,0.500000,10000,0.900000,0.050000,0.050000"));
        assert!(lines[3].starts_with("4,"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_csv_open_failure_is_reported() {
        let missing_dir = Path::new("/definitely/not/a/dir/results.csv");
        assert!(CsvReporter::open(missing_dir).is_err());
    }

    #[test]
    fn test_json_export_shape() {
        let path = temp_path("sweep.json");
        let _ = std::fs::remove_file(&path);

        export_json(&[fake_result(1, 1.0), fake_result(8, 0.2)], &path).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let trials = doc["trials"].as_array().unwrap();
        assert_eq!(trials.len(), 2);
        assert_eq!(trials[0]["threads"], 1);
        assert_eq!(trials[1]["strategy"], "rwlock");
        assert!(trials[0]["mix"]["member"].as_f64().unwrap() > 0.89);

        let _ = std::fs::remove_file(&path);
    }
}
