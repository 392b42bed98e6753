//! Command-line argument parsing
//!
//! The three operation probabilities are positional, matching the
//! classic invocation `setlock-benchmark 0.9 0.05 0.05`; everything else
//! is an option with a sensible default.

use clap::Parser;
use std::path::PathBuf;

use crate::sync::LockStrategy;

/// Benchmark coarse-grained locking strategies over a shared sorted
/// linked set under a probabilistic member/insert/delete workload
#[derive(Parser, Debug, Clone)]
#[command(name = "setlock-benchmark")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Probability of a membership test (0.0 - 1.0)
    #[arg(value_name = "M_MEMBER")]
    pub m_member: f64,

    /// Probability of an insert (0.0 - 1.0)
    #[arg(value_name = "M_INSERT")]
    pub m_insert: f64,

    /// Probability of a delete (0.0 - 1.0)
    #[arg(value_name = "M_DELETE")]
    pub m_delete: f64,

    // ===== Synchronization =====
    /// Locking strategy guarding the shared set
    #[arg(short = 's', long = "strategy", value_enum, default_value_t = LockStrategy::Mutex)]
    pub strategy: LockStrategy,

    // ===== Benchmark Parameters =====
    /// Thread counts to sweep
    #[arg(
        short = 't',
        long = "threads",
        value_delimiter = ',',
        default_values_t = vec![1, 2, 4, 8]
    )]
    pub threads: Vec<u32>,

    /// Unique keys preloaded into the set before each trial
    #[arg(short = 'n', long = "population", default_value_t = 1000)]
    pub population: u64,

    /// Total operations issued per trial (split across workers)
    #[arg(short = 'm', long = "operations", default_value_t = 10000)]
    pub operations: u64,

    /// Key domain; values are drawn uniformly from [0, domain)
    #[arg(long = "domain", default_value_t = 65536)]
    pub domain: u32,

    /// Seed for random number generation (0 = random seed)
    #[arg(long = "seed", default_value_t = 0)]
    pub seed: u64,

    // ===== Output Options =====
    /// CSV file collecting one row per trial
    #[arg(long = "csv", default_value = "results.csv")]
    pub csv_output: PathBuf,

    /// Also export the sweep as JSON
    #[arg(long = "json")]
    pub json_output: Option<PathBuf>,

    /// Quiet mode (minimal output, no progress bar)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl CliArgs {
    /// Parse CLI arguments from the command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("setlock-benchmark").chain(argv.iter().copied()))
    }

    #[test]
    fn test_positional_probabilities() {
        let args = parse(&["0.9", "0.05", "0.05"]).unwrap();
        assert!((args.m_member - 0.9).abs() < f64::EPSILON);
        assert!((args.m_insert - 0.05).abs() < f64::EPSILON);
        assert!((args.m_delete - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_probabilities_rejected() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["0.9", "0.05"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["0.5", "0.25", "0.25"]).unwrap();
        assert_eq!(args.strategy, LockStrategy::Mutex);
        assert_eq!(args.threads, vec![1, 2, 4, 8]);
        assert_eq!(args.population, 1000);
        assert_eq!(args.operations, 10000);
        assert_eq!(args.domain, 65536);
        assert_eq!(args.seed, 0);
        assert_eq!(args.csv_output, PathBuf::from("results.csv"));
        assert!(args.json_output.is_none());
    }

    #[test]
    fn test_strategy_and_sweep_overrides() {
        let args = parse(&["1.0", "0.0", "0.0", "--strategy", "rwlock", "-t", "2,16"]).unwrap();
        assert_eq!(args.strategy, LockStrategy::Rwlock);
        assert_eq!(args.threads, vec![2, 16]);
    }
}
