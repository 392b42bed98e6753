//! Benchmark configuration derived from CLI arguments
//!
//! All validation happens here, before any trial runs: a rejected
//! configuration performs no work and leaves no side effects.

use std::path::PathBuf;

use super::cli::CliArgs;
use crate::sync::LockStrategy;
use crate::utils::{BenchmarkError, Result};
use crate::workload::OpMix;

/// Complete, validated benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Locking discipline for the whole sweep
    pub strategy: LockStrategy,
    /// Operation mix issued by every worker
    pub mix: OpMix,
    /// Thread counts to sweep, in order
    pub threads: Vec<u32>,
    /// Unique keys preloaded before each trial
    pub population: u64,
    /// Total operations per trial
    pub operations: u64,
    /// Keys are drawn from [0, domain)
    pub domain: u32,
    /// 0 = random seed, nonzero = deterministic (worker i uses seed + i)
    pub seed: u64,

    // Output
    pub csv_output: PathBuf,
    pub json_output: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
}

impl BenchmarkConfig {
    /// Create configuration from CLI arguments, validating everything
    /// the harness depends on.
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        let mix = OpMix::new(args.m_member, args.m_insert, args.m_delete)?;

        if args.threads.is_empty() {
            return Err(BenchmarkError::Config(
                "--threads requires at least one thread count".to_string(),
            ));
        }
        if args.threads.iter().any(|&t| t == 0) {
            return Err(BenchmarkError::Config(
                "thread counts must be at least 1".to_string(),
            ));
        }

        if args.domain == 0 {
            return Err(BenchmarkError::Config(
                "--domain must be at least 1".to_string(),
            ));
        }
        if args.domain > i32::MAX as u32 {
            return Err(BenchmarkError::Config(format!(
                "--domain must fit in a signed 32-bit key (max {})",
                i32::MAX
            )));
        }

        // Population draws unique keys, so it can never exceed the domain
        if args.population > u64::from(args.domain) {
            return Err(BenchmarkError::Config(format!(
                "--population {} exceeds the key domain {}",
                args.population, args.domain
            )));
        }

        Ok(Self {
            strategy: args.strategy,
            mix,
            threads: args.threads.clone(),
            population: args.population,
            operations: args.operations,
            domain: args.domain,
            seed: args.seed,
            csv_output: args.csv_output.clone(),
            json_output: args.json_output.clone(),
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}
