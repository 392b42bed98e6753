//! setlock-benchmark - lock-strategy benchmark for a shared sorted set
//!
//! Populates a sorted linked set, then times a probabilistic
//! member/insert/delete workload against it under a chosen locking
//! strategy, sweeping a list of thread counts.

use anyhow::Result;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use setlock_benchmark::benchmark::Harness;
use setlock_benchmark::config::{BenchmarkConfig, CliArgs};
use setlock_benchmark::report::{self, CsvReporter};

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn print_banner(config: &BenchmarkConfig) {
    if config.quiet {
        return;
    }

    println!("setlock-benchmark v{}", env!("CARGO_PKG_VERSION"));
    println!("====================================");
    println!("Strategy: {}", config.strategy);
    println!("Mix: {}", config.mix);
    println!(
        "Population: {}, Operations: {}, Domain: [0, {})",
        config.population, config.operations, config.domain
    );
    println!("Thread sweep: {:?}", config.threads);
    if config.seed != 0 {
        println!("Seed: {}", config.seed);
    }
    println!("====================================\n");
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse_args();

    // Setup logging
    setup_logging(args.verbose, args.quiet);

    // Build configuration (validates probabilities and sweep); rejected
    // configurations never reach the harness.
    let config = match BenchmarkConfig::from_cli(&args) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e);
            println!("Usage: setlock-benchmark <M_MEMBER> <M_INSERT> <M_DELETE> [OPTIONS]");
            println!("  Probabilities must each lie in [0.0, 1.0] and sum to 1.0");
            println!("  Example: setlock-benchmark 0.9 0.05 0.05 --strategy rwlock");
            std::process::exit(1);
        }
    };

    // Open the results destination up front: if it cannot be opened, no
    // trial runs and nothing is half-written.
    let mut csv = CsvReporter::open(&config.csv_output)
        .map_err(|e| anyhow::anyhow!("Cannot open results destination: {}", e))?;

    print_banner(&config);

    // Run the full thread-count sweep
    let harness = Harness::new(config.clone());
    let results = harness.run_sweep();

    // Persist every trial row at once
    csv.write_results(&results)?;
    info!("wrote {} rows to {:?}", results.len(), config.csv_output);

    if let Some(ref json_path) = config.json_output {
        report::export_json(&results, json_path)?;
        info!("wrote JSON export to {:?}", json_path);
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
