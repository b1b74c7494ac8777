//! hwrng-stats CLI entry point
//!
//! Repeated chi-squared and runs tests against a hardware random number generator

use hwrng_stats::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
