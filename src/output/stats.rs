//! Run summary display
//!
//! This module prints the end-of-run report to stdout: page counts,
//! record count and the list of pages that were skipped or failed.

use crate::state::RunState;

/// Prints a run summary to stdout in a formatted manner
///
/// # Arguments
///
/// * `state` - The completed run to summarize
pub fn print_run_summary(state: &RunState) {
    let summary = state.summary();

    println!("=== Scrape Summary ===\n");

    println!("Pages:");
    println!("  Attempted: {}", summary.pages_attempted);
    println!("  Succeeded: {}", summary.succeeded);
    println!("  Skipped by robots.txt: {}", summary.skipped_by_robots);
    println!("  Failed: {}", summary.failed);
    println!();

    println!("Records extracted: {}", summary.records);
    println!();

    let skipped: Vec<_> = state
        .outcomes()
        .iter()
        .filter(|o| o.status().is_skipped())
        .collect();
    if !skipped.is_empty() {
        println!("Skipped Pages ({}):", skipped.len());
        for outcome in skipped {
            println!("  - {}", outcome.url());
        }
        println!();
    }

    let failures: Vec<_> = state
        .outcomes()
        .iter()
        .filter(|o| o.status().is_failure())
        .collect();
    if !failures.is_empty() {
        println!("Failed Pages ({}):", failures.len());
        for outcome in failures {
            println!("  - {}: {}", outcome.url(), outcome.status());
        }
        println!();
    }

    let elapsed = summary.duration().num_milliseconds() as f64 / 1000.0;
    println!("Duration: {:.1}s", elapsed);
    println!(
        "Success Rate: {:.1}% ({} / {} pages)",
        summary.success_rate(),
        summary.succeeded,
        summary.pages_attempted
    );
}
