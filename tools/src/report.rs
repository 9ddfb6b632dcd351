//! Text and CSV rendering of a RunReport.
//!
//! Completion ranking and the not-completed list are derived here,
//! not in the core.

use markov_business_core::{
    event::StopReason,
    report::{BusinessReport, RunReport},
};
use std::fmt::Write as _;

/// Completed businesses, earliest first. Ties keep population order.
pub fn completion_ranking(report: &RunReport) -> Vec<&BusinessReport> {
    let mut done: Vec<&BusinessReport> = report
        .businesses
        .iter()
        .filter(|b| b.completion_iteration.is_some())
        .collect();
    done.sort_by_key(|b| b.completion_iteration);
    done
}

pub fn not_completed(report: &RunReport) -> Vec<&BusinessReport> {
    report
        .businesses
        .iter()
        .filter(|b| b.completion_iteration.is_none())
        .collect()
}

pub fn render_summary(report: &RunReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== COMPLETION ORDER ===");
    let ranking = completion_ranking(report);
    if ranking.is_empty() {
        let _ = writeln!(out, "  (No business completed)");
    }
    for (i, b) in ranking.iter().enumerate() {
        if let Some(done) = b.completion_iteration {
            let _ = writeln!(out, "  {}. {} - Completed at iteration {done}", i + 1, b.name);
        }
    }

    let pending = not_completed(report);
    if !pending.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Did not reach completion within the simulation:");
        for b in pending {
            let _ = writeln!(out, "  - {}", b.name);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "=== FINAL STATES ===");
    let width = report.businesses.iter().map(|b| b.name.len()).max().unwrap_or(0);
    for b in &report.businesses {
        let _ = writeln!(out, "  {:<width$}  {}", b.name, b.final_state);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "=== HISTORIES ===");
    for b in &report.businesses {
        let _ = writeln!(out, "  {}: {}", b.name, b.path());
    }

    let _ = writeln!(out);
    match report.stop {
        StopReason::AllCompleted { iteration } => {
            let _ = writeln!(out, "All businesses completed; stopped at iteration {iteration}.");
        }
        StopReason::HorizonReached => {
            let _ = writeln!(out, "Iteration cap reached after {} iterations.", report.timeline.len());
        }
    }
    out
}

/// Fixed-width table: one row per iteration, one column per state.
pub fn render_timeline(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>9}", "iteration");
    for label in &report.states {
        let _ = write!(out, " {label:>5}");
    }
    let _ = writeln!(out);
    for row in &report.timeline {
        let _ = write!(out, "{:>9}", row.iteration);
        for (_, count) in &row.counts {
            let _ = write!(out, " {count:>5}");
        }
        let _ = writeln!(out);
    }
    out
}

/// `iteration,<label>,...` header followed by one line per snapshot.
pub fn timeline_csv(report: &RunReport) -> String {
    let mut out = String::from("iteration");
    for label in &report.states {
        out.push(',');
        out.push_str(&csv_field(label));
    }
    out.push('\n');
    for row in &report.timeline {
        let _ = write!(out, "{}", row.iteration);
        for (_, count) in &row.counts {
            let _ = write!(out, ",{count}");
        }
        out.push('\n');
    }
    out
}

/// One line per run of a batch.
pub fn batch_line(run_index: u64, report: &RunReport) -> String {
    let done = completion_ranking(report);
    let first = done.first().and_then(|b| b.completion_iteration);
    let last = done.last().and_then(|b| b.completion_iteration);
    format!(
        "run {run_index:>3} seed={:<20} completed={}/{} first={} last={} snapshots={}",
        report.seed.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
        done.len(),
        report.businesses.len(),
        first.map(|i| i.to_string()).unwrap_or_else(|| "-".into()),
        last.map(|i| i.to_string()).unwrap_or_else(|| "-".into()),
        report.timeline.len(),
    )
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
