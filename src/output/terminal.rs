// Colored terminal output for coverage reports.
//
// main.rs delegates all console formatting here.

use colored::Colorize;

use crate::coverage::{CoverageReport, QuestionResult};
use crate::pipeline::batch::BatchEntry;

/// Display one report: asked questions, missed questions, then coverage.
pub fn display_report(report: &CoverageReport) {
    println!(
        "\n{}",
        format!(
            "=== Coverage ({} questions, threshold {:.2}) ===",
            report.question_count(),
            report.threshold
        )
        .bold()
    );

    println!("  {}", "asked:".green());
    for result in report.asked() {
        print_question(result);
    }

    println!("  {}", "missed:".red());
    for result in report.missed() {
        print_question(result);
    }

    println!(
        "  coverage={}  ({} asked, {} missed)",
        colorize_coverage(report.coverage),
        report.asked_count,
        report.missed_count
    );

    if report.truncated {
        println!(
            "  {} token limit reached; scores are based on shortened text",
            "Warning:".yellow()
        );
    }
}

fn print_question(result: &QuestionResult) {
    println!(
        "    - {} {}",
        result.question,
        format!("(score={:.2})", result.score).dimmed()
    );
}

/// Display normalized tokens, one line, space separated.
pub fn display_tokens(tokens: &[String]) {
    if tokens.is_empty() {
        println!("{}", "(no tokens)".dimmed());
        return;
    }
    println!("{}", tokens.join(" "));
    println!("{}", format!("{} tokens", tokens.len()).dimmed());
}

/// Display a one-line-per-transcript summary of a batch run.
pub fn display_batch_summary(entries: &[BatchEntry]) {
    if entries.is_empty() {
        println!("No transcripts evaluated.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Batch Coverage ({} transcripts) ===", entries.len()).bold()
    );
    println!();
    println!(
        "  {:<40} {:>7}  {:>8}",
        "Transcript".dimmed(),
        "Asked".dimmed(),
        "Coverage".dimmed(),
    );
    println!("  {}", "-".repeat(58).dimmed());

    for entry in entries {
        let report = &entry.report;
        println!(
            "  {:<40} {:>7}  {:>8}",
            super::truncate_chars(&entry.source, 37),
            format!("{}/{}", report.asked_count, report.question_count()),
            colorize_coverage(report.coverage),
        );
    }

    let full = entries.iter().filter(|e| e.report.missed_count == 0).count();
    let mean = entries.iter().map(|e| e.report.coverage).sum::<f64>() / entries.len() as f64;
    println!();
    println!("  Full coverage: {full}/{}", entries.len());
    println!("  Mean coverage: {}", colorize_coverage(mean));
}

/// Green for full coverage, yellow for partial, red for none.
fn colorize_coverage(coverage: f64) -> colored::ColoredString {
    let text = format!("{coverage:.2}");
    if coverage >= 1.0 {
        text.green().bold()
    } else if coverage > 0.0 {
        text.yellow()
    } else {
        text.red()
    }
}
