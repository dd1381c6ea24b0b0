// Markdown report generation.
//
// Writes a shareable summary of one or more evaluated transcripts: an
// overview table followed by a per-question breakdown for each transcript.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::pipeline::batch::BatchEntry;

/// Render the report and write it to `output_path`, creating parent
/// directories as needed. Returns the path written.
pub fn generate_report(entries: &[BatchEntry], output_path: &str) -> Result<String> {
    let content = render_report(entries);

    let path = Path::new(output_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {output_path}"))?;

    info!(path = output_path, transcripts = entries.len(), "Markdown report written");
    Ok(output_path.to_string())
}

/// A report path in `dir` stamped with `at` (UTC, the same clock as the
/// "Generated" line). When that file already exists a `-1`, `-2`, ... suffix
/// is added so earlier reports from the same second are kept.
pub fn report_path(dir: &Path, at: DateTime<Utc>) -> PathBuf {
    let stamp = at.format("%Y%m%d-%H%M%S");
    let first = dir.join(format!("coverage-{stamp}.md"));
    if !first.exists() {
        return first;
    }
    (1..)
        .map(|n| dir.join(format!("coverage-{stamp}-{n}.md")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// Build the markdown text without touching the filesystem.
pub fn render_report(entries: &[BatchEntry]) -> String {
    let mut md = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(md, "# Call Coverage Report\n");
    let _ = writeln!(
        md,
        "Generated {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    let _ = writeln!(md, "## Summary\n");
    let _ = writeln!(md, "| Transcript | Asked | Missed | Coverage |");
    let _ = writeln!(md, "|---|---|---|---|");
    for entry in entries {
        let r = &entry.report;
        let _ = writeln!(
            md,
            "| {} | {} | {} | {:.2} |",
            escape_cell(&entry.source),
            r.asked_count,
            r.missed_count,
            r.coverage
        );
    }
    let asked: usize = entries.iter().map(|e| e.report.asked_count).sum();
    let missed: usize = entries.iter().map(|e| e.report.missed_count).sum();
    let _ = writeln!(
        md,
        "| **Total** | **{asked}** | **{missed}** | **{:.2}** |",
        overall_coverage(asked, missed)
    );

    for entry in entries {
        let r = &entry.report;
        let _ = writeln!(md, "\n## {}\n", entry.source);
        let _ = writeln!(md, "Threshold: {:.2}\n", r.threshold);
        if r.truncated {
            let _ = writeln!(md, "> Token limit reached; scores are based on shortened text.\n");
        }
        let _ = writeln!(md, "| # | Question | Score | Result |");
        let _ = writeln!(md, "|---|---|---|---|");
        for (i, result) in r.results.iter().enumerate() {
            let _ = writeln!(
                md,
                "| {} | {} | {:.2} | {} |",
                i + 1,
                escape_cell(&result.question),
                result.score,
                if result.asked { "Asked" } else { "Missed" }
            );
        }
    }

    md
}

fn overall_coverage(asked: usize, missed: usize) -> f64 {
    let total = asked + missed;
    if total == 0 {
        0.0
    } else {
        asked as f64 / total as f64
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
