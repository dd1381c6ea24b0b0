// Batch grading: evaluate every transcript in a directory against one checklist.
//
// Files are processed in file-name order so repeated runs produce the same
// report. A transcript that can't be read or parsed is logged and skipped
// rather than failing the whole batch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::checklist::Checklist;
use crate::coverage::{CoverageReport, Evaluator};
use crate::transcript::Transcript;

/// Extensions picked up by a directory scan.
const TRANSCRIPT_EXTENSIONS: &[&str] = &["json", "txt"];

/// How each transcript is evaluated.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub evaluator: Evaluator,
    /// Only score segments from this speaker (JSON transcripts)
    pub speaker: Option<String>,
}

/// One evaluated transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// File name (or another label) identifying the transcript
    pub source: String,
    pub report: CoverageReport,
}

/// Evaluate an already-loaded transcript.
pub fn evaluate_transcript(
    source: &str,
    transcript: &Transcript,
    checklist: &Checklist,
    options: &BatchOptions,
) -> BatchEntry {
    let text = transcript.text(options.speaker.as_deref());
    let report = options.evaluator.evaluate(&text, &checklist.texts());
    BatchEntry {
        source: source.to_string(),
        report,
    }
}

/// Load and evaluate a single transcript file.
pub fn evaluate_file(path: &Path, checklist: &Checklist, options: &BatchOptions) -> Result<BatchEntry> {
    let transcript = Transcript::load(path)?;
    Ok(evaluate_transcript(
        &source_label(path),
        &transcript,
        checklist,
        options,
    ))
}

/// Evaluate every `.json` / `.txt` file directly inside `dir`.
pub fn run(dir: &Path, checklist: &Checklist, options: &BatchOptions) -> Result<Vec<BatchEntry>> {
    let files = transcript_files(dir)?;
    info!(
        dir = %dir.display(),
        files = files.len(),
        questions = checklist.len(),
        "Starting batch evaluation"
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Grading [{bar:30}] {pos}/{len} ({eta})")
            .context("Invalid progress bar template")?,
    );

    let mut entries = Vec::with_capacity(files.len());
    for path in &files {
        match evaluate_file(path, checklist, options) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to evaluate transcript, skipping");
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(evaluated = entries.len(), skipped = files.len() - entries.len(), "Batch complete");
    Ok(entries)
}

/// Transcript files in `dir`, sorted by file name. Not recursive.
pub fn transcript_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read transcript directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in read_dir {
        let path = entry
            .with_context(|| format!("Failed to list {}", dir.display()))?
            .path();
        let wanted = path.is_file()
            && path.extension().and_then(|e| e.to_str()).is_some_and(|ext| {
                TRANSCRIPT_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if wanted {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
