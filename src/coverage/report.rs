// Checklist coverage: classify each question as asked or missed.
//
// A question counts as asked when its overlap score, rounded half-up to two
// decimals, is at or above the threshold. Coverage is the asked fraction of
// the checklist. Every input produces a report: an empty checklist gives
// 0 asked, 0 missed and 0.0 coverage, and thresholds outside [0, 1] are used
// as given.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::overlap::{overlap_from_tokens, TranscriptTokens};
use crate::text::Normalizer;

/// Default threshold used by the CLI and config when nothing else is given.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Result for one checklist question, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question: String,
    /// Overlap score rounded to two decimals
    pub score: f64,
    pub asked: bool,
}

/// Aggregate coverage of a checklist over one transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub results: Vec<QuestionResult>,
    pub asked_count: usize,
    pub missed_count: usize,
    /// asked_count / questions, or 0.0 for an empty checklist. Not rounded.
    pub coverage: f64,
    pub threshold: f64,
    /// True when a configured token limit cut the transcript or a question
    pub truncated: bool,
}

impl CoverageReport {
    /// Per-question rounded scores, in input order.
    pub fn scores(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.score).collect()
    }

    /// Per-question asked flags, in input order.
    pub fn asked_flags(&self) -> Vec<bool> {
        self.results.iter().map(|r| r.asked).collect()
    }

    pub fn asked(&self) -> impl Iterator<Item = &QuestionResult> {
        self.results.iter().filter(|r| r.asked)
    }

    pub fn missed(&self) -> impl Iterator<Item = &QuestionResult> {
        self.results.iter().filter(|r| !r.asked)
    }

    pub fn question_count(&self) -> usize {
        self.results.len()
    }
}

/// Round half away from zero at the second decimal: 0.595 -> 0.6, 0.666.. -> 0.67.
pub fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Evaluates checklists against transcripts with a fixed threshold.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    pub threshold: f64,
    pub normalizer: Normalizer,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl Evaluator {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            normalizer: Normalizer::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Score every question against the transcript and aggregate.
    ///
    /// The transcript is normalized once for the whole checklist.
    pub fn evaluate<S: AsRef<str>>(&self, transcript: &str, questions: &[S]) -> CoverageReport {
        let transcript_seq = self.normalizer.tokenize(transcript);
        let mut truncated = transcript_seq.truncated;
        let transcript_tokens = TranscriptTokens::new(transcript_seq.tokens);

        let results: Vec<QuestionResult> = questions
            .iter()
            .map(|question| {
                let question = question.as_ref();
                let question_seq = self.normalizer.tokenize(question);
                truncated |= question_seq.truncated;

                let score = round2(overlap_from_tokens(&question_seq.tokens, &transcript_tokens));
                QuestionResult {
                    question: question.to_string(),
                    score,
                    asked: score >= self.threshold,
                }
            })
            .collect();

        let asked_count = results.iter().filter(|r| r.asked).count();
        let missed_count = results.len() - asked_count;
        let coverage = if results.is_empty() {
            0.0
        } else {
            asked_count as f64 / results.len() as f64
        };

        debug!(
            questions = results.len(),
            asked = asked_count,
            transcript_tokens = transcript_tokens.len(),
            coverage,
            truncated,
            "Evaluated checklist coverage"
        );

        CoverageReport {
            results,
            asked_count,
            missed_count,
            coverage,
            threshold: self.threshold,
            truncated,
        }
    }
}

/// Evaluate a checklist with no token limit.
pub fn evaluate<S: AsRef<str>>(transcript: &str, questions: &[S], threshold: f64) -> CoverageReport {
    Evaluator::new(threshold).evaluate(transcript, questions)
}
