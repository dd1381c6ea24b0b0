// Token overlap between a question and a transcript.
//
// The score is the fraction of the question's tokens that appear anywhere in
// the transcript:
//
//   hits(question tokens found in transcript) / len(question tokens)
//
// Transcript order and multiplicity are irrelevant. Question tokens are NOT
// deduplicated: "number number" against a transcript containing "number"
// scores 2/2, and against one without it 0/2.

use std::collections::HashSet;

use crate::text::normalize;

/// Transcript tokens prepared for repeated membership checks.
///
/// Build once per transcript and reuse across every question on the checklist.
#[derive(Debug, Clone, Default)]
pub struct TranscriptTokens {
    tokens: HashSet<String>,
}

impl TranscriptTokens {
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(normalize(text))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Score already-normalized question tokens against a prepared transcript.
///
/// Returns 0.0 for an empty question, otherwise a value in [0.0, 1.0].
pub fn overlap_from_tokens(question_tokens: &[String], transcript: &TranscriptTokens) -> f64 {
    if question_tokens.is_empty() {
        return 0.0;
    }

    let hits = question_tokens
        .iter()
        .filter(|token| transcript.contains(token))
        .count();

    hits as f64 / question_tokens.len() as f64
}

/// Normalize both texts and compute the overlap score.
pub fn token_overlap_score(question: &str, transcript: &str) -> f64 {
    let transcript_tokens = TranscriptTokens::from_text(transcript);
    overlap_from_tokens(&normalize(question), &transcript_tokens)
}
