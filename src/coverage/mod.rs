// Checklist coverage scoring: per-question token overlap and the aggregate report.

pub mod overlap;
pub mod report;

pub use overlap::{token_overlap_score, TranscriptTokens};
pub use report::{evaluate, CoverageReport, Evaluator, QuestionResult, DEFAULT_THRESHOLD};
