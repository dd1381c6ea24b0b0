// Callcover: question coverage scoring for call transcripts
//
// This is the library root. `text` and `coverage` hold the scoring core; the
// remaining modules load inputs, render results, and drive batch runs.

pub mod checklist;
pub mod config;
pub mod coverage;
pub mod demo;
pub mod output;
pub mod pipeline;
pub mod text;
pub mod transcript;
