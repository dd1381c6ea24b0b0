// Built-in dispatcher scenarios with known outcomes.
//
// Used by `callcover demo` as a quick end-to-end check of the scorer against
// the default case-entry checklist.

use crate::checklist::Checklist;
use crate::coverage::{evaluate, CoverageReport, DEFAULT_THRESHOLD};

/// A transcript paired with the result it should produce.
#[derive(Debug, Clone, Copy)]
pub struct DemoCase {
    pub name: &'static str,
    pub label: &'static str,
    pub transcript: &'static str,
    pub expect_asked: usize,
    pub expect_coverage: f64,
}

#[derive(Debug, Clone)]
pub struct DemoOutcome {
    pub case: DemoCase,
    pub report: CoverageReport,
    pub passed: bool,
}

/// The smart apostrophe in "What’s" is deliberate: its bytes split the word.
pub const POSITIVE_TRANSCRIPT: &str = "This is 911. What\u{2019}s the address of the emergency today? \
     Is anyone injured there? I also need your callback number please.";

pub const NEGATIVE_TRANSCRIPT: &str = "This is 911. Tell me what happened.";

pub fn cases() -> [DemoCase; 2] {
    [
        DemoCase {
            name: "All detected",
            label: "positive",
            transcript: POSITIVE_TRANSCRIPT,
            expect_asked: 3,
            expect_coverage: 1.0,
        },
        DemoCase {
            name: "None detected",
            label: "negative",
            transcript: NEGATIVE_TRANSCRIPT,
            expect_asked: 0,
            expect_coverage: 0.0,
        },
    ]
}

/// Evaluate every demo case against the default checklist at the default threshold.
pub fn run_cases() -> Vec<DemoOutcome> {
    let checklist = Checklist::dispatcher_default();
    let questions = checklist.texts();

    cases()
        .into_iter()
        .map(|case| {
            let report = evaluate(case.transcript, &questions, DEFAULT_THRESHOLD);
            let passed = report.asked_count == case.expect_asked
                && (report.coverage - case.expect_coverage).abs() < 1e-9;
            DemoOutcome {
                case,
                report,
                passed,
            }
        })
        .collect()
}
