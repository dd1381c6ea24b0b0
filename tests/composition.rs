// Composition tests: verifying that modules chain together correctly.
//
// These tests exercise the data flow:
//   transcript file -> Transcript -> speaker text -> Evaluator -> report -> markdown / JSON
// using files under the system temp dir and no network access.

use std::fs;
use std::path::PathBuf;

use callcover::checklist::Checklist;
use callcover::coverage::{CoverageReport, Evaluator};
use callcover::demo;
use callcover::output::markdown::{generate_report, render_report, report_path};
use callcover::output::truncate_chars;
use callcover::pipeline::batch::{self, BatchEntry, BatchOptions};
use callcover::transcript::Transcript;

const CALL_JSON: &str = r#"{
    "segments": [
        {"start": 0.0, "end": 3.1, "speaker": "SPEAKER_01", "text": "Norman 911, what's the address of the emergency?"},
        {"start": 3.1, "end": 7.9, "speaker": "SPEAKER_00", "text": "1200 Brompton Street. My dad fell, I don't think anyone else is injured."},
        {"start": 8.0, "end": 11.0, "speaker": "SPEAKER_01", "text": "Okay. What's the phone number you're calling from?"},
        {"start": 11.0, "end": 14.0, "speaker": "SPEAKER_00", "text": "405-555-0100, that's my callback number."}
    ]
}"#;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("callcover_comp_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================
// Transcript -> speaker filter -> coverage
// ============================================================

#[test]
fn speaker_filter_changes_coverage() {
    let transcript = Transcript::from_json_str(CALL_JSON).unwrap();
    let checklist = Checklist::dispatcher_default();

    let everyone = BatchOptions::default();
    let all = batch::evaluate_transcript("call", &transcript, &checklist, &everyone);
    // "anyone injured" and "callback number" come from the caller
    assert_eq!(all.report.asked_flags(), vec![true, true, true]);

    let dispatcher_only = BatchOptions {
        speaker: Some("SPEAKER_01".to_string()),
        ..BatchOptions::default()
    };
    let dispatcher = batch::evaluate_transcript("call", &transcript, &checklist, &dispatcher_only);
    // Dispatcher asked for the address and "phone number", never said "callback" or "injured"
    assert_eq!(dispatcher.report.asked_flags(), vec![true, false, false]);
    assert_eq!(dispatcher.report.scores(), vec![1.0, 0.0, 0.5]);
}

#[test]
fn speaker_filter_skips_plain_text_transcripts() {
    let transcript = Transcript::from_plain(
        "What is the address of the emergency? Is anyone injured? Callback number?",
    );
    let options = BatchOptions {
        speaker: Some("SPEAKER_01".to_string()),
        ..BatchOptions::default()
    };
    let entry = batch::evaluate_transcript("call.txt", &transcript, &Checklist::dispatcher_default(), &options);
    assert_eq!(entry.report.asked_count, 3);
    assert_eq!(entry.report.coverage, 1.0);
}

#[test]
fn mixed_batch_with_speaker_filter_scores_plain_files() {
    let dir = scratch_dir("mixed_speaker");
    fs::write(dir.join("a_call.json"), CALL_JSON).unwrap();
    fs::write(
        dir.join("b_call.txt"),
        "What is the address of the emergency? Is anyone injured? Callback number?",
    )
    .unwrap();

    let options = BatchOptions {
        speaker: Some("SPEAKER_01".to_string()),
        ..BatchOptions::default()
    };
    let entries = batch::run(&dir, &Checklist::dispatcher_default(), &options).unwrap();
    assert_eq!(entries.len(), 2);
    // JSON call is filtered to the dispatcher, the text file is scored whole
    assert_eq!(entries[0].report.asked_flags(), vec![true, false, false]);
    assert_eq!(entries[1].report.asked_flags(), vec![true, true, true]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn rendered_transcript_keeps_every_segment() {
    let transcript = Transcript::from_json_str(CALL_JSON).unwrap();
    let rendered = transcript.render();
    assert_eq!(rendered.lines().count(), 4);
    assert!(rendered.starts_with("[00:00.0–00:03.1] SPEAKER_01: Norman 911"));
}

// ============================================================
// Batch directory -> entries -> markdown
// ============================================================

#[test]
fn batch_run_skips_unparseable_files() {
    let dir = scratch_dir("batch");
    fs::write(dir.join("01_good.json"), CALL_JSON).unwrap();
    fs::write(dir.join("02_plain.txt"), "This is 911. Tell me what happened.").unwrap();
    fs::write(dir.join("03_broken.json"), "{ not json").unwrap();

    let checklist = Checklist::dispatcher_default();
    let entries = batch::run(&dir, &checklist, &BatchOptions::default()).unwrap();

    let sources: Vec<&str> = entries.iter().map(|e| e.source.as_str()).collect();
    assert_eq!(sources, vec!["01_good.json", "02_plain.txt"]);
    assert_eq!(entries[0].report.coverage, 1.0);
    assert_eq!(entries[1].report.coverage, 0.0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn markdown_report_lists_every_question() {
    let dir = scratch_dir("markdown");
    let transcript = Transcript::from_plain("Is anyone injured? What's the address | location?");
    let checklist = Checklist::dispatcher_default();
    let entry = batch::evaluate_transcript("call-17.txt", &transcript, &checklist, &BatchOptions::default());

    let path = dir.join("reports").join("coverage.md");
    let written = generate_report(&[entry], &path.to_string_lossy()).unwrap();
    let content = fs::read_to_string(&written).unwrap();

    assert!(content.contains("# Call Coverage Report"));
    assert!(content.contains("## call-17.txt"));
    assert!(content.contains("| 2 | Is anyone injured? | 1.00 | Asked |"));
    assert!(content.contains("| 3 | What is your callback number? | 0.00 | Missed |"));
    assert!(content.contains("| **Total** | **1** | **2** | **0.33** |"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn report_path_never_overwrites_same_second() {
    use chrono::TimeZone;

    let dir = scratch_dir("report_path");
    let at = chrono::Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();

    let first = report_path(&dir, at);
    assert_eq!(first, dir.join("coverage-20260314-092653.md"));
    generate_report(&[], &first.to_string_lossy()).unwrap();

    let second = report_path(&dir, at);
    assert_eq!(second, dir.join("coverage-20260314-092653-1.md"));
    generate_report(&[], &second.to_string_lossy()).unwrap();

    assert_eq!(report_path(&dir, at), dir.join("coverage-20260314-092653-2.md"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn markdown_report_empty_batch() {
    let content = render_report(&[]);
    assert!(content.contains("| **Total** | **0** | **0** | **0.00** |"));
}

#[test]
fn markdown_escapes_pipes_in_questions() {
    let checklist = Checklist::from_texts(["Address | location?"]);
    let entry = batch::evaluate_transcript(
        "pipes",
        &Transcript::from_plain("address"),
        &checklist,
        &BatchOptions::default(),
    );
    let content = render_report(&[entry]);
    assert!(content.contains("Address \\| location?"));
}

#[test]
fn truncated_report_is_called_out_in_markdown() {
    let options = BatchOptions {
        evaluator: Evaluator::new(0.6)
            .with_normalizer(callcover::text::Normalizer::with_token_limit(1)),
        speaker: None,
    };
    let entry = batch::evaluate_transcript(
        "long",
        &Transcript::from_plain("address emergency"),
        &Checklist::dispatcher_default(),
        &options,
    );
    assert!(entry.report.truncated);
    assert!(render_report(&[entry]).contains("Token limit reached"));
}

// ============================================================
// JSON output
// ============================================================

#[test]
fn report_json_shape() {
    let report = callcover::coverage::evaluate("anyone injured", &["Is anyone injured?"], 0.6);
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["asked_count"], 1);
    assert_eq!(value["missed_count"], 0);
    assert_eq!(value["results"][0]["question"], "Is anyone injured?");
    assert_eq!(value["results"][0]["asked"], true);

    let back: CoverageReport = serde_json::from_value(value).unwrap();
    assert_eq!(back, report);
}

#[test]
fn batch_entries_serialize_as_array() {
    let entry = BatchEntry {
        source: "a.txt".to_string(),
        report: callcover::coverage::evaluate("", &["Is anyone injured?"], 0.6),
    };
    let json = serde_json::to_string(&vec![entry]).unwrap();
    assert!(json.starts_with("[{\"source\":\"a.txt\""));
}

// ============================================================
// Demo cases and output helpers
// ============================================================

#[test]
fn demo_cases_match_expectations() {
    for outcome in demo::run_cases() {
        assert!(outcome.passed, "demo case {} failed", outcome.case.name);
        assert_eq!(outcome.report.asked_count, outcome.case.expect_asked);
    }
}

#[test]
fn truncate_chars_respects_utf8() {
    let text = "What\u{2019}s the address of the emergency?";
    let preview = truncate_chars(text, 6);
    assert_eq!(preview, "What\u{2019}s...");
    assert_eq!(truncate_chars("short", 10), "short");
}
