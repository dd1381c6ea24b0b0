// Call transcripts: plain text or diarized JSON segments.
//
// The JSON form is what the speech-to-text step produces:
//
//   { "segments": [ { "start": 0.0, "end": 5.0, "speaker": "SPEAKER_01", "text": "..." } ] }
//
// Extra fields on a segment are ignored. Missing fields fall back to 0.0 for
// timestamps, "UNKNOWN" for the speaker and "" for the text.
//
// Plain-text transcripts carry no speaker labels, so a speaker filter never
// applies to them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_SPEAKER: &str = "UNKNOWN";

fn unknown_speaker() -> String {
    UNKNOWN_SPEAKER.to_string()
}

/// One diarized utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
    #[serde(default = "unknown_speaker")]
    pub speaker: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub segments: Vec<Segment>,
    /// True when segments carry real speaker labels (parsed from JSON)
    #[serde(default)]
    pub diarized: bool,
}

#[derive(Deserialize)]
struct TranscriptFile {
    segments: Option<Vec<Segment>>,
}

impl Transcript {
    /// Parse the diarized JSON form. Fails when the JSON is invalid or has
    /// no `segments` array.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: TranscriptFile =
            serde_json::from_str(json).context("Transcript is not valid JSON")?;
        let Some(segments) = file.segments else {
            anyhow::bail!("Transcript JSON does not contain a 'segments' array");
        };
        Ok(Self {
            segments,
            diarized: true,
        })
    }

    /// Wrap plain text as a single segment with an unknown speaker.
    pub fn from_plain(text: &str) -> Self {
        Self {
            segments: vec![Segment {
                start: 0.0,
                end: 0.0,
                speaker: unknown_speaker(),
                text: text.to_string(),
            }],
            diarized: false,
        }
    }

    /// Load a transcript file: `.json` is parsed as segments, anything else
    /// is read as plain text.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&raw)
                .with_context(|| format!("Failed to parse transcript {}", path.display()))
        } else {
            Ok(Self::from_plain(&raw))
        }
    }

    /// The text to score: trimmed segment texts joined by newlines,
    /// optionally restricted to one speaker. The speaker is ignored for
    /// transcripts without diarization.
    pub fn text(&self, speaker: Option<&str>) -> String {
        let speaker = speaker.filter(|_| self.diarized);
        self.segments
            .iter()
            .filter(|s| speaker.map_or(true, |wanted| s.speaker == wanted))
            .map(|s| s.text.trim())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Distinct speakers in order of first appearance.
    pub fn speakers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if !seen.contains(&segment.speaker.as_str()) {
                seen.push(&segment.speaker);
            }
        }
        seen
    }

    /// Human-readable form, one line per segment:
    /// `[00:05.0–00:09.5] SPEAKER_01: text`
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push_str(&format!(
                "[{}–{}] {}: {}\n",
                format_timestamp(segment.start),
                format_timestamp(segment.end),
                segment.speaker,
                segment.text.trim()
            ));
        }
        out
    }
}

/// Seconds to `MM:SS.s`. Rounds to tenths before splitting so 59.96 becomes
/// 01:00.0; negative and NaN input clamp to zero.
fn format_timestamp(seconds: f64) -> String {
    let tenths = (seconds.max(0.0) * 10.0).round() as u64;
    let minutes = tenths / 600;
    let rest = (tenths % 600) as f64 / 10.0;
    format!("{minutes:02}:{rest:04.1}")
}
