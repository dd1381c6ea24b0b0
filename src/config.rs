use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::coverage::DEFAULT_THRESHOLD;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command-line
/// flags override anything set here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Minimum rounded overlap score for a question to count as asked
    pub threshold: f64,
    /// Optional cap on tokens per text. Unset means no cap; when set, capped
    /// reports are flagged as truncated.
    pub token_limit: Option<usize>,
    /// Only score JSON transcript segments spoken by this speaker
    pub speaker: Option<String>,
    /// Directory markdown reports are written to
    pub report_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            token_limit: None,
            speaker: None,
            report_dir: PathBuf::from("output"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional. A value that is set but doesn't parse is
    /// an error naming the variable.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup (the process environment in
    /// `load`, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let threshold = match non_empty(lookup("CALLCOVER_THRESHOLD")) {
            Some(raw) => raw
                .parse::<f64>()
                .with_context(|| format!("CALLCOVER_THRESHOLD is not a number: {raw:?}"))?,
            None => defaults.threshold,
        };

        let token_limit = match non_empty(lookup("CALLCOVER_TOKEN_LIMIT")) {
            Some(raw) => Some(raw.parse::<usize>().with_context(|| {
                format!("CALLCOVER_TOKEN_LIMIT is not a non-negative integer: {raw:?}")
            })?),
            None => None,
        };

        Ok(Self {
            threshold,
            token_limit,
            speaker: non_empty(lookup("CALLCOVER_SPEAKER")),
            report_dir: non_empty(lookup("CALLCOVER_REPORT_DIR"))
                .map(PathBuf::from)
                .unwrap_or(defaults.report_dir),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
