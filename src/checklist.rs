// Question checklists: the ordered list of questions a call should cover.
//
// Accepted file formats:
//   - JSON array of strings: ["What's the location of the emergency?", ...]
//   - JSON array of objects: [{"id": "1a", "text": "..."}, ...] (id optional)
//   - Plain text: one question per non-blank line, '#' starts a comment line
//
// Items without an id are numbered by position, starting at 1.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub items: Vec<ChecklistItem>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawItem {
    Text(String),
    Item { id: Option<RawId>, text: String },
}

/// Ids exported from spreadsheets are often plain numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(id) => id,
            RawId::Number(n) => n.to_string(),
        }
    }
}

impl Checklist {
    /// Build from question texts, numbering them 1..=n.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| ChecklistItem {
                id: (i + 1).to_string(),
                text: text.into(),
            })
            .collect();
        Self { items }
    }

    /// The case-entry questions every dispatcher call should cover.
    pub fn dispatcher_default() -> Self {
        Self::from_texts([
            "What is the address of the emergency?",
            "Is anyone injured?",
            "What is your callback number?",
        ])
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Vec<RawItem> = serde_json::from_str(json)
            .context("Checklist JSON must be an array of strings or {id, text} objects")?;

        let items = raw
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                RawItem::Text(text) => ChecklistItem {
                    id: (i + 1).to_string(),
                    text,
                },
                RawItem::Item { id, text } => ChecklistItem {
                    id: id
                        .map(RawId::into_string)
                        .unwrap_or_else(|| (i + 1).to_string()),
                    text,
                },
            })
            .collect();

        Ok(Self { items })
    }

    pub fn from_lines(text: &str) -> Self {
        Self::from_texts(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Load a checklist file. `.json` is parsed as JSON, anything else as
    /// one question per line. A file with no questions is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read checklist {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let checklist = if is_json {
            Self::from_json_str(&raw)
                .with_context(|| format!("Failed to parse checklist {}", path.display()))?
        } else {
            Self::from_lines(&raw)
        };

        if checklist.is_empty() {
            anyhow::bail!("Checklist {} contains no questions", path.display());
        }

        Ok(checklist)
    }

    /// Question texts in checklist order.
    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_strings() {
        let c = Checklist::from_json_str(r#"["Is anyone injured?", "Callback number?"]"#).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.items[1].id, "2");
        assert_eq!(c.texts(), vec!["Is anyone injured?", "Callback number?"]);
    }

    #[test]
    fn test_json_objects_keep_ids() {
        let c = Checklist::from_json_str(
            r#"[{"id": "1a", "text": "Address verified?"}, {"text": "Phone number?"}]"#,
        )
        .unwrap();
        assert_eq!(c.items[0].id, "1a");
        assert_eq!(c.items[1].id, "2");
    }

    #[test]
    fn test_json_numeric_ids() {
        let c = Checklist::from_json_str(
            r#"[{"id": 1, "text": "Location of the emergency?"}, {"id": "2a", "text": "Phone documented?"}]"#,
        )
        .unwrap();
        assert_eq!(c.items[0].id, "1");
        assert_eq!(c.items[1].id, "2a");
    }

    #[test]
    fn test_lines_skip_blank_and_comments() {
        let c = Checklist::from_lines("# case entry\nIs anyone injured?\n\n  Callback number?  \n");
        assert_eq!(c.texts(), vec!["Is anyone injured?", "Callback number?"]);
    }

    #[test]
    fn test_json_object_not_array_is_error() {
        assert!(Checklist::from_json_str(r#"{"1": "Address?"}"#).is_err());
    }
}
