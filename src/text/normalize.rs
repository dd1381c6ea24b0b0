// Text normalization: raw text to comparable tokens.
//
// Every byte that is not an ASCII letter or digit acts as a separator, so
// punctuation glued to a word ("emergency?") and the bytes of multi-byte
// characters (typographic apostrophes, smart quotes) both become word
// boundaries. Tokens are lowercased and a small fixed stopword list is removed.
//
// Because runs of separators collapse when splitting, splitting per byte and
// splitting per code point produce the same tokens.

/// Function words that carry no topical signal.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "of", "to", "your", "my", "our", "their", "his", "her",
    "there", "this", "that", "what",
];

/// Whether an already-lowercased token is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Normalize text into its ordered token sequence with no token limit.
pub fn normalize(text: &str) -> Vec<String> {
    Normalizer::default().tokenize(text).tokens
}

/// Tokenizer with an optional explicit cap on surviving tokens.
///
/// The default has no cap. A capped normalizer reports when it stopped
/// early so callers can tell a shortened text from a short one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    /// Maximum number of tokens kept per text (None = unbounded)
    pub token_limit: Option<usize>,
}

/// Output of a single normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    pub tokens: Vec<String>,
    /// True when the token limit cut the text short
    pub truncated: bool,
}

impl Normalizer {
    pub fn with_token_limit(limit: usize) -> Self {
        Self {
            token_limit: Some(limit),
        }
    }

    /// Lowercase, replace every non-alphanumeric byte with a space, split on
    /// whitespace and drop stopwords. Token order follows the text.
    pub fn tokenize(&self, text: &str) -> TokenSequence {
        let folded: String = text
            .bytes()
            .map(|b| {
                if b.is_ascii_alphanumeric() {
                    char::from(b.to_ascii_lowercase())
                } else {
                    ' '
                }
            })
            .collect();

        let mut tokens = Vec::new();
        for raw in folded.split_ascii_whitespace() {
            if is_stopword(raw) {
                continue;
            }
            if self.token_limit.is_some_and(|limit| tokens.len() >= limit) {
                return TokenSequence {
                    tokens,
                    truncated: true,
                };
            }
            tokens.push(raw.to_string());
        }

        TokenSequence {
            tokens,
            truncated: false,
        }
    }
}
