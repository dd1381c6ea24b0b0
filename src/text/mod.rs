// Text handling: tokenization shared by the scorer and the CLI.

pub mod normalize;

pub use normalize::{normalize, Normalizer, TokenSequence, STOPWORDS};
