//! Text analysis: tokenization, word validation, and stop-word filtering.

pub mod stop_words;
pub mod tokenizer;

pub use stop_words::StopWordSet;
pub use tokenizer::{is_valid_word, split_words};
