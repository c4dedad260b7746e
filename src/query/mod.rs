//! Query parsing.

pub mod parser;

pub use parser::{ParsedQuery, QueryParser};
