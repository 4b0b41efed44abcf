//! Corpus loading: the tab-separated polysemy tables the engine consumes.

pub mod parser;

pub use parser::{load_corpus, parse_corpus};
