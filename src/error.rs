//! Error taxonomy for the inference pipeline.
//!
//! Malformed input and degenerate configuration are fatal before the
//! bootstrap loop starts; per-iteration anomalies (a stuck optimizer, an
//! out-of-vocabulary edge under the default policy) are recorded in
//! [`crate::inference::RunStats`] instead of aborting the run.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    /// A table line failed to parse. Fatal: no partial corpus is ever used.
    #[error("malformed input line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    /// An optimized edge references a concept outside the fixed inventory.
    /// Raised only under strict vocabulary mode; the default policy records
    /// a skip diagnostic instead.
    #[error("concept not in the configured inventory: {0}")]
    UnknownConcept(String),

    /// The language or concept inventory is empty.
    #[error("inventory has no {0}")]
    EmptyInventory(&'static str),

    /// The same label appears twice in an inventory list.
    #[error("duplicate {kind} in inventory: {label}")]
    DuplicateLabel { kind: &'static str, label: String },

    /// The parsed table produced no observations.
    #[error("corpus contains no observations")]
    EmptyCorpus,
}
