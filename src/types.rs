//! Core types for semmap - the semantic map inference engine.
//!
//! Design decisions:
//! - `Arc<str>` for concept and language labels: one interned copy is shared
//!   between the corpus, every bootstrap iteration, and the frequency table,
//!   so a thousand iterations never re-allocate a label.
//! - Observations are frozen after parsing and shared read-only across all
//!   bootstrap iterations (and across rayon workers).
//! - All tunables live in [`MapConfig`] with the reference procedure's
//!   constants as defaults, so experiments can override any of them at
//!   runtime without touching the engine.

use std::fmt;
use std::sync::Arc;

/// A reference sense in the semantic map's vocabulary (e.g. "LOVE").
///
/// Opaque label. The fixed inventory defines which concepts appear in the
/// final map; corpus data may mention concepts outside it, which surfaces
/// as an out-of-vocabulary condition at aggregation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Concept(Arc<str>);

impl Concept {
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Concept {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// A source language in the sample (e.g. "Lakota").
///
/// Opaque label, compared byte-for-byte against the first column of the
/// input table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Language(Arc<str>);

impl Language {
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// One lexical item: a language, the lemma itself, and the polysemy set of
/// concepts the lemma covers.
///
/// Parsed once from the input table, immutable thereafter. The senses are
/// deduplicated at parse time and guaranteed non-empty; their order is the
/// order of first appearance in the source line, which keeps downstream
/// candidate enumeration deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub language: Language,
    pub lemma: String,
    pub senses: Vec<Concept>,
}

impl Observation {
    pub fn new(
        language: impl Into<Language>,
        lemma: impl Into<String>,
        senses: Vec<Concept>,
    ) -> Self {
        Self {
            language: language.into(),
            lemma: lemma.into(),
            senses,
        }
    }

    /// Short human-readable identification for diagnostics.
    pub fn describe(&self) -> String {
        format!("'{}' ({})", self.lemma, self.language)
    }
}

impl From<&str> for Observation {
    /// Test/demo convenience: `"Lakota:wastelaka:LOVE,HAPPYNESS"`.
    fn from(compact: &str) -> Self {
        let mut parts = compact.splitn(3, ':');
        let language = parts.next().unwrap_or_default();
        let lemma = parts.next().unwrap_or_default();
        let senses = parts
            .next()
            .unwrap_or_default()
            .split(',')
            .filter(|s| !s.is_empty())
            .map(Concept::from)
            .collect();
        Self::new(language, lemma, senses)
    }
}

/// Configuration for the bootstrap inference run.
///
/// Defaults reproduce the reference procedure: 1000 bootstrap iterations,
/// samples of 12 languages, keep edges seen in at least 250 iterations,
/// flag edges seen in more than 500, and scale edge weights by 1/200.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Languages drawn (with replacement) per bootstrap sample.
    pub sample_size: usize,
    /// Number of bootstrap iterations.
    pub iterations: usize,
    /// Minimum cross-iteration frequency for an edge to enter the final map.
    pub keep_threshold: u32,
    /// Frequency above which an edge is flagged as an important link.
    pub importance_threshold: u32,
    /// Divisor turning a frequency into an edge weight (DOT pen width).
    pub weight_norm: f64,
    /// Fail the run on an out-of-vocabulary concept instead of recording
    /// a skip diagnostic.
    pub strict_vocabulary: bool,
    /// Master seed for the resampler and the optimizer's tie-break
    /// shuffles. `None` seeds from entropy; runs are then non-deterministic
    /// in tie-break outcome though convergent in objective value.
    pub seed: Option<u64>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            sample_size: 12,
            iterations: 1000,
            keep_threshold: 250,
            importance_threshold: 500,
            weight_norm: 200.0,
            strict_vocabulary: false,
            seed: None,
        }
    }
}
