//! semmap - semantic map inference from cross-linguistic polysemy data
//!
//! Implements the network-inference procedure of Regier, Khetarpal &
//! Majid, "Inferring semantic maps" (Linguistic Typology, 2013), built on
//! the connectivity algorithm of Angluin, Aspnes & Reyzin (2010): find a
//! graph over a fixed concept inventory in which every attested polysemy
//! set induces a connected subgraph, then bootstrap the language sample to
//! keep only the edges that survive resampling.
//!
//! # Architecture
//!
//! ```text
//! Table Parsing → Resampling → Candidate Graph → Greedy Optimizer → Aggregation → Rendering
//!       ↓             ↓              ↓                 ↓                 ↓            ↓
//!    TSV lines     rand draws    petgraph        connectivity      frequency    report +
//!    to senses     w/ replace    UnGraph          objective        thresholds   DOT output
//! ```
//!
//! # Reliability strategies
//!
//! - Parallel bootstrap iterations via rayon, folded deterministically
//! - Per-iteration rngs derived from one master seed
//! - String interning for concept and language labels
//! - Strict table parsing with line-numbered errors

pub mod config;
pub mod corpus;
pub mod error;
pub mod inference;
pub mod rendering;
pub mod types;

// Re-export core types
pub use config::{FileConfig, Inventory};
pub use error::MapError;
pub use types::{Concept, Language, MapConfig, Observation};

// Re-export pipeline types
pub use inference::{
    ConceptGraph, EdgeFrequencies, FinalMap, InferenceResult, IterationResult, IterationSetup,
    MapEdge, Outcome, RunStats, infer_map,
};

// Re-export renderers
pub use rendering::{render_dot, render_report, render_stats};
