//! The inference pipeline: resample, optimize, aggregate, finalize.
//!
//! One bootstrap iteration is fully independent of every other, so the
//! iteration loop runs on rayon workers. Results are folded sequentially
//! in iteration order afterwards, and every iteration derives its own rng
//! from the master seed, so worker scheduling can never leak into the
//! draws, the tie-breaks, or the frequency table.

pub mod aggregate;
pub mod candidates;
pub mod components;
pub mod finalize;
pub mod objective;
pub mod optimizer;
pub mod resample;

pub use aggregate::EdgeFrequencies;
pub use candidates::{ConceptGraph, IterationSetup};
pub use finalize::{FinalMap, MapEdge};
pub use optimizer::{IterationResult, Outcome};

use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::config::Inventory;
use crate::error::MapError;
use crate::types::{MapConfig, Observation};

const STUCK_SAMPLE_LIMIT: usize = 3;

/// Aggregate numbers describing one finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub iterations: usize,
    /// Iterations that ended stuck; their partial edge sets still count.
    pub stuck_iterations: usize,
    /// A few formatted descriptions of observations left disconnected.
    pub stuck_samples: Vec<String>,
    /// Edges accepted across all iterations.
    pub total_steps: usize,
    /// Out-of-vocabulary edges skipped during aggregation.
    pub oov_skipped: usize,
    pub oov_samples: Vec<String>,
    /// The master seed actually used (drawn from entropy when unset).
    pub seed: u64,
}

/// A finished run: the thresholded map plus run statistics.
#[derive(Debug)]
pub struct InferenceResult {
    pub map: FinalMap,
    pub stats: RunStats,
}

/// Run the full bootstrap: `config.iterations` independent
/// resample-optimize rounds, then frequency aggregation and thresholding.
pub fn infer_map(
    corpus: &[Observation],
    inventory: &Inventory,
    config: &MapConfig,
) -> Result<InferenceResult, MapError> {
    if corpus.is_empty() {
        return Err(MapError::EmptyCorpus);
    }

    let seed = config.seed.unwrap_or_else(rand::random);

    let rounds: Vec<(IterationResult, Vec<String>)> = (0..config.iterations)
        .into_par_iter()
        .map(|i| run_iteration(corpus, inventory, config, seed, i))
        .collect();

    let mut freqs = EdgeFrequencies::new();
    let mut stuck_iterations = 0;
    let mut stuck_samples = Vec::new();
    let mut total_steps = 0;

    for (result, stuck) in &rounds {
        total_steps += result.steps;
        if matches!(result.outcome, Outcome::Stuck { .. }) {
            stuck_iterations += 1;
            for description in stuck {
                if stuck_samples.len() < STUCK_SAMPLE_LIMIT {
                    stuck_samples.push(description.clone());
                }
            }
        }
        freqs.record(&result.graph.links(), inventory, config.strict_vocabulary)?;
    }

    let map = finalize::finalize(&freqs, inventory, config);
    let stats = RunStats {
        iterations: config.iterations,
        stuck_iterations,
        stuck_samples,
        total_steps,
        oov_skipped: freqs.oov_skipped(),
        oov_samples: freqs.oov_samples().to_vec(),
        seed,
    };

    Ok(InferenceResult { map, stats })
}

fn run_iteration(
    corpus: &[Observation],
    inventory: &Inventory,
    config: &MapConfig,
    seed: u64,
    index: usize,
) -> (IterationResult, Vec<String>) {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
    let draw = resample::draw_sample(inventory.languages(), config.sample_size, &mut rng);
    let working = resample::working_set(corpus, &draw);
    let result = optimizer::optimize(IterationSetup::build(&working), &mut rng);

    let descriptions = match &result.outcome {
        Outcome::Stuck { unsatisfied } => unsatisfied
            .iter()
            .take(STUCK_SAMPLE_LIMIT)
            .map(|&c| format!("iteration {}: {}", index, working[c].describe()))
            .collect(),
        Outcome::Satisfied => Vec::new(),
    };

    (result, descriptions)
}
