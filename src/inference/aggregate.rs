//! Cross-iteration edge-frequency accumulation.
//!
//! Each iteration contributes its converged edge set once; a canonical
//! pair's count is therefore bounded by the number of iterations recorded.
//! Edges touching a concept outside the fixed inventory are skipped and
//! tallied by default, or rejected outright in strict vocabulary mode.

use std::collections::HashMap;

use crate::config::Inventory;
use crate::error::MapError;
use crate::types::Concept;

const OOV_SAMPLE_LIMIT: usize = 5;

/// The frequency table: canonical concept pair -> iterations in which the
/// pair was an edge of the converged graph.
#[derive(Debug, Clone, Default)]
pub struct EdgeFrequencies {
    counts: HashMap<(Concept, Concept), u32>,
    iterations: u32,
    oov_skipped: usize,
    oov_samples: Vec<String>,
}

impl EdgeFrequencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one iteration's converged edge set.
    ///
    /// In strict mode an out-of-vocabulary concept fails the whole call
    /// before any count changes; otherwise the offending edges are skipped
    /// and tallied, and everything else still counts.
    pub fn record(
        &mut self,
        links: &[(Concept, Concept)],
        inventory: &Inventory,
        strict: bool,
    ) -> Result<(), MapError> {
        if strict {
            for (a, b) in links {
                for concept in [a, b] {
                    if !inventory.contains(concept) {
                        return Err(MapError::UnknownConcept(concept.as_str().to_string()));
                    }
                }
            }
        }

        for (a, b) in links {
            match inventory.canonical_pair(a, b) {
                Some(pair) => *self.counts.entry(pair).or_insert(0) += 1,
                None => {
                    self.oov_skipped += 1;
                    for concept in [a, b] {
                        if !inventory.contains(concept) {
                            let label = concept.as_str().to_string();
                            if self.oov_samples.len() < OOV_SAMPLE_LIMIT
                                && !self.oov_samples.contains(&label)
                            {
                                self.oov_samples.push(label);
                            }
                        }
                    }
                }
            }
        }

        self.iterations += 1;
        Ok(())
    }

    /// Count for a pair, in either orientation. Unseen pairs count zero.
    pub fn count(&self, a: &Concept, b: &Concept) -> u32 {
        self.counts
            .get(&(a.clone(), b.clone()))
            .or_else(|| self.counts.get(&(b.clone(), a.clone())))
            .copied()
            .unwrap_or(0)
    }

    /// Iterations recorded so far; every count is bounded by this.
    pub fn iterations_recorded(&self) -> u32 {
        self.iterations
    }

    /// Edges skipped for being out of vocabulary (default policy only).
    pub fn oov_skipped(&self) -> usize {
        self.oov_skipped
    }

    /// A few distinct out-of-vocabulary labels, for diagnostics.
    pub fn oov_samples(&self) -> &[String] {
        &self.oov_samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(a: &str, b: &str) -> (Concept, Concept) {
        (Concept::from(a), Concept::from(b))
    }

    #[test]
    fn test_counts_accumulate_in_canonical_orientation() {
        let inventory = Inventory::reference();
        let mut freqs = EdgeFrequencies::new();

        // reversed orientation lands on the same key
        freqs.record(&[link("PITY", "LOVE")], &inventory, false).unwrap();
        freqs.record(&[link("LOVE", "PITY")], &inventory, false).unwrap();

        assert_eq!(freqs.count(&Concept::from("LOVE"), &Concept::from("PITY")), 2);
        assert_eq!(freqs.count(&Concept::from("PITY"), &Concept::from("LOVE")), 2);
        assert_eq!(freqs.iterations_recorded(), 2);
    }

    #[test]
    fn test_counts_are_bounded_by_iterations() {
        let inventory = Inventory::reference();
        let mut freqs = EdgeFrequencies::new();

        for _ in 0..7 {
            freqs
                .record(&[link("FEAR", "WORRY"), link("LOVE", "PITY")], &inventory, false)
                .unwrap();
        }

        assert_eq!(freqs.iterations_recorded(), 7);
        assert_eq!(freqs.count(&Concept::from("FEAR"), &Concept::from("WORRY")), 7);
        assert_eq!(freqs.count(&Concept::from("LOVE"), &Concept::from("SADNESS")), 0);
    }

    #[test]
    fn test_oov_edges_are_skipped_and_sampled_by_default() {
        let inventory = Inventory::reference();
        let mut freqs = EdgeFrequencies::new();

        freqs
            .record(&[link("LOVE", "JOY"), link("FEAR", "WORRY")], &inventory, false)
            .unwrap();

        assert_eq!(freqs.oov_skipped(), 1);
        assert_eq!(freqs.oov_samples(), &["JOY".to_string()]);
        assert_eq!(freqs.count(&Concept::from("LOVE"), &Concept::from("JOY")), 0);
        assert_eq!(freqs.count(&Concept::from("FEAR"), &Concept::from("WORRY")), 1);
        assert_eq!(freqs.iterations_recorded(), 1);
    }

    #[test]
    fn test_strict_mode_rejects_before_counting_anything() {
        let inventory = Inventory::reference();
        let mut freqs = EdgeFrequencies::new();

        let err = freqs
            .record(&[link("FEAR", "WORRY"), link("LOVE", "JOY")], &inventory, true)
            .unwrap_err();

        assert_eq!(err, MapError::UnknownConcept("JOY".to_string()));
        assert_eq!(freqs.count(&Concept::from("FEAR"), &Concept::from("WORRY")), 0);
        assert_eq!(freqs.iterations_recorded(), 0);
    }

    #[test]
    fn test_oov_sample_list_dedups_and_caps() {
        let inventory = Inventory::reference();
        let mut freqs = EdgeFrequencies::new();

        for label in ["J1", "J2", "J3", "J4", "J5", "J6", "J1"] {
            freqs.record(&[link("LOVE", label)], &inventory, false).unwrap();
        }

        assert_eq!(freqs.oov_skipped(), 7);
        assert_eq!(freqs.oov_samples().len(), OOV_SAMPLE_LIMIT);
        assert_eq!(freqs.oov_samples()[0], "J1");
    }
}
