//! Thresholding the frequency table into the final weighted map.

use crate::config::Inventory;
use crate::inference::aggregate::EdgeFrequencies;
use crate::types::{Concept, MapConfig};

/// One surviving edge of the final map, endpoints in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEdge {
    pub a: Concept,
    pub b: Concept,
    /// Iterations in which this pair was an edge of the converged graph.
    pub frequency: u32,
    /// `frequency / weight_norm`; doubles as the DOT pen width.
    pub weight: f64,
    /// Frequency strictly above the importance threshold.
    pub important: bool,
}

/// The inferred semantic map. Nodes are always the full concept inventory
/// in canonical order, whether or not any edge touches them; edges are in
/// canonical pair order.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalMap {
    concepts: Vec<Concept>,
    edges: Vec<MapEdge>,
}

impl FinalMap {
    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn edges(&self) -> &[MapEdge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Direct neighbors of a concept, in canonical order.
    pub fn neighbors(&self, concept: &Concept) -> Vec<&Concept> {
        let mut found: Vec<&Concept> = self
            .edges
            .iter()
            .filter_map(|e| {
                if e.a == *concept {
                    Some(&e.b)
                } else if e.b == *concept {
                    Some(&e.a)
                } else {
                    None
                }
            })
            .collect();
        found.sort_by_key(|c| self.concepts.iter().position(|x| x == *c));
        found
    }

    /// Edges whose frequency clears the importance threshold.
    pub fn important_links(&self) -> Vec<&MapEdge> {
        self.edges.iter().filter(|e| e.important).collect()
    }
}

/// Apply the keep and importance thresholds to the accumulated
/// frequencies. An edge survives if its frequency is at least
/// `keep_threshold`; it is important if strictly above
/// `importance_threshold`.
pub fn finalize(freqs: &EdgeFrequencies, inventory: &Inventory, config: &MapConfig) -> FinalMap {
    let concepts = inventory.concepts().to_vec();
    let mut edges = Vec::new();

    for i in 0..concepts.len() {
        for j in (i + 1)..concepts.len() {
            let frequency = freqs.count(&concepts[i], &concepts[j]);
            if frequency < config.keep_threshold {
                continue;
            }
            edges.push(MapEdge {
                a: concepts[i].clone(),
                b: concepts[j].clone(),
                frequency,
                weight: f64::from(frequency) / config.weight_norm,
                important: frequency > config.importance_threshold,
            });
        }
    }

    FinalMap { concepts, edges }
}
