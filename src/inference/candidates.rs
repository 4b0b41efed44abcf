//! Working graph and candidate pool for one bootstrap iteration.
//!
//! Every iteration starts from an edgeless graph over the concepts that
//! actually occur in the resampled working set. The candidate pool is the
//! union of all unordered sense pairs attested within a single lexical
//! item; only such pairs can ever become edges, so the optimizer searches
//! a space grounded in attested polysemy rather than all concept pairs.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::types::{Concept, Observation};

/// The working semantic graph: concepts as nodes, accepted links as
/// undirected edges.
///
/// Uses petgraph for storage plus a label index for O(1) lookup.
#[derive(Debug)]
pub struct ConceptGraph {
    graph: UnGraph<Concept, ()>,
    index: HashMap<Concept, NodeIndex>,
}

impl ConceptGraph {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            index: HashMap::new(),
        }
    }

    /// Add a concept node, returns its node index.
    /// Idempotent - returns existing index if already present.
    pub fn add_concept(&mut self, concept: Concept) -> NodeIndex {
        if let Some(&idx) = self.index.get(&concept) {
            return idx;
        }
        let idx = self.graph.add_node(concept.clone());
        self.index.insert(concept, idx);
        idx
    }

    /// Get node index for a concept (if present)
    pub fn get_index(&self, concept: &Concept) -> Option<NodeIndex> {
        self.index.get(concept).copied()
    }

    /// Get concept by index
    pub fn concept(&self, idx: NodeIndex) -> &Concept {
        &self.graph[idx]
    }

    /// Add an undirected link. Idempotent - at most one edge per pair.
    pub fn add_link(&mut self, a: NodeIndex, b: NodeIndex) {
        if !self.graph.contains_edge(a, b) {
            self.graph.add_edge(a, b, ());
        }
    }

    /// Whether the two nodes are directly linked (order-insensitive).
    pub fn has_link(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.contains_edge(a, b)
    }

    pub fn concept_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All accepted links as concept pairs, in insertion order.
    pub fn links(&self) -> Vec<(Concept, Concept)> {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()].clone(), self.graph[e.target()].clone()))
            .collect()
    }
}

impl Default for ConceptGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the optimizer needs for one iteration: the edgeless working
/// graph, one constraint (node list) per working-set observation, and the
/// deduplicated candidate pool.
#[derive(Debug)]
pub struct IterationSetup {
    pub graph: ConceptGraph,
    /// Node lists in working-set order. Repeated observations appear
    /// repeatedly: a language drawn twice weighs twice in the objective.
    pub constraints: Vec<Vec<NodeIndex>>,
    /// Unordered candidate pairs in first-encounter order, each at most
    /// once. The optimizer's shuffle is the only source of pool disorder.
    pub pool: Vec<(NodeIndex, NodeIndex)>,
}

impl IterationSetup {
    /// Derive the iteration state from a resampled working set.
    pub fn build(working_set: &[&Observation]) -> Self {
        let mut graph = ConceptGraph::new();
        let mut constraints = Vec::with_capacity(working_set.len());
        let mut pool = Vec::new();
        let mut seen = HashSet::new();

        for obs in working_set {
            let nodes: Vec<NodeIndex> = obs
                .senses
                .iter()
                .map(|concept| graph.add_concept(concept.clone()))
                .collect();

            for i in 0..nodes.len() {
                for j in (i + 1)..nodes.len() {
                    if nodes[i] == nodes[j] {
                        continue;
                    }
                    let pair = (nodes[i].min(nodes[j]), nodes[i].max(nodes[j]));
                    if seen.insert(pair) {
                        pool.push(pair);
                    }
                }
            }

            constraints.push(nodes);
        }

        Self { graph, constraints, pool }
    }
}
