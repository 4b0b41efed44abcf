//! The connectivity objective.
//!
//! A graph scores `1 - components(induced subgraph)` per constraint,
//! summed over the whole working set. Every term is at most zero, so the
//! total is too; zero exactly when each observation's senses induce a
//! connected subgraph. The greedy optimizer climbs this score one edge at
//! a time.

use petgraph::graph::NodeIndex;

use super::candidates::ConceptGraph;
use super::components::count_components;

/// Score the graph against every constraint. `0` means satisfied.
pub fn score(graph: &ConceptGraph, constraints: &[Vec<NodeIndex>]) -> i64 {
    score_with(graph, constraints, None)
}

/// Score as if `extra` were already a link, without touching the graph.
/// This is how candidate gain is evaluated: the graph is only mutated on
/// acceptance, so a rejected candidate leaves no trace.
pub fn score_with(
    graph: &ConceptGraph,
    constraints: &[Vec<NodeIndex>],
    extra: Option<(NodeIndex, NodeIndex)>,
) -> i64 {
    constraints
        .iter()
        .map(|nodes| {
            if nodes.is_empty() {
                0
            } else {
                1 - induced_components(graph, nodes, extra) as i64
            }
        })
        .sum()
}

/// Constraint indices whose induced subgraph is still disconnected.
pub fn unsatisfied(graph: &ConceptGraph, constraints: &[Vec<NodeIndex>]) -> Vec<usize> {
    constraints
        .iter()
        .enumerate()
        .filter(|(_, nodes)| !nodes.is_empty() && induced_components(graph, nodes, None) > 1)
        .map(|(i, _)| i)
        .collect()
}

fn induced_components(
    graph: &ConceptGraph,
    nodes: &[NodeIndex],
    extra: Option<(NodeIndex, NodeIndex)>,
) -> usize {
    count_components(nodes.len(), |i, j| {
        let (a, b) = (nodes[i], nodes[j]);
        graph.has_link(a, b)
            || extra.is_some_and(|(u, v)| (a == u && b == v) || (a == v && b == u))
    })
}
