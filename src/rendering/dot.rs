//! DOT output for GraphViz.
//!
//! The layout is the one the published maps were drawn with and is meant
//! for `neato`:
//!
//! ```text
//! $ neato -Tpdf map.dot -o map.pdf
//! ```
//!
//! Directed wrapper, undirected subgraph with `dir=none`, every inventory
//! concept listed as a node whether or not an edge touches it, pen width
//! carrying the edge weight. Edges are oriented and sorted
//! lexicographically so the same map always serializes to the same bytes.

use crate::inference::FinalMap;

/// Serialize a final map in DOT format.
pub fn render_dot(map: &FinalMap) -> String {
    let mut out = String::from("digraph SemanticMap\n{\n  splines=true;\n");
    out.push_str("  node [ fontname=Arial, fontcolor=blue, fontsize=20];\n");

    for concept in map.concepts() {
        out.push_str(&format!("  \"{}\";\n", escape(concept.as_str())));
    }

    out.push_str("subgraph undirected\n{\n  edge [dir=none];\n");

    let mut edges: Vec<(&str, &str, f64)> = map
        .edges()
        .iter()
        .map(|e| {
            let (a, b) = (e.a.as_str(), e.b.as_str());
            if a < b { (a, b, e.weight) } else { (b, a, e.weight) }
        })
        .collect();
    edges.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));

    for (a, b, weight) in edges {
        out.push_str(&format!(
            "  \"{}\" -> \"{}\"  [color=\"#cc0000ff\",penwidth=\"{:?}\"];\n",
            escape(a),
            escape(b),
            weight
        ));
    }

    out.push_str("  }\n}\n");
    out
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
