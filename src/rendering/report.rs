//! Terminal report for a finished run.
//!
//! Mirrors the classic "FINAL GRAPH" summary: node list, edge count,
//! per-node neighbor sets, and the important links, followed by run
//! statistics when asked. Color is optional so the report stays pipeable.

use owo_colors::OwoColorize;

use crate::inference::{FinalMap, RunStats};

/// Color helpers for the report. Every method degrades to plain text when
/// color is off.
struct Palette {
    enabled: bool,
}

impl Palette {
    fn heading(&self, s: &str) -> String {
        if self.enabled {
            s.bright_blue().bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn concept(&self, s: &str) -> String {
        if self.enabled {
            s.cyan().to_string()
        } else {
            s.to_string()
        }
    }

    fn important(&self, s: &str) -> String {
        if self.enabled {
            s.bright_red().bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn dim(&self, s: &str) -> String {
        if self.enabled {
            s.dimmed().to_string()
        } else {
            s.to_string()
        }
    }
}

/// Render the human-readable map summary.
pub fn render_report(map: &FinalMap, color: bool) -> String {
    let palette = Palette { enabled: color };
    let mut lines = Vec::new();

    lines.push(palette.heading("FINAL GRAPH"));
    lines.push(String::new());

    let nodes: Vec<String> =
        map.concepts().iter().map(|c| palette.concept(c.as_str())).collect();
    lines.push("Nodes:".to_string());
    lines.push(format!("  {}", nodes.join(", ")));
    lines.push(String::new());

    lines.push(format!("Total number of edges: {}", map.edge_count()));
    lines.push(String::new());

    lines.push("Nodes and their direct neighbors:".to_string());
    for concept in map.concepts() {
        let neighbors = map.neighbors(concept);
        let rendered = if neighbors.is_empty() {
            palette.dim("(none)")
        } else {
            neighbors
                .iter()
                .map(|n| palette.concept(n.as_str()))
                .collect::<Vec<_>>()
                .join(", ")
        };
        lines.push(format!("  {}: {}", concept, rendered));
    }
    lines.push(String::new());

    lines.push("Important links:".to_string());
    let important = map.important_links();
    if important.is_empty() {
        lines.push(format!("  {}", palette.dim("(none)")));
    } else {
        for edge in important {
            lines.push(format!(
                "  {} - {} {}",
                palette.important(edge.a.as_str()),
                palette.important(edge.b.as_str()),
                palette.dim(&format!("(seen {}x)", edge.frequency)),
            ));
        }
    }

    lines.join("\n")
}

/// Render the run-statistics block.
pub fn render_stats(stats: &RunStats) -> String {
    let mut lines = vec!["Run statistics:".to_string()];
    lines.push(format!("  iterations: {}", stats.iterations));
    lines.push(format!("  edges accepted: {}", stats.total_steps));
    lines.push(format!("  stuck iterations: {}", stats.stuck_iterations));
    lines.push(format!("  oov edges skipped: {}", stats.oov_skipped));
    lines.push(format!("  seed: {}", stats.seed));
    lines.join("\n")
}
