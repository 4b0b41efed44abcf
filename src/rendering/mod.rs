//! Output rendering - from the final map to terminal and DOT output.
//!
//! Two surfaces:
//! - Report mode: colorized "FINAL GRAPH" summary for the terminal
//! - DOT mode: GraphViz serialization for `neato` layout

mod dot;
mod report;

pub use dot::render_dot;
pub use report::{render_report, render_stats};
