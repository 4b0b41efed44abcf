//! Parser for the tab-separated polysemy table.
//!
//! One line per lexical item:
//!
//! ```text
//! Nuer	nhok	{LOVE, PITY}
//! ```
//!
//! Column one names the language, column two the lemma, column three the
//! brace-delimited set of concepts the lemma covers. Parsing is strict:
//! any malformed line aborts the run with its line number, so a silently
//! truncated table can never produce a plausible-looking map.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;

use crate::error::MapError;
use crate::types::{Concept, Observation};

/// Parse a whole table. Errors carry the physical (1-based) line number;
/// blank lines are skipped but still counted.
pub fn parse_corpus(content: &str) -> Result<Vec<Observation>, MapError> {
    let mut observations = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line = index + 1;
        let text = raw_line.trim_end_matches('\r');
        if text.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = text.split('\t').collect();
        if fields.len() != 3 {
            return Err(MapError::MalformedLine {
                line,
                reason: format!("expected 3 tab-separated fields, found {}", fields.len()),
            });
        }

        let language = fields[0].trim();
        let lemma = fields[1].trim();
        if language.is_empty() || lemma.is_empty() {
            return Err(MapError::MalformedLine {
                line,
                reason: "empty language or lemma field".to_string(),
            });
        }

        let senses = parse_senses(fields[2].trim())
            .map_err(|reason| MapError::MalformedLine { line, reason })?;

        observations.push(Observation::new(language, lemma, senses));
    }

    Ok(observations)
}

/// Parse the `{A, B, C}` senses field, deduplicating while preserving
/// first-appearance order.
fn parse_senses(field: &str) -> Result<Vec<Concept>, String> {
    let inner = field
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| format!("senses field not brace-delimited: {:?}", field))?;

    if inner.trim().is_empty() {
        return Err("empty senses set".to_string());
    }

    let mut senses = Vec::new();
    let mut seen = HashSet::new();
    for label in inner.split(',') {
        let label = label.trim();
        if label.is_empty() {
            return Err("empty concept label in senses field".to_string());
        }
        let concept = Concept::from(label);
        if seen.insert(concept.clone()) {
            senses.push(concept);
        }
    }

    Ok(senses)
}

/// Read and parse a table file.
pub fn load_corpus(path: &Path) -> anyhow::Result<Vec<Observation>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading input table {}", path.display()))?;
    let observations = parse_corpus(&content)
        .with_context(|| format!("parsing input table {}", path.display()))?;
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_reference_style_lines() {
        let table = "Nuer\tnhok\t{LOVE, PITY}\nLakota\twastelaka\t{LOVE}\n";
        let corpus = parse_corpus(table).unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0].language.as_str(), "Nuer");
        assert_eq!(corpus[0].lemma, "nhok");
        assert_eq!(corpus[0].senses, vec![Concept::from("LOVE"), Concept::from("PITY")]);
        assert_eq!(corpus[1].senses.len(), 1);
    }

    #[test]
    fn test_skips_blank_lines_and_strips_crlf() {
        let table = "\nNuer\tnhok\t{LOVE, PITY}\r\n   \nMawng\t-la\t{FEAR, WORRY}\n";
        let corpus = parse_corpus(table).unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0].lemma, "nhok");
        assert_eq!(corpus[1].language.as_str(), "Mawng");
    }

    #[test]
    fn test_rejects_wrong_field_count_with_physical_line_number() {
        let table = "Nuer\tnhok\t{LOVE}\n\nLakota\twastelaka\n";
        let err = parse_corpus(table).unwrap_err();

        match err {
            MapError::MalformedLine { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("found 2"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unbraced_and_empty_senses() {
        let unbraced = parse_corpus("Nuer\tnhok\tLOVE, PITY\n").unwrap_err();
        assert!(matches!(unbraced, MapError::MalformedLine { line: 1, .. }));

        let empty = parse_corpus("Nuer\tnhok\t{}\n").unwrap_err();
        match empty {
            MapError::MalformedLine { reason, .. } => assert!(reason.contains("empty senses")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_dedups_senses_preserving_first_appearance_order() {
        let corpus = parse_corpus("Palula\tx\t{WORRY, FEAR, WORRY}\n").unwrap();
        assert_eq!(corpus[0].senses, vec![Concept::from("WORRY"), Concept::from("FEAR")]);
    }

    #[test]
    fn test_tolerates_padding_inside_braces() {
        let corpus = parse_corpus("Palula\tx\t{ SHAME ,SURPRISE }\n").unwrap();
        assert_eq!(corpus[0].senses, vec![Concept::from("SHAME"), Concept::from("SURPRISE")]);
    }

    #[test]
    fn test_empty_input_is_an_empty_corpus() {
        assert!(parse_corpus("").unwrap().is_empty());
        assert!(parse_corpus("\n  \n").unwrap().is_empty());
    }
}
