//! Inventory and configuration loading from semmap.toml.
//!
//! The concept and language inventories are fixed per run: they define
//! which labels the final map is drawn over and which languages the
//! resampler may draw. Defaults reproduce the published twelve-language
//! emotion study; a standalone `semmap.toml` can override any of it.
//!
//! ## Example
//!
//! ```toml
//! iterations = 1000
//! sample-size = 12
//! keep-threshold = 250
//! importance-threshold = 500
//! weight-norm = 200.0
//! languages = ["Lakota", "Nuer", "Mawng"]
//! concepts = ["LOVE", "FEAR", "PITY"]
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::MapError;
use crate::types::{Concept, Language, MapConfig};

/// Language sample of the reference dataset.
pub const REFERENCE_LANGUAGES: &[&str] = &[
    "Rapanui",
    "Lezgian",
    "Sherbro",
    "Nuer",
    "Palula",
    "Mauwake",
    "Mawng",
    "Yir-Yoront",
    "Cusco Quechua",
    "Paraguayan Guarani",
    "Lakota",
    "Passamaquoddy-melecite",
];

/// Concept inventory of the reference dataset. "HAPPYNESS" is the label
/// used in the source tables and is kept verbatim so corpus files match
/// without normalization.
pub const REFERENCE_CONCEPTS: &[&str] = &[
    "LOVE",
    "HAPPYNESS",
    "ANGER",
    "MISSING",
    "FEAR",
    "WORRY",
    "SHAME",
    "SURPRISE",
    "TRUST",
    "RESPECT",
    "SADNESS",
    "PITY",
];

static REFERENCE: Lazy<Inventory> = Lazy::new(|| {
    Inventory::new(
        REFERENCE_LANGUAGES.iter().map(|l| Language::from(*l)).collect(),
        REFERENCE_CONCEPTS.iter().map(|c| Concept::from(*c)).collect(),
    )
    .expect("reference inventory is well-formed")
});

/// The fixed frame of one inference run: the resampleable languages and the
/// concepts the map is drawn over.
///
/// Concept order is significant: it is the canonical order for edge
/// endpoints and for every rendered output, so two runs over the same
/// inventory always name an edge the same way round.
#[derive(Debug, Clone)]
pub struct Inventory {
    languages: Vec<Language>,
    concepts: Vec<Concept>,
    concept_pos: HashMap<Concept, usize>,
}

impl Inventory {
    /// Build an inventory, rejecting empty or duplicated label lists.
    pub fn new(languages: Vec<Language>, concepts: Vec<Concept>) -> Result<Self, MapError> {
        if languages.is_empty() {
            return Err(MapError::EmptyInventory("languages"));
        }
        if concepts.is_empty() {
            return Err(MapError::EmptyInventory("concepts"));
        }

        let mut seen = HashMap::new();
        for language in &languages {
            if seen.insert(language.as_str().to_string(), ()).is_some() {
                return Err(MapError::DuplicateLabel {
                    kind: "language",
                    label: language.as_str().to_string(),
                });
            }
        }

        let mut concept_pos = HashMap::with_capacity(concepts.len());
        for (pos, concept) in concepts.iter().enumerate() {
            if concept_pos.insert(concept.clone(), pos).is_some() {
                return Err(MapError::DuplicateLabel {
                    kind: "concept",
                    label: concept.as_str().to_string(),
                });
            }
        }

        Ok(Self { languages, concepts, concept_pos })
    }

    /// The twelve-language, twelve-concept inventory of the reference study.
    pub fn reference() -> Self {
        REFERENCE.clone()
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// Position of a concept in the canonical order, if it is in vocabulary.
    pub fn position(&self, concept: &Concept) -> Option<usize> {
        self.concept_pos.get(concept).copied()
    }

    pub fn contains(&self, concept: &Concept) -> bool {
        self.concept_pos.contains_key(concept)
    }

    /// Order two distinct in-vocabulary concepts canonically (by inventory
    /// position). Returns `None` for a self-pair or an unknown concept.
    pub fn canonical_pair(&self, a: &Concept, b: &Concept) -> Option<(Concept, Concept)> {
        let pa = self.position(a)?;
        let pb = self.position(b)?;
        if pa == pb {
            return None;
        }
        if pa < pb {
            Some((a.clone(), b.clone()))
        } else {
            Some((b.clone(), a.clone()))
        }
    }
}

/// Raw config as deserialized from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    languages: Option<Vec<String>>,
    concepts: Option<Vec<String>>,
    iterations: Option<usize>,
    sample_size: Option<usize>,
    keep_threshold: Option<u32>,
    importance_threshold: Option<u32>,
    weight_norm: Option<f64>,
}

/// Settings read from a semmap.toml file. Every field is optional; absent
/// fields fall back to [`MapConfig::default`] and the reference inventory.
/// Command-line flags override whatever this layer provides.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// Source file for this config (for display).
    pub source: Option<PathBuf>,

    pub languages: Option<Vec<String>>,
    pub concepts: Option<Vec<String>>,
    pub iterations: Option<usize>,
    pub sample_size: Option<usize>,
    pub keep_threshold: Option<u32>,
    pub importance_threshold: Option<u32>,
    pub weight_norm: Option<f64>,
}

impl FileConfig {
    /// Load configuration for a run over the given input table.
    ///
    /// Search order:
    /// 1. semmap.toml next to the input table
    /// 2. semmap.toml in the working directory
    /// 3. Defaults if nothing found
    ///
    /// A file that fails to parse is skipped, not fatal; pass an explicit
    /// path through [`FileConfig::from_path`] to make it fatal instead.
    pub fn load(table: &Path) -> Self {
        if let Some(dir) = table.parent() {
            let candidate = dir.join("semmap.toml");
            if candidate.exists() {
                if let Some(config) = Self::load_semmap_toml(&candidate) {
                    return config;
                }
            }
        }

        let cwd = Path::new("semmap.toml");
        if cwd.exists() {
            if let Some(config) = Self::load_semmap_toml(cwd) {
                return config;
            }
        }

        Self::default()
    }

    /// Load an explicitly named config file. Unlike discovery via
    /// [`FileConfig::load`], read or parse failures are errors.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(Self::from_raw(raw, path.to_path_buf()))
    }

    fn load_semmap_toml(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let raw: RawConfig = toml::from_str(&content).ok()?;
        Some(Self::from_raw(raw, path.to_path_buf()))
    }

    fn from_raw(raw: RawConfig, source: PathBuf) -> Self {
        Self {
            source: Some(source),
            languages: raw.languages,
            concepts: raw.concepts,
            iterations: raw.iterations,
            sample_size: raw.sample_size,
            keep_threshold: raw.keep_threshold,
            importance_threshold: raw.importance_threshold,
            weight_norm: raw.weight_norm,
        }
    }

    /// Build the run inventory: the reference lists with whichever halves
    /// this file overrides.
    pub fn inventory(&self) -> Result<Inventory, MapError> {
        let languages = match &self.languages {
            Some(custom) => custom.iter().map(|l| Language::from(l.as_str())).collect(),
            None => REFERENCE_LANGUAGES.iter().map(|l| Language::from(*l)).collect(),
        };
        let concepts = match &self.concepts {
            Some(custom) => custom.iter().map(|c| Concept::from(c.as_str())).collect(),
            None => REFERENCE_CONCEPTS.iter().map(|c| Concept::from(*c)).collect(),
        };
        Inventory::new(languages, concepts)
    }

    /// Fold the file's overrides into a [`MapConfig`].
    pub fn apply(&self, config: &mut MapConfig) {
        if let Some(n) = self.iterations {
            config.iterations = n;
        }
        if let Some(k) = self.sample_size {
            config.sample_size = k;
        }
        if let Some(t) = self.keep_threshold {
            config.keep_threshold = t;
        }
        if let Some(t) = self.importance_threshold {
            config.importance_threshold = t;
        }
        if let Some(w) = self.weight_norm {
            config.weight_norm = w;
        }
    }

    /// Format config for verbose display.
    pub fn display_summary(&self) -> String {
        let mut lines = Vec::new();

        if let Some(ref source) = self.source {
            lines.push(format!("   Config: {}", source.display()));
        } else {
            lines.push("   Config: (defaults)".to_string());
        }

        if let Some(ref languages) = self.languages {
            lines.push(format!("   Languages: {} custom", languages.len()));
        }
        if let Some(ref concepts) = self.concepts {
            lines.push(format!("   Concepts: {} custom", concepts.len()));
        }
        if let Some(n) = self.iterations {
            lines.push(format!("   Iterations: {}", n));
        }
        if let Some(k) = self.sample_size {
            lines.push(format!("   Sample size: {}", k));
        }

        lines.join("\n")
    }
}
