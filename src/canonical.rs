//! Canonical name resolution.
//!
//! A curated override table maps raw name variants (companies, schools,
//! regulators) to their single canonical spelling. The table is loaded once
//! from JSON at process start and passed explicitly wherever names need
//! resolving; there is no ambient global state.
//!
//! Table shape: `{ "companies": { "variant": "canonical", ... }, ... }`.
//! Sections or keys beginning with an underscore are comments, and the
//! reserved `"说明"` key inside a section is a human-readable description;
//! both are skipped at load time.

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Reserved per-section description key in the override table.
const DESCRIPTION_KEY: &str = "说明";

/// Minimum length (chars) for a raw company name to be matchable at all.
const MIN_MATCH_LEN: usize = 4;
/// Minimum length (chars) before the containment heuristic is attempted.
const MIN_CONTAINMENT_LEN: usize = 8;
/// A known name contained in a longer raw name still matches when the raw
/// name is at most this many chars longer.
const CONTAINMENT_SLACK: usize = 4;

#[derive(Error, Debug)]
pub enum CanonicalError {
    #[error("Failed to read canonical name table {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse canonical name table {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Canonical name table root must be a JSON object")]
    NotAnObject,
}

/// Immutable category -> (variant -> canonical) mapping.
#[derive(Debug, Clone, Default)]
pub struct CanonicalTable {
    categories: HashMap<String, HashMap<String, String>>,
}

impl CanonicalTable {
    /// Load the table from a JSON file. A missing file is not an error:
    /// resolution degrades to a no-op, matching the "missing mapping means
    /// pass-through" contract.
    pub fn load(path: &Path) -> Result<Self, CanonicalError> {
        if !path.exists() {
            info!("No canonical name table at {}, resolution disabled", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| CanonicalError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let table = Self::from_json_str(&content).map_err(|e| match e {
            CanonicalError::Parse { source, .. } => CanonicalError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        info!(
            "Loaded canonical name table from {}: {} categories",
            path.display(),
            table.categories.len()
        );
        Ok(table)
    }

    /// Parse the table from raw JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, CanonicalError> {
        let raw: Value = serde_json::from_str(content).map_err(|e| CanonicalError::Parse {
            path: "<inline>".to_string(),
            source: e,
        })?;
        let root = raw.as_object().ok_or(CanonicalError::NotAnObject)?;

        let mut categories = HashMap::new();
        for (section, mapping) in root {
            if section.starts_with('_') {
                continue;
            }
            let Some(entries) = mapping.as_object() else {
                continue;
            };
            let mut resolved = HashMap::new();
            for (variant, canonical) in entries {
                if variant.starts_with('_') || variant == DESCRIPTION_KEY {
                    continue;
                }
                if let Some(canonical) = canonical.as_str() {
                    resolved.insert(variant.clone(), canonical.to_string());
                }
            }
            debug!("Canonical section '{}': {} overrides", section, resolved.len());
            categories.insert(section.clone(), resolved);
        }
        Ok(CanonicalTable { categories })
    }

    /// Replace every name present as a key in the category's override table
    /// with its canonical value, passing unknown names through unchanged.
    /// Two raw names mapping to the same canonical value collapse to one
    /// occurrence at the position of the first. Idempotent.
    pub fn apply(&self, category: &str, names: &[String]) -> Vec<String> {
        let mapping = self.categories.get(category);
        let mut seen = HashSet::new();
        let mut result = Vec::with_capacity(names.len());
        for name in names {
            let canonical = mapping
                .and_then(|m| m.get(name))
                .cloned()
                .unwrap_or_else(|| name.clone());
            if seen.insert(canonical.clone()) {
                result.push(canonical);
            }
        }
        result
    }

    /// The variant -> canonical overrides for one category, if present.
    pub fn overrides(&self, category: &str) -> Option<&HashMap<String, String>> {
        self.categories.get(category)
    }
}

/// Matches free-text company names from extracted career steps against the
/// legitimate institution set: current roster employers plus every canonical
/// company value from the override table. Failure to match yields `None`,
/// never a guess.
#[derive(Debug, Clone)]
pub struct CompanyMatcher {
    variant_map: HashMap<String, String>,
    known: HashSet<String>,
    /// Sorted copy of `known` so containment scans are deterministic.
    known_sorted: Vec<String>,
}

impl CompanyMatcher {
    pub fn new<I>(table: &CanonicalTable, roster_companies: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut known: HashSet<String> = roster_companies.into_iter().collect();
        let variant_map: HashMap<String, String> = table
            .overrides("companies")
            .cloned()
            .unwrap_or_default();
        for canonical in variant_map.values() {
            known.insert(canonical.clone());
        }
        let mut known_sorted: Vec<String> = known.iter().cloned().collect();
        known_sorted.sort();
        CompanyMatcher {
            variant_map,
            known,
            known_sorted,
        }
    }

    /// Resolve a raw extracted company name to a known canonical name.
    ///
    /// Order: exact variant override, exact known name, then a bounded
    /// containment heuristic for names of 8+ chars (the raw name inside a
    /// known name, or a known name inside a slightly longer raw name).
    pub fn match_company(&self, raw: &str) -> Option<String> {
        let name = raw.trim();
        if name.is_empty() || name.chars().count() < MIN_MATCH_LEN {
            return None;
        }
        if let Some(canonical) = self.variant_map.get(name) {
            return Some(canonical.clone());
        }
        if self.known.contains(name) {
            return Some(name.to_string());
        }
        self.containment_match(name)
    }

    fn containment_match(&self, name: &str) -> Option<String> {
        if name.chars().count() < MIN_CONTAINMENT_LEN {
            return None;
        }
        let name_len = name.chars().count();
        for known in &self.known_sorted {
            if known.contains(name) {
                return Some(known.clone());
            }
            if name.contains(known.as_str())
                && name_len <= known.chars().count() + CONTAINMENT_SLACK
            {
                return Some(known.clone());
            }
        }
        None
    }

    /// True if the name is one of the known current-employer / canonical
    /// institution names (exact match only).
    pub fn is_known(&self, name: &str) -> bool {
        self.known.contains(name)
    }
}
