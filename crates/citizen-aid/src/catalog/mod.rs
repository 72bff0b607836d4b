//! Immutable reference data describing the government schemes the pipeline can recommend.
//!
//! The catalog is built once at process start, either from the built-in table or from a JSON
//! document with the same shape, and is shared read-only across requests.

mod data;
pub mod domain;

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use domain::{
    Comparator, EligibilityThresholds, GoverningAttribute, Scheme, SchemeCategory, SchemeDetails,
    ThresholdPredicate,
};

/// Errors raised while loading a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read scheme catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scheme catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scheme catalog lists '{0}' more than once")]
    DuplicateScheme(String),
    #[error("scheme catalog contains no schemes")]
    Empty,
}

#[derive(Debug, Deserialize, Serialize)]
struct CatalogDocument {
    schemes: Vec<Scheme>,
}

/// Read-only scheme lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeCatalog {
    schemes: Vec<Scheme>,
}

impl SchemeCatalog {
    /// Catalog shipped with the service.
    pub fn standard() -> Self {
        Self {
            schemes: data::standard_schemes(),
        }
    }

    pub fn from_schemes(schemes: Vec<Scheme>) -> Result<Self, CatalogError> {
        if schemes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for scheme in &schemes {
            if !seen.insert(scheme.name.as_str()) {
                return Err(CatalogError::DuplicateScheme(scheme.name.clone()));
            }
        }

        Ok(Self { schemes })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::from_schemes(document.schemes)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Case-sensitive exact match on the scheme name.
    pub fn lookup_by_name(&self, name: &str) -> Option<&Scheme> {
        self.schemes.iter().find(|scheme| scheme.name == name)
    }

    /// Schemes of one category in catalog order; empty when the category has none.
    pub fn all_in_category(&self, category: SchemeCategory) -> Vec<&Scheme> {
        self.schemes
            .iter()
            .filter(|scheme| scheme.category == category)
            .collect()
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup_by_name(name).is_some()
    }

    pub fn scheme_details(&self, name: &str) -> Option<SchemeDetails> {
        self.lookup_by_name(name).map(SchemeDetails::from)
    }

    /// Catalog grouped by category, in category priority order.
    pub fn grouped(&self) -> BTreeMap<SchemeCategory, Vec<&Scheme>> {
        let mut grouped: BTreeMap<SchemeCategory, Vec<&Scheme>> = BTreeMap::new();
        for scheme in &self.schemes {
            grouped.entry(scheme.category).or_default().push(scheme);
        }
        grouped
    }

    /// Compact JSON rendering embedded in generative prompts.
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string(&self.grouped()).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for SchemeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
