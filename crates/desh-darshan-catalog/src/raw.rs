//! Raw catalog sources.
//!
//! The catalog is a JSON array of loosely typed place records. It can come
//! from the dataset bundled with this crate, from a file, or from inline
//! JSON text. Whatever the source, an unusable catalog degrades to an empty
//! one when loaded through [`RawCatalog::load`].

use std::{fs, path::PathBuf};

use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::error::{CatalogError, Result};

const EMBEDDED_CATALOG: &str = include_str!("../data/places.json");

/// Embedded records, parsed on first use.
static EMBEDDED_RECORDS: Lazy<Vec<Value>> = Lazy::new(|| {
    parse_records(EMBEDDED_CATALOG).unwrap_or_else(|e| {
        warn!(error = %e, "Embedded catalog is unusable, using an empty catalog");
        Vec::new()
    })
});

/// Where to read the raw catalog from.
#[derive(Debug, Clone, Default)]
pub enum CatalogSource {
    /// The dataset that ships with the crate
    #[default]
    Embedded,
    /// A JSON file on disk
    File(PathBuf),
    /// Inline JSON text
    Json(String),
}

/// The unvalidated records of a catalog, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCatalog {
    records: Vec<Value>,
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_records(text: &str) -> Result<Vec<Value>> {
    if text.trim().is_empty() {
        return Err(CatalogError::EmptySource);
    }
    match serde_json::from_str::<Value>(text)? {
        Value::Array(records) => Ok(records),
        other => Err(CatalogError::NotAnArray(json_kind(&other))),
    }
}

impl RawCatalog {
    #[must_use]
    pub fn from_records(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Read a catalog, reporting why it could not be read.
    pub fn read(source: &CatalogSource) -> Result<Self> {
        let records = match source {
            CatalogSource::Embedded => EMBEDDED_RECORDS.clone(),
            CatalogSource::File(path) => {
                if !path.exists() {
                    return Err(CatalogError::CatalogFileNotFound(path.clone()));
                }
                parse_records(&fs::read_to_string(path)?)?
            }
            CatalogSource::Json(text) => parse_records(text)?,
        };
        Ok(Self { records })
    }

    /// Read a catalog, falling back to an empty one on any error.
    #[instrument(name = "Load raw catalog", level = "info")]
    pub fn load(source: &CatalogSource) -> Self {
        match Self::read(source) {
            Ok(catalog) => {
                info!(records = catalog.len(), "Raw catalog loaded");
                catalog
            }
            Err(e) => {
                warn!(error = %e, "Catalog unavailable, continuing with an empty catalog");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
