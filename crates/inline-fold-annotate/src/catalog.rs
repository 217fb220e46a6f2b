//! Injector id catalog.
//!
//! The id service answers with `{"result": [{"title": ..., "injectorId": ...}, ...]}`. Extra
//! fields are ignored. Fetching the payload is the host's job.

use crate::error::AnnotateError;
use serde::{Deserialize, Serialize};

/// One selectable injector id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdEntry {
    /// Human-readable name, shown as the quick-pick label.
    pub title: String,
    /// The id itself, e.g. `auth-{name}`. Shown as the quick-pick detail.
    pub injector_id: String,
}

impl IdEntry {
    /// Create an entry.
    pub fn new(title: impl Into<String>, injector_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            injector_id: injector_id.into(),
        }
    }

    /// Quick-pick label.
    pub fn label(&self) -> &str {
        &self.title
    }

    /// Quick-pick detail line.
    pub fn detail(&self) -> &str {
        &self.injector_id
    }
}

#[derive(Deserialize)]
struct CatalogPayload {
    result: Vec<IdEntry>,
}

/// The ids offered by the insert and wrap commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdCatalog {
    entries: Vec<IdEntry>,
}

impl IdCatalog {
    /// Parse an id service payload.
    pub fn from_json(payload: &str) -> Result<Self, AnnotateError> {
        let parsed: CatalogPayload = serde_json::from_str(payload)?;
        tracing::debug!(entries = parsed.result.len(), "injector id catalog loaded");
        Ok(Self::from_entries(parsed.result))
    }

    /// Build a catalog from entries already in memory.
    pub fn from_entries(entries: Vec<IdEntry>) -> Self {
        Self { entries }
    }

    /// All entries, in service order.
    pub fn entries(&self) -> &[IdEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
