//! Flat persisted layout of an attribution store.
//!
//! The report storage only understands scalars and ordered sequences of
//! records, so the store is written as a list of per-entity records plus the
//! module list and a positional list of module sizes. The positional list
//! predates the per-record size field and still wins for modules on load.

use serde::{Deserialize, Serialize};

/// One graph entry: an entity, its direct reasons, icon and size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionRecord {
    pub entity: String,
    /// Snapshot of the reason set; order is not meaningful.
    pub dependencies: Vec<String>,
    pub icon: String,
    pub size: u64,
}

/// Everything needed to rebuild an [`AttributionStore`](crate::AttributionStore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAttribution {
    pub records: Vec<AttributionRecord>,
    /// Module display names in insertion order.
    pub modules: Vec<String>,
    /// Module sizes aligned by position with `modules`.
    pub legacy_module_sizes: Vec<u64>,
    pub total_size: u64,
}

impl PersistedAttribution {
    /// Find the record written for `entity`.
    pub fn record(&self, entity: &str) -> Option<&AttributionRecord> {
        self.records.iter().find(|record| record.entity == entity)
    }

    /// Whether the legacy size list lines up with the module list.
    pub fn is_aligned(&self) -> bool {
        self.modules.len() == self.legacy_module_sizes.len()
    }

    /// Legacy size stored for `module`, if it is in the module list.
    pub fn legacy_size(&self, module: &str) -> Option<u64> {
        self.modules
            .iter()
            .position(|name| name == module)
            .and_then(|index| self.legacy_module_sizes.get(index).copied())
    }
}
