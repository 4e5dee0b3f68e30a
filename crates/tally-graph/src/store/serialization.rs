//! Flatten/restore methods for AttributionStore.

use tracing::{debug, warn};

use super::{AttributionStore, FxIndexSet};
use crate::entity::{DEFAULT_ASSET_ICON, MODULE_SUFFIX, class_icon, module_icon};
use crate::persist::{AttributionRecord, PersistedAttribution};
use crate::{Error, Result};

impl AttributionStore {
    /// Convert the store into its flat persisted layout.
    ///
    /// Emits one record per graph entry in first-mention order. Entries
    /// without an icon persist the default asset icon, entries without a size
    /// persist zero. Module sizes are written a second time as a positional
    /// list for readers of the older layout.
    pub fn flatten(&self) -> PersistedAttribution {
        let records: Vec<AttributionRecord> = self
            .dependencies
            .iter()
            .map(|(entity, reasons)| AttributionRecord {
                entity: entity.clone(),
                dependencies: reasons.iter().cloned().collect(),
                icon: self
                    .icons
                    .get(entity)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_ASSET_ICON.to_owned()),
                size: self.size_of(entity),
            })
            .collect();

        let legacy_module_sizes = self.modules.iter().map(|m| self.size_of(m)).collect();

        debug!(
            records = records.len(),
            modules = self.modules.len(),
            "flattened attribution store"
        );

        PersistedAttribution {
            records,
            modules: self.modules.clone(),
            legacy_module_sizes,
            total_size: self.total_size,
        }
    }

    /// Rebuild a store from its persisted layout.
    ///
    /// Records restore the graph, icons and sizes; the positional module size
    /// list is applied last and overrides record sizes for modules. Modules
    /// and dependency targets without a record of their own get a graph
    /// entry and the default icon `add_module` or `register_dependency`
    /// would have given them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Corrupt`] if the module size list is not aligned with
    /// the module list, or if a module or record entity appears twice. Nothing
    /// is returned on failure, so a caller's existing store stays untouched.
    pub fn restore(persisted: PersistedAttribution) -> Result<Self> {
        let PersistedAttribution {
            records,
            modules,
            legacy_module_sizes,
            total_size,
        } = persisted;

        if legacy_module_sizes.len() != modules.len() {
            warn!(
                modules = modules.len(),
                sizes = legacy_module_sizes.len(),
                "module size list is misaligned"
            );
            return Err(Error::Corrupt(format!(
                "{} module sizes for {} modules",
                legacy_module_sizes.len(),
                modules.len()
            )));
        }

        let mut store = Self::empty();

        for record in records {
            let AttributionRecord {
                entity,
                dependencies,
                icon,
                size,
            } = record;

            if store.dependencies.contains_key(&entity) {
                warn!(entity = %entity, "duplicate attribution record");
                return Err(Error::Corrupt(format!("duplicate record for '{entity}'")));
            }

            store.icons.insert(entity.clone(), icon);
            store.sizes.insert(entity.clone(), size);
            let reasons: FxIndexSet<String> = dependencies.into_iter().collect();
            store.dependencies.insert(entity, reasons);
        }

        for module in modules {
            if store.modules.contains(&module) {
                return Err(Error::Corrupt(format!("module '{module}' listed twice")));
            }
            store.modules.push(module);
        }

        for (module, size) in store.modules.iter().zip(legacy_module_sizes) {
            store.sizes.insert(module.clone(), size);
        }

        store.fill_missing_entries();

        store.total_size = total_size;
        store.seed_reserved();

        debug!(
            entities = store.dependencies.len(),
            modules = store.modules.len(),
            "restored attribution store"
        );

        Ok(store)
    }
}

impl AttributionStore {
    /// Give record-less modules and dependency targets the entries and icons
    /// the mutation methods would have given them.
    fn fill_missing_entries(&mut self) {
        let modules: Vec<String> = self
            .modules
            .iter()
            .filter(|module| !self.dependencies.contains_key(*module))
            .cloned()
            .collect();
        for module in modules {
            debug!(module = %module, "module has no record, using default icon");
            let raw = module.strip_suffix(MODULE_SUFFIX).unwrap_or(module.as_str());
            let icon = module_icon(raw);
            self.set_icon(&module, icon);
        }

        let targets: FxIndexSet<String> = self
            .dependencies
            .values()
            .flatten()
            .filter(|reason| !self.dependencies.contains_key(*reason))
            .cloned()
            .collect();
        for target in targets {
            debug!(entity = %target, "dependency target has no record, using class icon");
            self.set_icon(&target, class_icon(&target));
        }
    }
}

impl From<&AttributionStore> for PersistedAttribution {
    fn from(store: &AttributionStore) -> Self {
        store.flatten()
    }
}

impl TryFrom<PersistedAttribution> for AttributionStore {
    type Error = Error;

    fn try_from(persisted: PersistedAttribution) -> Result<Self> {
        Self::restore(persisted)
    }
}
