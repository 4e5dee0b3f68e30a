//! Mutation methods for AttributionStore.

use tracing::trace;

use super::AttributionStore;
use crate::entity::{class_icon, module_display_name, module_icon};

impl AttributionStore {
    /// Record that `reason` is one cause of `entity` being included.
    ///
    /// Both names are created on demand. A reason without an icon gets the
    /// class icon derived from its name, and every reason gets a graph entry of
    /// its own so it can later be explained in turn.
    pub fn register_dependency(&mut self, entity: &str, reason: &str) {
        let added = self
            .dependencies
            .entry(entity.to_owned())
            .or_default()
            .insert(reason.to_owned());

        if !self.icons.contains_key(reason) {
            self.set_icon(reason, class_icon(reason));
        }
        self.dependencies.entry(reason.to_owned()).or_default();

        if added {
            trace!(entity, reason, "recorded inclusion reason");
        }
    }

    /// Register a module under its suffixed display name.
    ///
    /// Returns the display name, which is the key to use for every later call.
    pub fn add_module(&mut self, raw_name: &str) -> String {
        self.add_module_with_options(raw_name, true)
    }

    /// Register a module, optionally keeping `raw_name` verbatim.
    ///
    /// Re-adding a known module never resets its size or icon; the first
    /// registration wins until the setters overwrite it.
    pub fn add_module_with_options(&mut self, raw_name: &str, apply_suffix: bool) -> String {
        let name = if apply_suffix {
            module_display_name(raw_name)
        } else {
            raw_name.to_owned()
        };

        if !self.modules.contains(&name) {
            trace!(module = %name, "added module");
            self.modules.push(name.clone());
        }
        self.sizes.entry(name.clone()).or_insert(0);
        if !self.icons.contains_key(&name) {
            self.set_icon(&name, module_icon(raw_name));
        }

        name
    }

    /// Overwrite the icon of `entity`, creating its graph entry if needed.
    pub fn set_icon(&mut self, entity: &str, icon: impl Into<String>) {
        self.icons.insert(entity.to_owned(), icon.into());
        self.dependencies.entry(entity.to_owned()).or_default();
    }

    /// Set the byte size of a registered module.
    ///
    /// Names that are not in the module list are ignored; the return value
    /// tells whether the size was stored.
    pub fn add_module_size(&mut self, module: &str, size: u64) -> bool {
        if !self.contains_module(module) {
            trace!(module, size, "ignored size for unregistered module");
            return false;
        }
        self.sizes.insert(module.to_owned(), size);
        true
    }

    /// Replace the aggregate build size.
    pub fn set_total_size(&mut self, total: u64) {
        self.total_size = total;
    }

    /// Add to the aggregate build size, saturating at `u64::MAX`.
    pub fn add_total_size(&mut self, bytes: u64) {
        self.total_size = self.total_size.saturating_add(bytes);
    }
}
