//! Query methods for AttributionStore.

use super::AttributionStore;
use crate::entity::DEFAULT_ASSET_ICON;

impl AttributionStore {
    /// Modules present in the build, in the order they were added.
    pub fn included_modules(&self) -> &[String] {
        &self.modules
    }

    /// Direct reasons for including `entity`.
    ///
    /// This is a single hop: reasons of reasons are not followed. Unknown
    /// entities yield an empty list. The order carries no meaning.
    pub fn reasons_for_including(&self, entity: &str) -> Vec<&str> {
        self.dependencies
            .get(entity)
            .map(|reasons| reasons.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Byte size recorded for `entity`, zero when none was recorded.
    pub fn size_of(&self, entity: &str) -> u64 {
        self.sizes.get(entity).copied().unwrap_or(0)
    }

    /// Icon reference for `entity`.
    ///
    /// Graph entries without an explicit icon report the default asset icon,
    /// which is also what they persist as. Unknown entities have no icon.
    pub fn icon_of(&self, entity: &str) -> Option<&str> {
        match self.icons.get(entity) {
            Some(icon) => Some(icon),
            None if self.dependencies.contains_key(entity) => Some(DEFAULT_ASSET_ICON),
            None => None,
        }
    }

    /// Aggregate size of the build as maintained by the caller.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Whether `name` is a registered module display name.
    pub fn contains_module(&self, name: &str) -> bool {
        self.modules.iter().any(|module| module == name)
    }

    /// Whether `entity` has a graph entry (possibly without reasons).
    pub fn is_known(&self, entity: &str) -> bool {
        self.dependencies.contains_key(entity)
    }

    /// All entities with a graph entry, in first-mention order.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    /// Entities that list `reason` among their direct reasons.
    pub fn entities_caused_by<'a>(&'a self, reason: &'a str) -> impl Iterator<Item = &'a str> {
        self.dependencies
            .iter()
            .filter(move |(_, reasons)| reasons.contains(reason))
            .map(|(entity, _)| entity.as_str())
    }

    /// Number of recorded attribution edges.
    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(|reasons| reasons.len()).sum()
    }

    /// Sum of the recorded module sizes.
    pub fn module_size_sum(&self) -> u64 {
        self.modules
            .iter()
            .fold(0u64, |sum, module| sum.saturating_add(self.size_of(module)))
    }

    pub(crate) fn known_names(&self) -> impl Iterator<Item = &str> {
        self.modules
            .iter()
            .chain(self.dependencies.keys())
            .chain(self.sizes.keys())
            .chain(self.icons.keys())
            .map(String::as_str)
    }
}
