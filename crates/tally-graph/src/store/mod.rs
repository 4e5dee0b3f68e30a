//! In-memory attribution store.
//!
//! The live structure is a set of insertion-ordered maps keyed by entity name.
//! Methods are grouped into separate files that each add an `impl` block.

mod mutations;
mod queries;
mod serialization;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxBuildHasher, FxHashMap as HashMap};

use crate::entity::{REQUIRED_BY_SCRIPTS, SCRIPT_ICON};

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub(crate) type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Records which modules a build kept and why.
///
/// The store is purely additive: the pipeline records facts in whatever order
/// it discovers them, reporting tools query them afterwards. Unknown names are
/// materialised on first mention instead of being rejected.
#[derive(Debug, Clone)]
pub struct AttributionStore {
    /// Module display names in insertion order.
    pub(crate) modules: Vec<String>,
    /// entity -> direct reasons for its inclusion.
    pub(crate) dependencies: FxIndexMap<String, FxIndexSet<String>>,
    pub(crate) sizes: HashMap<String, u64>,
    pub(crate) icons: HashMap<String, String>,
    /// Caller-maintained aggregate, never derived from `sizes`.
    pub(crate) total_size: u64,
}

impl AttributionStore {
    /// Create a store with the script reason already iconified.
    pub fn new() -> Self {
        let mut store = Self::empty();
        store.seed_reserved();
        store
    }

    pub(crate) fn empty() -> Self {
        Self {
            modules: Vec::new(),
            dependencies: FxIndexMap::default(),
            sizes: HashMap::default(),
            icons: HashMap::default(),
            total_size: 0,
        }
    }

    pub(crate) fn seed_reserved(&mut self) {
        if !self.icons.contains_key(REQUIRED_BY_SCRIPTS) {
            self.set_icon(REQUIRED_BY_SCRIPTS, SCRIPT_ICON);
        }
    }
}

impl Default for AttributionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Stores are equal when a reporting tool could not tell them apart: same
/// module order, same edge sets, same per-entity icon and size answers.
impl PartialEq for AttributionStore {
    fn eq(&self, other: &Self) -> bool {
        if self.modules != other.modules
            || self.total_size != other.total_size
            || self.dependencies != other.dependencies
        {
            return false;
        }

        self.known_names()
            .chain(other.known_names())
            .all(|name| {
                self.size_of(name) == other.size_of(name) && self.icon_of(name) == other.icon_of(name)
            })
    }
}

impl Eq for AttributionStore {}
