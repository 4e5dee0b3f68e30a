//! # tally-graph
//!
//! Inclusion attribution graph for a finished build.
//!
//! A build pipeline records, while it runs, which optional engine modules and
//! components ended up in the output and what caused each of them to be kept.
//! Reporting tools load the finished record afterwards and ask "why is X
//! here?". This crate is the recorder and its persistence layer; it never
//! decides what gets included, it only stores the facts it is told.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    BuildReport                        │
//! │  (name, platform, timestamp, named appendices)        │
//! └──────────────────────────┬───────────────────────────┘
//!                            │ at most one
//!                            ▼
//!              ┌───────────────────────────┐
//!              │     AttributionStore      │
//!              │  modules   (ordered)      │
//!              │  graph     entity → {why} │
//!              │  sizes     entity → bytes │
//!              │  icons     entity → icon  │
//!              └─────────────┬─────────────┘
//!                            │ flatten / restore
//!                            ▼
//!              ┌───────────────────────────┐
//!              │   PersistedAttribution    │
//!              │ (records + legacy sizes)  │
//!              └───────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tally_graph::{BuildReport, REQUIRED_BY_SCRIPTS};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut report = BuildReport::new("player", "linux64");
//! let store = report.attribution_mut();
//!
//! let physics = store.add_module("Physics");
//! store.register_dependency(&physics, "Rigidbody");
//! store.register_dependency("Rigidbody", REQUIRED_BY_SCRIPTS);
//! store.add_module_size(&physics, 1024);
//!
//! assert_eq!(store.included_modules(), ["Physics Module"]);
//! assert!(store.reasons_for_including("Physics Module").contains(&"Rigidbody"));
//!
//! let bytes = report.to_bytes()?;
//! let restored = BuildReport::from_bytes(&bytes)?;
//! assert_eq!(restored.attribution().map(|s| s.size_of("Physics Module")), Some(1024));
//! # Ok(())
//! # }
//! ```
//!
//! ## Method groups
//!
//! `AttributionStore` methods are split across files by concern:
//!
//! - `store::mutations` - recording facts (modules, edges, icons, sizes)
//! - `store::queries` - point lookups used by reporting tools
//! - `store::serialization` - flatten/restore against [`PersistedAttribution`]
//!
//! Walking reasons beyond one hop is left to callers; [`reason_chain`]
//! provides a walker built purely on the query API.

pub mod entity;
pub mod persist;
pub mod reason_chain;
pub mod report;

mod store;

pub use entity::{
    DEFAULT_ASSET_ICON, MODULE_SUFFIX, REQUIRED_BY_SCRIPTS, SCRIPT_ICON, class_icon,
    module_display_name, module_icon,
};
pub use persist::{AttributionRecord, PersistedAttribution};
pub use reason_chain::{ChainAnalysis, DEFAULT_MAX_CHAIN_DEPTH, ReasonChain, reason_chains};
pub use report::{Appendix, BuildReport, attribution_for};
pub use store::AttributionStore;

/// Error types for tally operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller handed an argument the attachment boundary refuses.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Persisted data that does not follow the persisted layout.
    #[error("Corrupt attribution data: {0}")]
    Corrupt(String),

    /// Encoding or decoding failed, or the format version is unknown.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tally operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
