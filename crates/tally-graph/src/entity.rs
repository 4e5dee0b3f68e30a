//! Entity naming conventions shared by the recorder and report tooling.
//!
//! Entities are plain strings. A handful of them are synthetic (the script
//! reason) and a few icon references are derived from names; those rules live
//! here so the pipeline and the tools agree on them.

/// Suffix appended to raw module names to form their display name.
pub const MODULE_SUFFIX: &str = " Module";

/// Reason recorded for anything user or game scripts reference directly.
pub const REQUIRED_BY_SCRIPTS: &str = "Required by Scripts";

/// Icon seeded for [`REQUIRED_BY_SCRIPTS`] when a store is created.
pub const SCRIPT_ICON: &str = "class/MonoScript";

/// Icon written for graph entries that never received one.
pub const DEFAULT_ASSET_ICON: &str = "class/DefaultAsset";

const CLASS_ICON_PREFIX: &str = "class/";
const MODULE_ICON_PREFIX: &str = "package/com.unity.modules.";

/// Display name for a raw module name, e.g. `"Physics"` -> `"Physics Module"`.
pub fn module_display_name(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len() + MODULE_SUFFIX.len());
    name.push_str(raw);
    name.push_str(MODULE_SUFFIX);
    name
}

/// Default icon for an entity that shows up as a dependency target.
pub fn class_icon(entity: &str) -> String {
    format!("{CLASS_ICON_PREFIX}{entity}")
}

/// Default icon for a module, derived from the lower-cased raw module name.
pub fn module_icon(raw: &str) -> String {
    format!("{MODULE_ICON_PREFIX}{}", raw.to_lowercase())
}
