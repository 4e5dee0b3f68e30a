//! Fixtures shared by this crate's tests and downstream tool tests.

use chrono::{TimeZone, Utc};

use crate::entity::REQUIRED_BY_SCRIPTS;
use crate::report::BuildReport;

/// A small player build: physics kept by scripts, audio kept by a scene,
/// and a raw-named core module.
pub fn sample_report() -> BuildReport {
    let created = Utc
        .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
        .single()
        .unwrap_or_else(Utc::now);
    let mut report = BuildReport::with_timestamp("sample-player", "linux64", created);

    let store = report.attribution_mut();
    let physics = store.add_module("Physics");
    let audio = store.add_module("Audio");
    let core = store.add_module_with_options("Core", false);

    store.register_dependency(&physics, "Rigidbody");
    store.register_dependency("Rigidbody", REQUIRED_BY_SCRIPTS);
    store.register_dependency(&audio, "AudioSource");
    store.register_dependency("AudioSource", "Level1.unity");
    store.register_dependency(&core, "Transform");

    store.add_module_size(&physics, 2048);
    store.add_module_size(&audio, 1536);
    store.add_module_size(&core, 4096);
    store.set_total_size(2048 + 1536 + 4096);

    report
}
