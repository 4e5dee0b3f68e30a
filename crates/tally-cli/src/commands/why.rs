use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use tally_graph::{AttributionStore, ChainAnalysis, module_display_name};
use tracing::debug;

use crate::cli::WhyArgs;
use crate::config::{ConfigOverrides, TallyConfig};
use crate::error::{CliError, Result};
use crate::ui;

const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Serialize)]
struct WhyOutput<'a> {
    entity: &'a str,
    is_module: bool,
    icon: Option<&'a str>,
    size: u64,
    reasons: Vec<&'a str>,
    chains: Vec<Vec<String>>,
    root_causes: &'a [String],
    script_driven: bool,
}

pub fn execute(args: &WhyArgs, config_path: Option<&Path>) -> Result<String> {
    let overrides = ConfigOverrides {
        max_chain_depth: args.max_depth,
        ..ConfigOverrides::default()
    };
    let config = TallyConfig::load(config_path, &overrides)?;

    let report = super::load_report(&args.report)?;
    let store = super::attribution(&report, &args.report)?;
    render(store, &args.entity, &config, args.json)
}

/// Resolve the name the user typed to an entity in the store.
///
/// Exact names win; a raw module name also matches its display name.
pub fn resolve_entity(store: &AttributionStore, query: &str) -> Result<String> {
    if store.is_known(query) || store.contains_module(query) {
        return Ok(query.to_string());
    }

    let display_name = module_display_name(query);
    if store.is_known(&display_name) || store.contains_module(&display_name) {
        debug!(query, resolved = %display_name, "matched module display name");
        return Ok(display_name);
    }

    let needle = query.to_lowercase();
    let suggestions = store
        .entities()
        .filter(|name| name.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect();

    Err(CliError::UnknownEntity {
        entity: query.to_string(),
        suggestions,
    })
}

/// Explain one entity as text or JSON.
pub fn render(
    store: &AttributionStore,
    query: &str,
    config: &TallyConfig,
    json: bool,
) -> Result<String> {
    let entity = resolve_entity(store, query)?;
    let analysis = ChainAnalysis::analyze(store, &entity, config.max_chain_depth);
    let reasons = store.reasons_for_including(&entity);

    if json {
        let output = WhyOutput {
            entity: &entity,
            is_module: store.contains_module(&entity),
            icon: store.icon_of(&entity),
            size: store.size_of(&entity),
            reasons,
            chains: analysis.chains.iter().map(|c| c.path.clone()).collect(),
            root_causes: &analysis.root_causes,
            script_driven: analysis.is_script_driven(),
        };
        let mut out = serde_json::to_string_pretty(&output)?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    let _ = write!(out, "{}", ui::heading(&entity));
    if config.show_icons {
        if let Some(icon) = store.icon_of(&entity) {
            let _ = write!(out, "  {}", ui::dim(icon));
        }
    }
    out.push('\n');

    if store.contains_module(&entity) {
        let _ = writeln!(
            out,
            "  size: {}",
            ui::format_size(store.size_of(&entity), config.size_unit)
        );
    }

    if reasons.is_empty() {
        let _ = writeln!(out, "  No recorded reasons; {entity} is a root cause.");
        return Ok(out);
    }

    let _ = writeln!(out, "Direct reasons:");
    for reason in &reasons {
        let _ = writeln!(out, "  - {}", ui::entity(reason));
    }

    if analysis.is_explained() {
        let _ = writeln!(out, "Reason chains:");
        for (index, chain) in analysis.chains.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", index + 1, chain.format_chain());
        }
    } else {
        let _ = writeln!(
            out,
            "No chain reaches a root cause within {} hops.",
            config.max_chain_depth
        );
    }

    let verdict = if analysis.is_script_driven() { "yes" } else { "no" };
    let _ = writeln!(out, "Kept by scripts: {verdict}");

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_graph::REQUIRED_BY_SCRIPTS;
    use tally_graph::test_utils::sample_report;

    #[test]
    fn raw_module_name_resolves_to_display_name() {
        let report = sample_report();
        let store = report.attribution().unwrap();

        assert_eq!(resolve_entity(store, "Physics").unwrap(), "Physics Module");
        assert_eq!(resolve_entity(store, "Core").unwrap(), "Core");
        assert_eq!(resolve_entity(store, "Rigidbody").unwrap(), "Rigidbody");
    }

    #[test]
    fn unknown_entity_suggests_similar_names() {
        let report = sample_report();
        let store = report.attribution().unwrap();

        match resolve_entity(store, "audio") {
            Err(CliError::UnknownEntity { suggestions, .. }) => {
                assert_eq!(suggestions, vec!["Audio Module", "AudioSource"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn text_explains_script_chain() {
        console::set_colors_enabled(false);
        let report = sample_report();
        let out = render(
            report.attribution().unwrap(),
            "Physics",
            &TallyConfig::default(),
            false,
        )
        .unwrap();

        assert!(out.starts_with("Physics Module\n"));
        assert!(out.contains("  size: 2048 B"));
        assert!(out.contains("  - Rigidbody"));
        assert!(out.contains("1. Physics Module <- Rigidbody <- Required by Scripts"));
        assert!(out.ends_with("Kept by scripts: yes\n"));
    }

    #[test]
    fn text_for_root_cause() {
        console::set_colors_enabled(false);
        let report = sample_report();
        let out = render(
            report.attribution().unwrap(),
            REQUIRED_BY_SCRIPTS,
            &TallyConfig::default(),
            false,
        )
        .unwrap();

        assert!(out.contains("No recorded reasons"));
        assert!(!out.contains("size:"));
    }

    #[test]
    fn depth_limit_is_reported() {
        console::set_colors_enabled(false);
        let report = sample_report();
        let config = TallyConfig {
            max_chain_depth: 1,
            ..TallyConfig::default()
        };
        let out = render(report.attribution().unwrap(), "Audio", &config, false).unwrap();

        assert!(out.contains("  - AudioSource"));
        assert!(out.contains("No chain reaches a root cause within 1 hops."));
        assert!(out.ends_with("Kept by scripts: no\n"));
    }

    #[test]
    fn json_output_shape() {
        let report = sample_report();
        let out = render(
            report.attribution().unwrap(),
            "Audio Module",
            &TallyConfig::default(),
            true,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["entity"], "Audio Module");
        assert_eq!(value["is_module"], true);
        assert_eq!(value["size"], 1536);
        assert_eq!(value["reasons"][0], "AudioSource");
        assert_eq!(value["chains"][0][2], "Level1.unity");
        assert_eq!(value["root_causes"][0], "Level1.unity");
        assert_eq!(value["script_driven"], false);
    }
}
