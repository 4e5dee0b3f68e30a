use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use tally_graph::{BuildReport, ChainAnalysis};

use crate::cli::SummaryArgs;
use crate::config::{ConfigOverrides, TallyConfig};
use crate::error::Result;
use crate::ui;

#[derive(Debug, Serialize)]
struct Summary<'a> {
    report: &'a str,
    platform: &'a str,
    created_at: String,
    modules: usize,
    entities: usize,
    edges: usize,
    total_size: u64,
    module_size: u64,
    /// Modules with at least one chain ending at the script reason.
    script_driven_modules: usize,
    appendices: Vec<&'a str>,
}

pub fn execute(args: &SummaryArgs, config_path: Option<&Path>) -> Result<String> {
    let overrides = ConfigOverrides {
        size_unit: args.unit,
        ..ConfigOverrides::default()
    };
    let config = TallyConfig::load(config_path, &overrides)?;

    let report = super::load_report(&args.report)?;
    render(&report, &config, args.json)
}

/// Summarise a report as text or JSON. Reports without attribution data
/// summarise as empty.
pub fn render(report: &BuildReport, config: &TallyConfig, json: bool) -> Result<String> {
    let summary = match report.attribution() {
        Some(store) => Summary {
            report: report.name(),
            platform: report.platform(),
            created_at: report.created_at().to_rfc3339(),
            modules: store.included_modules().len(),
            entities: store.entities().count(),
            edges: store.edge_count(),
            total_size: store.total_size(),
            module_size: store.module_size_sum(),
            script_driven_modules: store
                .included_modules()
                .iter()
                .filter(|module| {
                    ChainAnalysis::analyze(store, module, config.max_chain_depth)
                        .is_script_driven()
                })
                .count(),
            appendices: report.appendix_tags(),
        },
        None => Summary {
            report: report.name(),
            platform: report.platform(),
            created_at: report.created_at().to_rfc3339(),
            modules: 0,
            entities: 0,
            edges: 0,
            total_size: 0,
            module_size: 0,
            script_driven_modules: 0,
            appendices: report.appendix_tags(),
        },
    };

    if json {
        let mut out = serde_json::to_string_pretty(&summary)?;
        out.push('\n');
        return Ok(out);
    }

    let unit = config.size_unit;
    let mut out = String::new();
    let title = format!("{} ({})", summary.report, summary.platform);
    let _ = writeln!(out, "{}", ui::heading(&title));
    let _ = writeln!(out, "  created:        {}", summary.created_at);
    let _ = writeln!(out, "  modules:        {}", summary.modules);
    let _ = writeln!(out, "  entities:       {}", summary.entities);
    let _ = writeln!(out, "  reasons:        {}", summary.edges);
    let _ = writeln!(out, "  total size:     {}", ui::format_size(summary.total_size, unit));
    let _ = writeln!(out, "  module size:    {}", ui::format_size(summary.module_size, unit));
    let _ = writeln!(
        out,
        "  kept by scripts: {} of {} modules",
        summary.script_driven_modules, summary.modules
    );
    if !summary.appendices.is_empty() {
        let _ = writeln!(out, "  appendices:     {}", summary.appendices.join(", "));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SizeUnit;
    use tally_graph::test_utils::sample_report;

    #[test]
    fn text_summary_counts() {
        console::set_colors_enabled(false);
        let out = render(&sample_report(), &TallyConfig::default(), false).unwrap();

        assert!(out.starts_with("sample-player (linux64)\n"));
        assert!(out.contains("  modules:        3\n"));
        assert!(out.contains("  reasons:        5\n"));
        assert!(out.contains("  total size:     7680 B\n"));
        assert!(out.contains("  kept by scripts: 1 of 3 modules\n"));
        assert!(out.contains("  appendices:     attribution\n"));
    }

    #[test]
    fn json_summary_fields() {
        let config = TallyConfig {
            size_unit: SizeUnit::Human,
            ..TallyConfig::default()
        };
        let out = render(&sample_report(), &config, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["report"], "sample-player");
        assert_eq!(value["modules"], 3);
        assert_eq!(value["entities"], 8);
        assert_eq!(value["total_size"], 7680);
        assert_eq!(value["module_size"], 7680);
        assert_eq!(value["script_driven_modules"], 1);
    }

    #[test]
    fn report_without_attribution_is_empty() {
        console::set_colors_enabled(false);
        let report = BuildReport::new("bare", "ios");
        let out = render(&report, &TallyConfig::default(), false).unwrap();

        assert!(out.contains("  modules:        0\n"));
        assert!(!out.contains("appendices"));
    }
}
