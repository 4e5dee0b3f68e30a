use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use tally_graph::AttributionStore;

use crate::cli::ModulesArgs;
use crate::config::{ConfigOverrides, TallyConfig};
use crate::error::Result;
use crate::ui;

#[derive(Debug, Serialize)]
struct ModuleRow<'a> {
    name: &'a str,
    size: u64,
    icon: Option<&'a str>,
    reasons: Vec<&'a str>,
}

pub fn execute(args: &ModulesArgs, config_path: Option<&Path>) -> Result<String> {
    let overrides = ConfigOverrides {
        show_icons: args.icons.then_some(true),
        size_unit: args.unit,
        ..ConfigOverrides::default()
    };
    let config = TallyConfig::load(config_path, &overrides)?;

    let report = super::load_report(&args.report)?;
    let store = super::attribution(&report, &args.report)?;
    render(store, &config, args.json)
}

/// Render the module list as text or JSON.
pub fn render(store: &AttributionStore, config: &TallyConfig, json: bool) -> Result<String> {
    let rows: Vec<ModuleRow<'_>> = store
        .included_modules()
        .iter()
        .map(|name| ModuleRow {
            name,
            size: store.size_of(name),
            icon: store.icon_of(name),
            reasons: store.reasons_for_including(name),
        })
        .collect();

    if json {
        let mut out = serde_json::to_string_pretty(&rows)?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    let title = format!("Modules ({})", rows.len());
    let _ = writeln!(out, "{}", ui::heading(&title));

    let width = rows.iter().map(|row| row.name.len()).max().unwrap_or(0);
    for row in &rows {
        let padded = format!("{:<width$}", row.name);
        let size = ui::format_size(row.size, config.size_unit);
        let _ = write!(out, "  {}  {size:>12}", ui::entity(&padded));
        if !row.reasons.is_empty() {
            let _ = write!(out, "  <- {}", row.reasons.join(", "));
        }
        if config.show_icons {
            if let Some(icon) = row.icon {
                let _ = write!(out, "  {}", ui::dim(icon));
            }
        }
        out.push('\n');
    }

    Ok(out)
}
