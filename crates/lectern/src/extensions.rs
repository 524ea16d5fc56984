// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lectern extensions` and `lectern menus` command implementations.
//!
//! Both commands assemble the capability registry the way the host does at
//! start-up: declare the built-in points, register the resolvers, load the
//! configured modules plus every discovered manifest, then drop disabled
//! implementations.

use std::io::IsTerminal;
use std::sync::Arc;

use lectern_config::diagnostic::suggest_key;
use lectern_config::LecternConfig;
use lectern_core::{CapabilitySet, Extension, ExtensionPoint, LecternError};
use lectern_plugin::{
    builtin_module_ids, discover_manifest_ids, CapabilityRegistry, CatalogResolver, LoadReport,
    ManifestResolver, MenuBar, Toolbar,
};
use serde::Serialize;
use tracing::{info, warn};

/// Colors only when allowed and stdout is a terminal.
pub fn use_color(plain: bool) -> bool {
    !plain && std::io::stdout().is_terminal()
}

/// Build and populate the registry described by `config`.
pub fn build_registry(
    config: &LecternConfig,
) -> Result<(CapabilityRegistry, LoadReport), LecternError> {
    let mut registry = CapabilityRegistry::new();
    registry.declare_builtin_points();
    registry.add_resolver(Box::new(CatalogResolver));

    let mut ids: Vec<String> = config.extensions.modules.clone();
    let mut known: Vec<String> = builtin_module_ids().into_iter().map(str::to_string).collect();

    if let Some(dir) = config.extensions.resolved_manifest_dir() {
        let discovered = discover_manifest_ids(&dir)?;
        info!(dir = %dir.display(), manifests = discovered.len(), "manifest directory scanned");
        registry.add_resolver(Box::new(ManifestResolver::new(dir)));
        for id in discovered {
            if !ids.contains(&id) {
                ids.push(id.clone());
            }
            known.push(id);
        }
    }

    let report = registry.load_extensions(&ids);
    for (module, _) in &report.failed {
        if known.contains(module) {
            continue;
        }
        let candidates: Vec<&str> = known.iter().map(String::as_str).collect();
        if let Some(suggestion) = suggest_key(module, &candidates) {
            warn!(module = %module, suggestion = %suggestion, "unknown module id; did you mean `{suggestion}`?");
        }
    }

    apply_disabled(&mut registry, config);
    Ok((registry, report))
}

/// Unregister every disabled implementation that is not marked required.
fn apply_disabled(registry: &mut CapabilityRegistry, config: &LecternConfig) {
    let disabled: Vec<Arc<dyn Extension>> = registry
        .list_all()
        .into_iter()
        .filter(|e| config.extensions.is_disabled(e.id()))
        .collect();

    for extension in disabled {
        let id = extension.id();
        if extension.metadata().required {
            warn!(extension = %id, "required extension cannot be disabled");
            continue;
        }
        if registry.unregister(id) {
            info!(extension = %id, "extension disabled by configuration");
        }
    }
}

/// One row of `lectern extensions --json`.
#[derive(Debug, Serialize)]
pub struct ExtensionSummary {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub capabilities: Vec<String>,
    pub required: bool,
}

impl ExtensionSummary {
    fn from_extension(extension: &dyn Extension) -> Self {
        let metadata = extension.metadata();
        Self {
            id: extension.id().to_string(),
            name: metadata.display_name,
            version: metadata.version,
            description: metadata.description,
            capabilities: extension
                .capabilities()
                .iter()
                .map(|p| p.to_string())
                .collect(),
            required: metadata.required,
        }
    }
}

/// Implementations declaring every point in `filter`, summarized.
///
/// Names that were never declared are an error here rather than an empty
/// result, since they usually come from a typo on the command line.
pub fn list_extensions(
    registry: &CapabilityRegistry,
    filter: &[String],
) -> Result<Vec<ExtensionSummary>, LecternError> {
    let wanted: CapabilitySet = filter.iter().cloned().map(ExtensionPoint::from).collect();
    if let Some(point) = wanted.iter().find(|p| !registry.is_declared(p)) {
        return Err(LecternError::UnknownCapability {
            point: point.to_string(),
        });
    }

    Ok(registry
        .find_by_capability(&wanted)
        .iter()
        .map(|e| ExtensionSummary::from_extension(e.as_ref()))
        .collect())
}

/// Run the `lectern extensions` command.
pub fn run_extensions(
    config: &LecternConfig,
    filter: &[String],
    json: bool,
    use_color: bool,
) -> Result<(), LecternError> {
    let (registry, report) = build_registry(config)?;
    let rows = list_extensions(&registry, filter)?;

    if json {
        let rendered = serde_json::to_string_pretty(&rows)
            .map_err(|e| LecternError::Internal(format!("failed to serialize listing: {e}")))?;
        println!("{rendered}");
    } else {
        print!("{}", render_extensions(&rows, &report, use_color));
    }
    Ok(())
}

/// Human-readable extension listing, with failed modules at the end.
pub fn render_extensions(rows: &[ExtensionSummary], report: &LoadReport, use_color: bool) -> String {
    use colored::Colorize;

    let mut out = String::new();
    out.push_str(&format!("\n  lectern extensions ({})\n", rows.len()));
    out.push_str(&format!("  {}\n", "-".repeat(50)));

    for row in rows {
        let padded = format!("{:<20}", row.id);
        let id = if use_color {
            padded.bold().to_string()
        } else {
            padded
        };
        let required = if row.required { " [required]" } else { "" };
        out.push_str(&format!(
            "    {id} {:<8} {}{required}\n",
            row.version,
            row.capabilities.join(", ")
        ));
        if !row.description.is_empty() {
            out.push_str(&format!("    {:<20} {}\n", "", row.description));
        }
    }

    for (module, err) in &report.failed {
        let marker = if use_color {
            "✗".red().to_string()
        } else {
            "[FAIL]".to_string()
        };
        out.push_str(&format!("    {marker} {module}: {err}\n"));
    }

    out.push('\n');
    out
}

/// Run the `lectern menus` command.
pub fn run_menus(config: &LecternConfig, use_color: bool) -> Result<(), LecternError> {
    let (registry, _) = build_registry(config)?;
    print!(
        "{}",
        render_menus(&MenuBar::assemble(&registry), &Toolbar::assemble(&registry), use_color)
    );
    Ok(())
}

/// Human-readable menu bar and toolbar.
pub fn render_menus(menu_bar: &MenuBar, toolbar: &Toolbar, use_color: bool) -> String {
    use colored::Colorize;

    let heading = |text: String| {
        if use_color {
            text.bold().to_string()
        } else {
            text
        }
    };

    let mut out = String::from("\n");
    for (location, items) in menu_bar.menus() {
        out.push_str(&format!("  {}\n", heading(location.to_string())));
        for item in items {
            let shortcut = item
                .shortcut
                .as_deref()
                .map(|s| format!(" ({s})"))
                .unwrap_or_default();
            out.push_str(&format!("    {:<28} {}{shortcut}\n", item.id, item.label));
        }
    }

    if !toolbar.is_empty() {
        out.push_str(&format!("  {}\n", heading("Toolbar".to_string())));
        for item in toolbar.items() {
            let tooltip = item.tooltip.as_deref().unwrap_or("");
            out.push_str(&format!("    {:<28} {:<14} {tooltip}\n", item.id, item.label));
        }
    }

    out.push('\n');
    out
}
