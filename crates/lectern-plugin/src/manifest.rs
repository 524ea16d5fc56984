// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extension manifests: declarative modules described by `<id>.toml` files.
//!
//! A manifest describes an extension that only contributes menu entries and
//! toolbar buttons. Export and import need compiled code and cannot be
//! declared this way.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lectern_core::{
    CapabilitySet, ExtensionMetadata, ExtensionPoint, LecternError, MenuItem, ToolbarItem,
};
use serde::Deserialize;
use tracing::debug;

use crate::declared::DeclaredExtension;
use crate::module::{ExtensionModule, ModuleResolver};
use crate::registry::Registrar;

/// Parsed extension manifest.
#[derive(Debug, Clone)]
pub struct ExtensionManifest {
    /// Unique name; doubles as module id and implementation id.
    pub name: String,
    /// Semantic version string.
    pub version: String,
    /// Human-readable description.
    pub description: String,
    /// Extension points the extension declares.
    pub capabilities: CapabilitySet,
    /// Required extensions cannot be disabled from configuration.
    pub required: bool,
    /// Menu entries (requires `Menu`).
    pub menu: Vec<MenuItem>,
    /// Toolbar buttons (requires `Toolbar`).
    pub toolbar: Vec<ToolbarItem>,
}

/// Intermediate TOML deserialization struct for `<id>.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    extension: ExtensionSection,
    #[serde(default)]
    menu: Vec<MenuItem>,
    #[serde(default)]
    toolbar: Vec<ToolbarItem>,
}

/// The `[extension]` section of a manifest file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExtensionSection {
    name: String,
    version: String,
    #[serde(default)]
    description: String,
    capabilities: Vec<String>,
    #[serde(default)]
    required: bool,
}

/// Parse an extension manifest from TOML content.
///
/// Validates that the name is non-empty, the version is valid semver, at
/// least one capability is declared, `Export`/`Import` are absent, and menu
/// or toolbar entries only appear alongside the matching capability.
pub fn parse_extension_manifest(toml_content: &str) -> Result<ExtensionManifest, LecternError> {
    let file: ManifestFile = toml::from_str(toml_content)
        .map_err(|e| LecternError::Manifest(format!("invalid TOML: {e}")))?;

    let section = file.extension;

    if section.name.trim().is_empty() {
        return Err(LecternError::Manifest("name must not be empty".to_string()));
    }

    semver::Version::parse(&section.version).map_err(|e| {
        LecternError::Manifest(format!(
            "version '{}' is not valid semver: {e}",
            section.version
        ))
    })?;

    if section.capabilities.is_empty() {
        return Err(LecternError::Manifest(
            "at least one capability must be declared".to_string(),
        ));
    }

    let capabilities: CapabilitySet = section
        .capabilities
        .into_iter()
        .map(ExtensionPoint::from)
        .collect();

    for point in [ExtensionPoint::EXPORT, ExtensionPoint::IMPORT] {
        if capabilities.contains(&point) {
            return Err(LecternError::Manifest(format!(
                "capability '{point}' requires a compiled extension and cannot be declared in a manifest"
            )));
        }
    }

    if !file.menu.is_empty() && !capabilities.contains(&ExtensionPoint::MENU) {
        return Err(LecternError::Manifest(
            "menu entries require the 'Menu' capability".to_string(),
        ));
    }

    if !file.toolbar.is_empty() && !capabilities.contains(&ExtensionPoint::TOOLBAR) {
        return Err(LecternError::Manifest(
            "toolbar entries require the 'Toolbar' capability".to_string(),
        ));
    }

    Ok(ExtensionManifest {
        name: section.name,
        version: section.version,
        description: section.description,
        capabilities,
        required: section.required,
        menu: file.menu,
        toolbar: file.toolbar,
    })
}

impl ExtensionManifest {
    /// Build the implementation this manifest describes.
    pub fn to_extension(&self) -> DeclaredExtension {
        let mut metadata = ExtensionMetadata::new(&self.name)
            .with_description(&self.description)
            .with_version(&self.version);
        if self.required {
            metadata = metadata.required();
        }

        let mut extension = DeclaredExtension::new(&self.name, metadata);
        for point in self.capabilities.iter() {
            extension = extension.with_capability(point.clone());
        }
        for item in &self.menu {
            extension = extension.with_menu_item(item.clone());
        }
        for item in &self.toolbar {
            extension = extension.with_toolbar_item(item.clone());
        }
        extension
    }
}

/// A module backed by a single manifest file.
pub struct ManifestModule {
    manifest: ExtensionManifest,
}

impl ManifestModule {
    pub fn new(manifest: ExtensionManifest) -> Self {
        Self { manifest }
    }
}

impl ExtensionModule for ManifestModule {
    fn id(&self) -> &str {
        &self.manifest.name
    }

    fn activate(&self, registrar: &mut Registrar<'_>) -> Result<(), LecternError> {
        registrar.register(Arc::new(self.manifest.to_extension()))
    }
}

/// Resolves module ids to `<dir>/<id>.toml` manifests.
#[derive(Debug, Clone)]
pub struct ManifestResolver {
    dir: PathBuf,
}

impl ManifestResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ModuleResolver for ManifestResolver {
    fn name(&self) -> &str {
        "manifest"
    }

    fn resolve(&self, id: &str) -> Result<Option<Box<dyn ExtensionModule>>, LecternError> {
        let path = self.dir.join(format!("{id}.toml"));
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|source| LecternError::Io {
            path: path.clone(),
            source,
        })?;
        let manifest = parse_extension_manifest(&content)
            .map_err(|e| LecternError::extension_load(id, format!("{}: {e}", path.display())))?;

        if manifest.name != id {
            return Err(LecternError::extension_load(
                id,
                format!(
                    "{}: manifest name '{}' does not match file name",
                    path.display(),
                    manifest.name
                ),
            ));
        }

        Ok(Some(Box::new(ManifestModule::new(manifest))))
    }
}

/// List module ids for every `*.toml` file in `dir`, sorted.
///
/// This is the discovery step that feeds `load_extensions`. A missing
/// directory yields an empty list.
pub fn discover_manifest_ids(dir: &Path) -> Result<Vec<String>, LecternError> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "manifest directory not present");
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|source| LecternError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut ids = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| LecternError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            ids.push(stem.to_string());
        }
    }
    ids.sort();
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use lectern_core::{Extension, MenuLocation};

    use super::*;

    const SONG_USAGE: &str = r#"
[extension]
name = "song-usage"
version = "0.1.0"
description = "Song usage reporting"
capabilities = ["Plugin", "Menu", "Toolbar"]

[[menu]]
menu = "Tools"
id = "song-usage.report"
label = "Song Usage Report"
shortcut = "Ctrl+U"

[[toolbar]]
id = "song-usage.toggle"
label = "Usage"
tooltip = "Toggle song usage tracking"
"#;

    #[test]
    fn parse_valid_manifest() {
        let manifest = parse_extension_manifest(SONG_USAGE).unwrap();
        assert_eq!(manifest.name, "song-usage");
        assert_eq!(manifest.version, "0.1.0");
        assert_eq!(manifest.capabilities.len(), 3);
        assert!(!manifest.required);
        assert_eq!(manifest.menu.len(), 1);
        assert_eq!(manifest.menu[0].menu, MenuLocation::Tools);
        assert_eq!(manifest.menu[0].shortcut.as_deref(), Some("Ctrl+U"));
        assert_eq!(manifest.toolbar[0].tooltip.as_deref(), Some("Toggle song usage tracking"));
    }

    #[test]
    fn manifest_builds_matching_extension() {
        let ext = parse_extension_manifest(SONG_USAGE).unwrap().to_extension();
        assert_eq!(ext.id(), "song-usage");
        assert_eq!(ext.metadata().description, "Song usage reporting");
        assert_eq!(ext.as_menu().unwrap().menu_items().len(), 1);
        assert_eq!(ext.as_toolbar().unwrap().toolbar_items().len(), 1);
    }

    #[test]
    fn parse_minimal_manifest() {
        let toml = r#"
[extension]
name = "alerts"
version = "1.0.0"
capabilities = ["Plugin"]
required = true
"#;
        let manifest = parse_extension_manifest(toml).unwrap();
        assert!(manifest.required);
        assert!(manifest.description.is_empty());
        assert!(manifest.menu.is_empty());
        assert!(manifest.toolbar.is_empty());
    }

    #[test]
    fn parse_rejects_empty_name() {
        let toml = r#"
[extension]
name = ""
version = "0.1.0"
capabilities = ["Plugin"]
"#;
        let err = parse_extension_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("name must not be empty"));
    }

    #[test]
    fn parse_rejects_bad_version() {
        let toml = r#"
[extension]
name = "alerts"
version = "one"
capabilities = ["Plugin"]
"#;
        let err = parse_extension_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("not valid semver"));
    }

    #[test]
    fn parse_rejects_missing_capabilities() {
        let toml = r#"
[extension]
name = "alerts"
version = "0.1.0"
capabilities = []
"#;
        let err = parse_extension_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("at least one capability"));
    }

    #[test]
    fn parse_rejects_export_capability() {
        let toml = r#"
[extension]
name = "pdf"
version = "0.1.0"
capabilities = ["Export"]
"#;
        let err = parse_extension_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("requires a compiled extension"));
    }

    #[test]
    fn parse_rejects_menu_without_capability() {
        let toml = r#"
[extension]
name = "alerts"
version = "0.1.0"
capabilities = ["Plugin"]

[[menu]]
menu = "Tools"
id = "alerts.show"
label = "Show Alert"
"#;
        let err = parse_extension_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("menu entries require"));
    }

    #[test]
    fn parse_rejects_unknown_menu_location() {
        let toml = r#"
[extension]
name = "alerts"
version = "0.1.0"
capabilities = ["Menu"]

[[menu]]
menu = "Window"
id = "alerts.show"
label = "Show Alert"
"#;
        assert!(parse_extension_manifest(toml).is_err());
    }
}
