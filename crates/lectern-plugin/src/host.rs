// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host-side assembly of registry contributions.
//!
//! The main window builds its menu bar and toolbar from whatever the
//! registry holds at construction time, and routes export/import requests
//! to the implementation serving the requested format.

use std::collections::BTreeMap;

use lectern_core::{ExtensionPoint, LecternError, MenuItem, MenuLocation, Slide, ToolbarItem};

use crate::registry::CapabilityRegistry;

/// Menu entries grouped by top-level menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuBar {
    menus: BTreeMap<MenuLocation, Vec<MenuItem>>,
}

impl MenuBar {
    /// Collect the entries of every `Menu` implementation.
    ///
    /// Menus follow [`MenuLocation`] order; entries inside a menu keep
    /// registration order.
    pub fn assemble(registry: &CapabilityRegistry) -> Self {
        let mut menus: BTreeMap<MenuLocation, Vec<MenuItem>> = BTreeMap::new();
        for extension in registry.find_implementations(&ExtensionPoint::MENU) {
            let Some(contributor) = extension.as_menu() else {
                continue;
            };
            for item in contributor.menu_items() {
                menus.entry(item.menu).or_default().push(item);
            }
        }
        Self { menus }
    }

    /// Non-empty menus in display order.
    pub fn menus(&self) -> impl Iterator<Item = (MenuLocation, &[MenuItem])> {
        self.menus
            .iter()
            .map(|(location, items)| (*location, items.as_slice()))
    }

    /// Entries of a single menu.
    pub fn items(&self, location: MenuLocation) -> &[MenuItem] {
        self.menus.get(&location).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up an entry by action id.
    pub fn find(&self, action_id: &str) -> Option<&MenuItem> {
        self.menus.values().flatten().find(|item| item.id == action_id)
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}

/// Toolbar buttons in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toolbar {
    items: Vec<ToolbarItem>,
}

impl Toolbar {
    /// Collect the buttons of every `Toolbar` implementation.
    pub fn assemble(registry: &CapabilityRegistry) -> Self {
        let items = registry
            .find_implementations(&ExtensionPoint::TOOLBAR)
            .iter()
            .filter_map(|extension| extension.as_toolbar().map(|t| t.toolbar_items()))
            .flatten()
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[ToolbarItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Formats served by the registered exporters, in registration order.
pub fn export_formats(registry: &CapabilityRegistry) -> Vec<String> {
    registry
        .find_implementations(&ExtensionPoint::EXPORT)
        .iter()
        .filter_map(|e| e.as_exporter().map(|x| x.format().to_string()))
        .collect()
}

/// Formats served by the registered importers, in registration order.
pub fn import_formats(registry: &CapabilityRegistry) -> Vec<String> {
    registry
        .find_implementations(&ExtensionPoint::IMPORT)
        .iter()
        .filter_map(|e| e.as_importer().map(|x| x.format().to_string()))
        .collect()
}

/// Export `slides` with the first exporter serving `format`.
pub fn export_slides(
    registry: &CapabilityRegistry,
    format: &str,
    slides: &[Slide],
) -> Result<String, LecternError> {
    for extension in registry.find_implementations(&ExtensionPoint::EXPORT) {
        if let Some(exporter) = extension.as_exporter()
            && exporter.format() == format
        {
            return exporter.export(slides);
        }
    }
    Err(LecternError::Format {
        message: format!("no exporter registered for format '{format}'"),
    })
}

/// Import `input` with the first importer serving `format`.
pub fn import_slides(
    registry: &CapabilityRegistry,
    format: &str,
    input: &str,
) -> Result<Vec<Slide>, LecternError> {
    for extension in registry.find_implementations(&ExtensionPoint::IMPORT) {
        if let Some(importer) = extension.as_importer()
            && importer.format() == format
        {
            return importer.import(input);
        }
    }
    Err(LecternError::Format {
        message: format!("no importer registered for format '{format}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{builtin_module_ids, CatalogResolver};

    fn loaded() -> CapabilityRegistry {
        let mut registry = CapabilityRegistry::new();
        registry.declare_builtin_points();
        registry.add_resolver(Box::new(CatalogResolver));
        registry.load_extensions(builtin_module_ids());
        registry
    }

    #[test]
    fn menu_bar_groups_by_location_in_order() {
        let menu_bar = MenuBar::assemble(&loaded());
        let locations: Vec<MenuLocation> = menu_bar.menus().map(|(l, _)| l).collect();
        assert_eq!(
            locations,
            vec![
                MenuLocation::File,
                MenuLocation::Import,
                MenuLocation::Export,
                MenuLocation::View,
                MenuLocation::Tools,
            ]
        );

        let import_ids: Vec<&str> = menu_bar
            .items(MenuLocation::Import)
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(
            import_ids,
            vec!["songs.import.openlyrics", "bibles.import", "text-import.slides"]
        );
        assert!(menu_bar.items(MenuLocation::Help).is_empty());
        assert_eq!(
            menu_bar.find("bibles.search").and_then(|i| i.shortcut.as_deref()),
            Some("Ctrl+B")
        );
    }

    #[test]
    fn toolbar_keeps_registration_order() {
        let toolbar = Toolbar::assemble(&loaded());
        let ids: Vec<&str> = toolbar.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["songs.search", "bibles.quick-search", "images.add"]);
    }

    #[test]
    fn unregistered_extensions_leave_the_menu_bar() {
        let mut registry = loaded();
        registry.unregister("bibles");
        let menu_bar = MenuBar::assemble(&registry);
        assert!(menu_bar.find("bibles.search").is_none());
        assert!(menu_bar.items(MenuLocation::View).is_empty());
    }

    #[test]
    fn export_and_import_route_by_format() {
        let registry = loaded();
        assert_eq!(export_formats(&registry), vec!["text"]);
        assert_eq!(import_formats(&registry), vec!["text"]);

        let slides = vec![Slide::new("Welcome", "Good morning")];
        let text = export_slides(&registry, "text", &slides).unwrap();
        assert_eq!(import_slides(&registry, "text", &text).unwrap(), slides);
    }

    #[test]
    fn unknown_format_is_an_error() {
        let registry = loaded();
        let err = export_slides(&registry, "pdf", &[]).unwrap_err();
        assert!(err.to_string().contains("no exporter registered for format 'pdf'"));
        assert!(import_slides(&registry, "pdf", "").is_err());
    }

    #[test]
    fn empty_registry_assembles_nothing() {
        let registry = CapabilityRegistry::new();
        assert!(MenuBar::assemble(&registry).is_empty());
        assert!(Toolbar::assemble(&registry).is_empty());
    }
}
