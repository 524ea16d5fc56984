// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data-only extension implementations.
//!
//! Most menu and toolbar contributions are static lists. `DeclaredExtension`
//! carries those lists directly, and serves both the built-in library
//! modules and extensions described by manifest files.

use lectern_core::{
    CapabilitySet, Extension, ExtensionMetadata, ExtensionPoint, MenuContributor, MenuItem,
    ToolbarContributor, ToolbarItem,
};

/// An extension whose behaviour is fully described by data.
#[derive(Debug, Clone)]
pub struct DeclaredExtension {
    id: String,
    capabilities: CapabilitySet,
    metadata: ExtensionMetadata,
    menu_items: Vec<MenuItem>,
    toolbar_items: Vec<ToolbarItem>,
}

impl DeclaredExtension {
    pub fn new(id: impl Into<String>, metadata: ExtensionMetadata) -> Self {
        Self {
            id: id.into(),
            capabilities: CapabilitySet::new(),
            metadata,
            menu_items: Vec::new(),
            toolbar_items: Vec::new(),
        }
    }

    /// Declare an extension point without attaching any data to it.
    pub fn with_capability(mut self, point: ExtensionPoint) -> Self {
        self.capabilities.insert(point);
        self
    }

    /// Add a menu entry; declares `Menu` as a side effect.
    pub fn with_menu_item(mut self, item: MenuItem) -> Self {
        self.capabilities.insert(ExtensionPoint::MENU);
        self.menu_items.push(item);
        self
    }

    /// Add a toolbar button; declares `Toolbar` as a side effect.
    pub fn with_toolbar_item(mut self, item: ToolbarItem) -> Self {
        self.capabilities.insert(ExtensionPoint::TOOLBAR);
        self.toolbar_items.push(item);
        self
    }
}

impl Extension for DeclaredExtension {
    fn id(&self) -> &str {
        &self.id
    }

    fn capabilities(&self) -> CapabilitySet {
        self.capabilities.clone()
    }

    fn metadata(&self) -> ExtensionMetadata {
        self.metadata.clone()
    }

    fn as_menu(&self) -> Option<&dyn MenuContributor> {
        self.capabilities
            .contains(&ExtensionPoint::MENU)
            .then_some(self as &dyn MenuContributor)
    }

    fn as_toolbar(&self) -> Option<&dyn ToolbarContributor> {
        self.capabilities
            .contains(&ExtensionPoint::TOOLBAR)
            .then_some(self as &dyn ToolbarContributor)
    }
}

impl MenuContributor for DeclaredExtension {
    fn menu_items(&self) -> Vec<MenuItem> {
        self.menu_items.clone()
    }
}

impl ToolbarContributor for DeclaredExtension {
    fn toolbar_items(&self) -> Vec<ToolbarItem> {
        self.toolbar_items.clone()
    }
}

#[cfg(test)]
mod tests {
    use lectern_core::{unsatisfied_capabilities, MenuLocation};

    use super::*;

    #[test]
    fn menu_items_imply_menu_capability() {
        let ext = DeclaredExtension::new("alerts", ExtensionMetadata::new("Alerts"))
            .with_capability(ExtensionPoint::PLUGIN)
            .with_menu_item(MenuItem::new(MenuLocation::Tools, "alerts.show", "Show Alert"));

        let caps = ext.capabilities();
        assert!(caps.contains(&ExtensionPoint::PLUGIN));
        assert!(caps.contains(&ExtensionPoint::MENU));
        assert!(!caps.contains(&ExtensionPoint::TOOLBAR));
        assert!(ext.as_menu().is_some());
        assert!(ext.as_toolbar().is_none());
        assert!(unsatisfied_capabilities(&ext).is_empty());
    }

    #[test]
    fn declared_menu_without_items_is_still_served() {
        let ext = DeclaredExtension::new("empty", ExtensionMetadata::new("Empty"))
            .with_capability(ExtensionPoint::MENU);
        let menu = ext.as_menu().expect("menu declared");
        assert!(menu.menu_items().is_empty());
    }
}
