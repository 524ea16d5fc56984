// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock extensions and modules for deterministic registry tests.
//!
//! `MockExtension` serves whichever built-in points it declares, so tests can
//! build implementations with arbitrary capability sets. The module types
//! script what happens on activation: success, error after partial
//! registration, or panic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lectern_core::{
    CapabilitySet, Exporter, Extension, ExtensionMetadata, ExtensionPoint, Importer, LecternError,
    MenuContributor, MenuItem, Slide, ToolbarContributor, ToolbarItem,
};
use lectern_plugin::{ExtensionModule, ModuleResolver, Registrar};

/// A configurable extension implementation.
///
/// Accessors return `Some` for every built-in point in the capability set
/// unless the mock was made [`hollow`](MockExtension::hollow).
#[derive(Debug, Clone)]
pub struct MockExtension {
    id: String,
    capabilities: CapabilitySet,
    metadata: ExtensionMetadata,
    menu: Vec<MenuItem>,
    toolbar: Vec<ToolbarItem>,
    format: String,
    hollow: bool,
}

impl MockExtension {
    /// Create a mock declaring the given points.
    pub fn new(id: impl Into<String>, capabilities: impl IntoIterator<Item = ExtensionPoint>) -> Self {
        let id = id.into();
        Self {
            metadata: ExtensionMetadata::new(format!("Mock {id}")),
            id,
            capabilities: capabilities.into_iter().collect(),
            menu: Vec::new(),
            toolbar: Vec::new(),
            format: "mock".to_string(),
            hollow: false,
        }
    }

    /// Add a menu entry. Only served if `Menu` is declared.
    pub fn with_menu_item(mut self, item: MenuItem) -> Self {
        self.menu.push(item);
        self
    }

    /// Add a toolbar button. Only served if `Toolbar` is declared.
    pub fn with_toolbar_item(mut self, item: ToolbarItem) -> Self {
        self.toolbar.push(item);
        self
    }

    /// Format name reported by the export and import accessors.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Declare capabilities without serving any accessor.
    pub fn hollow(mut self) -> Self {
        self.hollow = true;
        self
    }

    fn serves(&self, point: &ExtensionPoint) -> bool {
        !self.hollow && self.capabilities.contains(point)
    }
}

impl Extension for MockExtension {
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
        self.serves(&ExtensionPoint::MENU).then_some(self as &dyn MenuContributor)
    }

    fn as_toolbar(&self) -> Option<&dyn ToolbarContributor> {
        self.serves(&ExtensionPoint::TOOLBAR)
            .then_some(self as &dyn ToolbarContributor)
    }

    fn as_exporter(&self) -> Option<&dyn Exporter> {
        self.serves(&ExtensionPoint::EXPORT).then_some(self as &dyn Exporter)
    }

    fn as_importer(&self) -> Option<&dyn Importer> {
        self.serves(&ExtensionPoint::IMPORT).then_some(self as &dyn Importer)
    }
}

impl MenuContributor for MockExtension {
    fn menu_items(&self) -> Vec<MenuItem> {
        self.menu.clone()
    }
}

impl ToolbarContributor for MockExtension {
    fn toolbar_items(&self) -> Vec<ToolbarItem> {
        self.toolbar.clone()
    }
}

impl Exporter for MockExtension {
    fn format(&self) -> &str {
        &self.format
    }

    /// One slide title per line.
    fn export(&self, slides: &[Slide]) -> Result<String, LecternError> {
        Ok(slides
            .iter()
            .map(|s| format!("{}\n", s.title))
            .collect())
    }
}

impl Importer for MockExtension {
    fn format(&self) -> &str {
        &self.format
    }

    /// Each non-empty line becomes a slide with an empty body.
    fn import(&self, input: &str) -> Result<Vec<Slide>, LecternError> {
        Ok(input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Slide::new(line.trim(), ""))
            .collect())
    }
}

/// A module that registers a fixed list of mock extensions.
///
/// Clones share the activation counter, so a test can keep one handle and
/// give another to a resolver.
#[derive(Debug, Clone)]
pub struct MockModule {
    id: String,
    extensions: Vec<MockExtension>,
    activations: Arc<AtomicUsize>,
}

impl MockModule {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extensions: Vec::new(),
            activations: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_extension(mut self, extension: MockExtension) -> Self {
        self.extensions.push(extension);
        self
    }

    /// How many times `activate` has been called on this module or its clones.
    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }
}

impl ExtensionModule for MockModule {
    fn id(&self) -> &str {
        &self.id
    }

    fn activate(&self, registrar: &mut Registrar<'_>) -> Result<(), LecternError> {
        self.activations.fetch_add(1, Ordering::SeqCst);
        for extension in &self.extensions {
            registrar.register(Arc::new(extension.clone()))?;
        }
        Ok(())
    }
}

/// A module that stages its extensions and then reports an error.
#[derive(Debug, Clone)]
pub struct FailingModule {
    id: String,
    staged_first: Vec<MockExtension>,
    reason: String,
}

impl FailingModule {
    pub fn new(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            staged_first: Vec::new(),
            reason: reason.into(),
        }
    }

    /// Register `extension` before failing. It must not survive the failure.
    pub fn staging(mut self, extension: MockExtension) -> Self {
        self.staged_first.push(extension);
        self
    }
}

impl ExtensionModule for FailingModule {
    fn id(&self) -> &str {
        &self.id
    }

    fn activate(&self, registrar: &mut Registrar<'_>) -> Result<(), LecternError> {
        for extension in &self.staged_first {
            registrar.register(Arc::new(extension.clone()))?;
        }
        Err(LecternError::Internal(self.reason.clone()))
    }
}

/// A module whose activation panics.
#[derive(Debug, Clone)]
pub struct PanickingModule {
    id: String,
}

impl PanickingModule {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl ExtensionModule for PanickingModule {
    fn id(&self) -> &str {
        &self.id
    }

    fn activate(&self, _registrar: &mut Registrar<'_>) -> Result<(), LecternError> {
        panic!("module '{}' exploded during activation", self.id)
    }
}

type ModuleFactory = Arc<dyn Fn() -> Box<dyn ExtensionModule> + Send + Sync>;

/// Resolver over a fixed set of module factories.
#[derive(Clone, Default)]
pub struct MockResolver {
    factories: HashMap<String, ModuleFactory>,
    broken: HashMap<String, String>,
    panicking: Vec<String>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `module.id()` to clones of `module`.
    pub fn with_module<M>(mut self, module: M) -> Self
    where
        M: ExtensionModule + Clone + 'static,
    {
        let id = module.id().to_string();
        self.factories
            .insert(id, Arc::new(move || Box::new(module.clone())));
        self
    }

    /// Make `id` resolve to an error instead of a module.
    pub fn with_broken(mut self, id: impl Into<String>, reason: impl Into<String>) -> Self {
        self.broken.insert(id.into(), reason.into());
        self
    }

    /// Make resolving `id` panic, as a module constructor that blows up would.
    pub fn with_panicking(mut self, id: impl Into<String>) -> Self {
        self.panicking.push(id.into());
        self
    }
}

impl ModuleResolver for MockResolver {
    fn name(&self) -> &str {
        "mock"
    }

    fn resolve(&self, id: &str) -> Result<Option<Box<dyn ExtensionModule>>, LecternError> {
        if self.panicking.iter().any(|p| p == id) {
            panic!("module '{id}' exploded while being constructed");
        }
        if let Some(reason) = self.broken.get(id) {
            return Err(LecternError::Manifest(reason.clone()));
        }
        Ok(self.factories.get(id).map(|factory| factory()))
    }
}

impl std::fmt::Debug for MockResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("MockResolver")
            .field("modules", &ids)
            .field("broken", &self.broken.keys().collect::<Vec<_>>())
            .field("panicking", &self.panicking)
            .finish()
    }
}
