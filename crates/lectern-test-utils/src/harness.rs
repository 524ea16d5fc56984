// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry harness for integration testing.
//!
//! `RegistryHarness` assembles a [`CapabilityRegistry`] with the built-in
//! points declared, mock modules wired in through a [`MockResolver`], and
//! the requested module ids already loaded.

use lectern_core::{ExtensionPoint, LecternError};
use lectern_plugin::{
    builtin_module_ids, CapabilityRegistry, CatalogResolver, ExtensionModule, LoadReport,
};
use tracing::debug;

use crate::mock_extension::MockResolver;

/// Builder for [`RegistryHarness`].
pub struct RegistryHarnessBuilder {
    extra_points: Vec<ExtensionPoint>,
    resolver: MockResolver,
    load_order: Vec<String>,
    with_catalog: bool,
}

impl RegistryHarnessBuilder {
    fn new() -> Self {
        Self {
            extra_points: Vec::new(),
            resolver: MockResolver::new(),
            load_order: Vec::new(),
            with_catalog: false,
        }
    }

    /// Declare an additional, non-built-in extension point.
    pub fn with_point(mut self, point: impl Into<ExtensionPoint>) -> Self {
        self.extra_points.push(point.into());
        self
    }

    /// Add a module and queue its id for loading.
    pub fn with_module<M>(mut self, module: M) -> Self
    where
        M: ExtensionModule + Clone + 'static,
    {
        self.load_order.push(module.id().to_string());
        self.resolver = self.resolver.with_module(module);
        self
    }

    /// Queue an id that resolves to an error.
    pub fn with_broken_module(mut self, id: &str, reason: &str) -> Self {
        self.load_order.push(id.to_string());
        self.resolver = self.resolver.with_broken(id, reason);
        self
    }

    /// Queue an id whose resolution panics.
    pub fn with_panicking_module(mut self, id: &str) -> Self {
        self.load_order.push(id.to_string());
        self.resolver = self.resolver.with_panicking(id);
        self
    }

    /// Queue an id without providing a module for it.
    pub fn with_module_id(mut self, id: &str) -> Self {
        self.load_order.push(id.to_string());
        self
    }

    /// Also load every built-in module, ahead of the queued ids.
    pub fn with_builtin_catalog(mut self) -> Self {
        self.with_catalog = true;
        self
    }

    /// Build the registry and load the queued ids.
    pub fn build(self) -> RegistryHarness {
        let mut registry = CapabilityRegistry::new();
        registry.declare_builtin_points();
        for point in self.extra_points {
            registry.register_extension_point(point);
        }

        let mut ids: Vec<String> = Vec::new();
        if self.with_catalog {
            registry.add_resolver(Box::new(CatalogResolver));
            ids.extend(builtin_module_ids().into_iter().map(str::to_string));
        }
        registry.add_resolver(Box::new(self.resolver));
        ids.extend(self.load_order);

        let report = registry.load_extensions(&ids);
        debug!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "registry harness built"
        );

        RegistryHarness { registry, report }
    }
}

/// A populated registry plus the report from its initial load.
pub struct RegistryHarness {
    /// The registry under test.
    pub registry: CapabilityRegistry,
    /// Outcome of the initial `load_extensions` call.
    pub report: LoadReport,
}

impl RegistryHarness {
    /// Create a new builder for configuring the harness.
    pub fn builder() -> RegistryHarnessBuilder {
        RegistryHarnessBuilder::new()
    }

    /// Ids of the implementations declaring `point`, in registration order.
    pub fn ids_for(&self, point: &ExtensionPoint) -> Vec<String> {
        self.registry
            .find_implementations(point)
            .iter()
            .map(|e| e.id().to_string())
            .collect()
    }

    /// The load error recorded for `module`, if it failed.
    pub fn failure(&self, module: &str) -> Option<&LecternError> {
        self.report
            .failed
            .iter()
            .find(|(id, _)| id == module)
            .map(|(_, err)| err)
    }
}
