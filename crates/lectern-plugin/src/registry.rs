// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability registry for extension implementations.
//!
//! The `CapabilityRegistry` maps each declared [`ExtensionPoint`] to the
//! implementations that claim it, in registration order. Implementations
//! arrive by self-registration: the host passes module ids to
//! [`load_extensions`](CapabilityRegistry::load_extensions), each module is
//! resolved and activated, and activation registers the module's
//! implementations through a [`Registrar`]. No central list of
//! implementations exists anywhere in the host.
//!
//! The registry is a plain value. Hosts that share it across threads wrap it
//! in a lock; the usual pattern is to populate it once at start-up and only
//! read it afterwards.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use lectern_core::{
    unsatisfied_capabilities, CapabilitySet, Extension, ExtensionPoint, LecternError,
};
use tracing::{debug, info, warn};

use crate::module::{ModuleResolver, ResolverChain};

/// An implementation together with the capability set it declared when it
/// was registered. Queries use the recorded set so the indexes cannot drift
/// from what the implementation reports later.
struct Registered {
    extension: Arc<dyn Extension>,
    capabilities: CapabilitySet,
}

/// Outcome of a [`CapabilityRegistry::load_extensions`] call.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Modules activated by this call, in load order.
    pub loaded: Vec<String>,
    /// Module ids skipped because they were already activated or attempted.
    pub skipped: Vec<String>,
    /// Modules that failed, each with its `ExtensionLoad` error.
    pub failed: Vec<(String, LecternError)>,
}

impl LoadReport {
    /// True when no module failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    fn attempted(&self, id: &str) -> bool {
        self.loaded.iter().any(|m| m == id) || self.failed.iter().any(|(m, _)| m == id)
    }
}

/// Registry of extension implementations indexed by capability.
pub struct CapabilityRegistry {
    points: Vec<ExtensionPoint>,
    entries: Vec<Registered>,
    by_point: HashMap<ExtensionPoint, Vec<Arc<dyn Extension>>>,
    loaded_modules: Vec<String>,
    resolvers: ResolverChain,
}

impl CapabilityRegistry {
    /// Create an empty registry with no declared points and no resolvers.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            entries: Vec::new(),
            by_point: HashMap::new(),
            loaded_modules: Vec::new(),
            resolvers: ResolverChain::new(),
        }
    }

    /// Declare a capability category.
    ///
    /// Idempotent: returns `false` and changes nothing if the point was
    /// already declared.
    pub fn register_extension_point(&mut self, point: ExtensionPoint) -> bool {
        if self.points.contains(&point) {
            debug!(point = %point, "extension point already declared");
            return false;
        }
        debug!(point = %point, "extension point declared");
        self.by_point.entry(point.clone()).or_default();
        self.points.push(point);
        true
    }

    /// Declare the five built-in points (`Plugin`, `Menu`, `Toolbar`,
    /// `Export`, `Import`).
    pub fn declare_builtin_points(&mut self) {
        for point in ExtensionPoint::builtin() {
            self.register_extension_point(point);
        }
    }

    /// Declared points in declaration order.
    pub fn extension_points(&self) -> &[ExtensionPoint] {
        &self.points
    }

    pub fn is_declared(&self, point: &ExtensionPoint) -> bool {
        self.points.contains(point)
    }

    /// Append a resolver consulted by [`load_extensions`](Self::load_extensions).
    pub fn add_resolver(&mut self, resolver: Box<dyn ModuleResolver>) {
        self.resolvers.push(resolver);
    }

    /// Resolve and activate each module id exactly once.
    ///
    /// A module that cannot be resolved, returns an error from activation,
    /// registers an invalid implementation, or panics is logged and
    /// reported, and contributes nothing. The remaining ids still load.
    pub fn load_extensions<I, S>(&mut self, ids: I) -> LoadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = LoadReport::default();

        for id in ids {
            let id = id.as_ref();
            if self.loaded_modules.iter().any(|m| m == id) || report.attempted(id) {
                debug!(module = id, "extension module already attempted, skipping");
                report.skipped.push(id.to_string());
                continue;
            }

            match self.activate_module(id) {
                Ok(staged) => {
                    let count = staged.len();
                    for registered in staged {
                        self.commit(registered);
                    }
                    self.loaded_modules.push(id.to_string());
                    info!(module = id, extensions = count, "extension module activated");
                    report.loaded.push(id.to_string());
                }
                Err(err) => {
                    warn!(module = id, error = %err, "extension module skipped");
                    report.failed.push((id.to_string(), err));
                }
            }
        }

        report
    }

    /// Register an implementation directly, outside any module.
    ///
    /// Fails on a duplicate id, on a capability that was never declared, and
    /// on a declared built-in capability whose accessor returns `None`.
    pub fn register(&mut self, extension: Arc<dyn Extension>) -> Result<(), LecternError> {
        let registered = self.validate(extension, &[])?;
        self.commit(registered);
        Ok(())
    }

    /// Implementations declaring `point`, in registration order.
    ///
    /// Querying a point that was never declared is a caller bug; it is
    /// logged and yields an empty list.
    pub fn find_implementations(&self, point: &ExtensionPoint) -> Vec<Arc<dyn Extension>> {
        match self.by_point.get(point) {
            Some(list) => list.clone(),
            None => {
                debug!(point = %point, "query on undeclared extension point");
                Vec::new()
            }
        }
    }

    /// Like [`find_implementations`](Self::find_implementations) but fails
    /// with `UnknownCapability` for an undeclared point.
    pub fn try_find_implementations(
        &self,
        point: &ExtensionPoint,
    ) -> Result<Vec<Arc<dyn Extension>>, LecternError> {
        self.by_point
            .get(point)
            .cloned()
            .ok_or_else(|| LecternError::UnknownCapability {
                point: point.to_string(),
            })
    }

    /// Implementations whose declared capabilities include every point in
    /// `capabilities`. The empty set matches every implementation.
    pub fn find_by_capability(&self, capabilities: &CapabilitySet) -> Vec<Arc<dyn Extension>> {
        if let Some(undeclared) = capabilities.iter().find(|p| !self.is_declared(p)) {
            debug!(point = %undeclared, "capability query names an undeclared point");
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|r| r.capabilities.is_superset_of(capabilities))
            .map(|r| Arc::clone(&r.extension))
            .collect()
    }

    /// Look up an implementation by id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Extension>> {
        self.entries
            .iter()
            .find(|r| r.extension.id() == id)
            .map(|r| Arc::clone(&r.extension))
    }

    /// All implementations in registration order.
    pub fn list_all(&self) -> Vec<Arc<dyn Extension>> {
        self.entries
            .iter()
            .map(|r| Arc::clone(&r.extension))
            .collect()
    }

    /// Remove an implementation from every index.
    ///
    /// Idempotent: returns `false` if nothing with that id is registered.
    pub fn unregister(&mut self, id: &str) -> bool {
        let Some(position) = self.entries.iter().position(|r| r.extension.id() == id) else {
            debug!(extension = id, "unregister of absent extension ignored");
            return false;
        };

        let removed = self.entries.remove(position);
        for point in removed.capabilities.iter() {
            if let Some(list) = self.by_point.get_mut(point) {
                list.retain(|e| e.id() != id);
            }
        }
        info!(extension = id, "extension unregistered");
        true
    }

    /// Module ids activated so far, in load order.
    pub fn loaded_modules(&self) -> &[String] {
        &self.loaded_modules
    }

    /// Returns the number of registered implementations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no implementations are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every implementation and forget which modules were loaded.
    ///
    /// Declared points and resolvers are kept, so the registry can be
    /// repopulated. Returns the number of implementations dropped.
    pub fn shutdown(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        for list in self.by_point.values_mut() {
            list.clear();
        }
        self.loaded_modules.clear();
        info!(dropped, "capability registry shut down");
        dropped
    }

    fn activate_module(&self, id: &str) -> Result<Vec<Registered>, LecternError> {
        let resolved = panic::catch_unwind(AssertUnwindSafe(|| self.resolvers.resolve(id)))
            .map_err(|payload| {
                LecternError::extension_load(
                    id,
                    format!("panicked while resolving: {}", panic_message(payload.as_ref())),
                )
            })?;
        let module = resolved
            .map_err(|err| into_load_error(id, err))?
            .ok_or_else(|| LecternError::extension_load(id, "no resolver provides this module"))?;

        let mut registrar = Registrar {
            registry: self,
            module: id,
            staged: Vec::new(),
        };
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| module.activate(&mut registrar)));

        match outcome {
            Ok(Ok(())) => Ok(registrar.staged),
            Ok(Err(err)) => Err(into_load_error(id, err)),
            Err(payload) => Err(LecternError::extension_load(
                id,
                format!("panicked during activation: {}", panic_message(payload.as_ref())),
            )),
        }
    }

    fn validate(
        &self,
        extension: Arc<dyn Extension>,
        staged: &[Registered],
    ) -> Result<Registered, LecternError> {
        let id = extension.id();
        let duplicate = self.entries.iter().chain(staged).any(|r| r.extension.id() == id);
        if duplicate {
            return Err(LecternError::DuplicateExtension { id: id.to_string() });
        }

        let capabilities = extension.capabilities();
        if let Some(point) = capabilities.iter().find(|p| !self.is_declared(p)) {
            return Err(LecternError::UnknownCapability {
                point: point.to_string(),
            });
        }

        let unsatisfied = unsatisfied_capabilities(extension.as_ref());
        if !unsatisfied.is_empty() {
            let points: CapabilitySet = unsatisfied.into_iter().collect();
            return Err(LecternError::extension_load(
                id,
                format!("declares {points} but does not provide it"),
            ));
        }

        Ok(Registered {
            extension,
            capabilities,
        })
    }

    fn commit(&mut self, registered: Registered) {
        for point in registered.capabilities.iter() {
            self.by_point
                .entry(point.clone())
                .or_default()
                .push(Arc::clone(&registered.extension));
        }
        debug!(
            extension = registered.extension.id(),
            capabilities = %registered.capabilities,
            "extension registered"
        );
        self.entries.push(registered);
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<&str> = self.entries.iter().map(|r| r.extension.id()).collect();
        f.debug_struct("CapabilityRegistry")
            .field("points", &self.points)
            .field("extensions", &ids)
            .field("loaded_modules", &self.loaded_modules)
            .field("resolvers", &self.resolvers)
            .finish()
    }
}

/// Staging area handed to [`ExtensionModule::activate`](crate::ExtensionModule::activate).
///
/// Registrations are validated against the registry immediately but only
/// committed once the whole module has activated successfully.
pub struct Registrar<'a> {
    registry: &'a CapabilityRegistry,
    module: &'a str,
    staged: Vec<Registered>,
}

impl Registrar<'_> {
    /// Stage an implementation for registration.
    pub fn register(&mut self, extension: Arc<dyn Extension>) -> Result<(), LecternError> {
        let registered = self.registry.validate(extension, &self.staged)?;
        debug!(
            module = self.module,
            extension = registered.extension.id(),
            "implementation staged"
        );
        self.staged.push(registered);
        Ok(())
    }
}

fn into_load_error(module: &str, err: LecternError) -> LecternError {
    match err {
        LecternError::ExtensionLoad { .. } => err,
        other => LecternError::extension_load(module, other.to_string()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
