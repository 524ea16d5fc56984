// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extension modules and the resolvers that locate them.
//!
//! A module is the unit of loading: the host hands the registry a list of
//! module ids, a [`ModuleResolver`] turns each id into an
//! [`ExtensionModule`], and activating the module self-registers its
//! extension implementations through a [`Registrar`].

use lectern_core::LecternError;

use crate::registry::Registrar;

/// A loadable unit that contributes extension implementations.
pub trait ExtensionModule: Send + Sync {
    /// The id this module was resolved from.
    fn id(&self) -> &str;

    /// Register this module's implementations.
    ///
    /// Registrations are staged and committed only if this returns `Ok`, so
    /// an error part-way through leaves the registry untouched.
    fn activate(&self, registrar: &mut Registrar<'_>) -> Result<(), LecternError>;
}

/// Maps module ids to modules.
pub trait ModuleResolver: Send + Sync {
    /// Short name used in logs, e.g. `"catalog"`.
    fn name(&self) -> &str;

    /// Resolve `id`.
    ///
    /// `Ok(None)` means this resolver does not know the id; `Err` means it
    /// does but the module is broken.
    fn resolve(&self, id: &str) -> Result<Option<Box<dyn ExtensionModule>>, LecternError>;
}

/// Tries each resolver in order; the first one that knows an id wins.
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn ModuleResolver>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resolver with lower priority than those already present.
    pub fn push(&mut self, resolver: Box<dyn ModuleResolver>) {
        self.resolvers.push(resolver);
    }

    /// Names of the resolvers, in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl ModuleResolver for ResolverChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn resolve(&self, id: &str) -> Result<Option<Box<dyn ExtensionModule>>, LecternError> {
        for resolver in &self.resolvers {
            if let Some(module) = resolver.resolve(id)? {
                tracing::debug!(module = id, resolver = resolver.name(), "module resolved");
                return Ok(Some(module));
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverChain")
            .field("resolvers", &self.names())
            .finish()
    }
}
