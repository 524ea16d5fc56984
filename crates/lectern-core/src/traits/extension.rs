// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that every extension implementation must implement.

use crate::traits::exchange::{Exporter, Importer};
use crate::traits::menu::MenuContributor;
use crate::traits::toolbar::ToolbarContributor;
use crate::types::{CapabilitySet, ExtensionMetadata, ExtensionPoint};

/// The base trait for all Lectern extension implementations.
///
/// An implementation declares the extension points it satisfies through
/// [`capabilities`](Extension::capabilities). For the built-in points that
/// carry behaviour (menu, toolbar, export, import) it must also return
/// `Some` from the matching accessor; the registry rejects implementations
/// that declare a capability they cannot serve.
pub trait Extension: Send + Sync + 'static {
    /// Unique identifier within a registry, e.g. `"songs.menu"`.
    fn id(&self) -> &str;

    /// The extension points this implementation satisfies.
    fn capabilities(&self) -> CapabilitySet;

    /// Display metadata.
    fn metadata(&self) -> ExtensionMetadata;

    fn as_menu(&self) -> Option<&dyn MenuContributor> {
        None
    }

    fn as_toolbar(&self) -> Option<&dyn ToolbarContributor> {
        None
    }

    fn as_exporter(&self) -> Option<&dyn Exporter> {
        None
    }

    fn as_importer(&self) -> Option<&dyn Importer> {
        None
    }
}

/// Returns the declared built-in capabilities whose accessor returns `None`.
///
/// An empty result means the implementation can serve everything it claims.
pub fn unsatisfied_capabilities(extension: &dyn Extension) -> Vec<ExtensionPoint> {
    extension
        .capabilities()
        .iter()
        .filter(|point| {
            let served = if **point == ExtensionPoint::MENU {
                extension.as_menu().is_some()
            } else if **point == ExtensionPoint::TOOLBAR {
                extension.as_toolbar().is_some()
            } else if **point == ExtensionPoint::EXPORT {
                extension.as_exporter().is_some()
            } else if **point == ExtensionPoint::IMPORT {
                extension.as_importer().is_some()
            } else {
                true
            };
            !served
        })
        .cloned()
        .collect()
}
