// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability registry, extension modules, manifests, and host assembly.
//!
//! Extensions reach the host through self-registration: modules are resolved
//! by id, activated once, and register their implementations with the
//! [`CapabilityRegistry`]. The host then queries the registry by extension
//! point to build its menus and toolbars and to route export/import.

pub mod builtin;
pub mod catalog;
pub mod declared;
pub mod host;
pub mod manifest;
pub mod module;
pub mod registry;

pub use catalog::{builtin_module, builtin_module_ids, CatalogResolver};
pub use declared::DeclaredExtension;
pub use host::{export_formats, export_slides, import_formats, import_slides, MenuBar, Toolbar};
pub use manifest::{
    discover_manifest_ids, parse_extension_manifest, ExtensionManifest, ManifestModule,
    ManifestResolver,
};
pub use module::{ExtensionModule, ModuleResolver, ResolverChain};
pub use registry::{CapabilityRegistry, LoadReport, Registrar};
