// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in module catalog.
//!
//! Maps the ids of the modules compiled into Lectern to constructors. The
//! catalog is only consulted through [`CatalogResolver`], so the host never
//! names a concrete module type.

use lectern_core::LecternError;

use crate::builtin::{
    BiblesModule, ImagesModule, SongsModule, TextExportModule, TextImportModule,
};
use crate::module::{ExtensionModule, ModuleResolver};

type ModuleConstructor = fn() -> Box<dyn ExtensionModule>;

/// Built-in modules in their default load order.
const BUILTIN_MODULES: [(&str, ModuleConstructor); 5] = [
    ("songs", songs),
    ("bibles", bibles),
    ("images", images),
    ("text-export", text_export),
    ("text-import", text_import),
];

fn songs() -> Box<dyn ExtensionModule> {
    Box::new(SongsModule)
}

fn bibles() -> Box<dyn ExtensionModule> {
    Box::new(BiblesModule)
}

fn images() -> Box<dyn ExtensionModule> {
    Box::new(ImagesModule)
}

fn text_export() -> Box<dyn ExtensionModule> {
    Box::new(TextExportModule)
}

fn text_import() -> Box<dyn ExtensionModule> {
    Box::new(TextImportModule)
}

/// Ids of every built-in module, in default load order.
pub fn builtin_module_ids() -> Vec<&'static str> {
    BUILTIN_MODULES.iter().map(|(id, _)| *id).collect()
}

/// Construct the built-in module with the given id.
pub fn builtin_module(id: &str) -> Option<Box<dyn ExtensionModule>> {
    BUILTIN_MODULES
        .iter()
        .find(|(candidate, _)| *candidate == id)
        .map(|(_, construct)| construct())
}

/// Resolves ids against the built-in catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogResolver;

impl ModuleResolver for CatalogResolver {
    fn name(&self) -> &str {
        "catalog"
    }

    fn resolve(&self, id: &str) -> Result<Option<Box<dyn ExtensionModule>>, LecternError> {
        Ok(builtin_module(id))
    }
}
