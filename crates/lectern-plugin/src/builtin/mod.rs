// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in extension modules compiled into Lectern.
//!
//! These load through the same module path as manifest extensions; the
//! host only ever refers to them by id.

pub mod library;
pub mod text;

pub use library::{BiblesModule, ImagesModule, SongsModule};
pub use text::{TextExportModule, TextExporter, TextImportModule, TextImporter};
