// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lectern presentation host.
//!
//! This crate provides the extension trait family, the error type, and the
//! common types used throughout the Lectern workspace. Every extension module
//! implements traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LecternError;
pub use types::{
    CapabilitySet, ExtensionMetadata, ExtensionPoint, MenuItem, MenuLocation, Slide, ToolbarItem,
    VerseRecord,
};

pub use traits::{
    unsatisfied_capabilities, Exporter, Extension, Importer, MenuContributor, ToolbarContributor,
};
