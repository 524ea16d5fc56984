// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Lectern presentation host.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across extension loading, configuration,
/// and content exchange.
#[derive(Debug, Error)]
pub enum LecternError {
    /// An extension module failed to resolve, activate, or self-register.
    ///
    /// Raised per module and caught at the registry's load boundary, so a
    /// single broken module never aborts loading of the others.
    #[error("failed to load extension module `{module}`: {reason}")]
    ExtensionLoad { module: String, reason: String },

    /// A strict query named an extension point that was never declared.
    #[error("unknown extension point `{point}`")]
    UnknownCapability { point: String },

    /// An implementation id is already present in the registry.
    #[error("extension `{id}` is already registered")]
    DuplicateExtension { id: String },

    /// Extension manifest parse or validation failure.
    #[error("invalid extension manifest: {0}")]
    Manifest(String),

    /// Configuration errors outside the diagnostic pipeline.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors with the offending path attached.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Content that an exporter, importer, or record reader could not handle.
    #[error("format error: {message}")]
    Format { message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LecternError {
    /// Shorthand for building an [`LecternError::ExtensionLoad`].
    pub fn extension_load(module: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ExtensionLoad {
            module: module.into(),
            reason: reason.into(),
        }
    }
}
