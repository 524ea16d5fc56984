// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Export and import traits for moving slides in and out of the library.

use crate::error::LecternError;
use crate::types::Slide;

/// Writes slides out to an external text format.
pub trait Exporter: Send + Sync {
    /// Short format name used for lookup, e.g. `"text"`.
    fn format(&self) -> &str;

    /// Render the slides in this exporter's format.
    fn export(&self, slides: &[Slide]) -> Result<String, LecternError>;
}

/// Reads slides in from an external text format.
pub trait Importer: Send + Sync {
    /// Short format name used for lookup, e.g. `"text"`.
    fn format(&self) -> &str;

    /// Parse `input` into slides.
    fn import(&self, input: &str) -> Result<Vec<Slide>, LecternError>;
}
