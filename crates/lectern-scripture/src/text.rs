// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Paragraph-aware view over normalized verse text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::markup::normalize;

/// Plain text produced by [`normalize`]: no markup, `\n\n` between
/// paragraphs, literal `"` for quotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Normalize `markup` and wrap the result.
    pub fn from_markup(markup: &str) -> Self {
        Self(normalize(markup))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Paragraphs in order, each trimmed. Empty paragraphs produced by
    /// adjacent breaks are skipped.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.0
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

impl From<String> for NormalizedText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
