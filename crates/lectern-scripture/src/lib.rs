// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripture text handling for Lectern.
//!
//! Verse text arrives from external scripture modules as quasi-XML markup
//! carrying footnotes, section titles, paragraph markers and quotations.
//! [`normalize`] turns one verse's markup into display-ready plain text; the
//! [`verse`] module applies it to whole records and passages.

pub mod markup;
pub mod text;
pub mod verse;

pub use markup::{normalize, normalize_with_warnings, MarkupWarning};
pub use text::NormalizedText;
pub use verse::{
    load_verse_records, normalize_passage, normalize_record, parse_verse_records, NormalizedVerse,
    Passage,
};
