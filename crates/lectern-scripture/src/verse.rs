// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Verse records in, display text out.
//!
//! Book, chapter and verse identifiers pass through untouched; only the
//! markup text is normalized.

use std::path::Path;

use lectern_core::{LecternError, VerseRecord};
use serde::Serialize;
use tracing::debug;

use crate::markup::normalize_with_warnings;
use crate::text::NormalizedText;

/// A verse whose text has been normalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedVerse {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: NormalizedText,
}

impl NormalizedVerse {
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// Normalize a single record. The record itself is left unchanged.
pub fn normalize_record(record: &VerseRecord) -> NormalizedVerse {
    let (text, warnings) = normalize_with_warnings(&record.text);
    for warning in &warnings {
        debug!(reference = %record.reference(), %warning, "verse markup normalized best-effort");
    }

    NormalizedVerse {
        book: record.book.clone(),
        chapter: record.chapter,
        verse: record.verse,
        text: NormalizedText::from(text),
    }
}

/// An ordered run of normalized verses, as loaded into one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Passage {
    verses: Vec<NormalizedVerse>,
}

impl Passage {
    pub fn verses(&self) -> &[NormalizedVerse] {
        &self.verses
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Verse texts joined by single spaces. Paragraph breaks inside a verse
    /// are kept; verses that normalized to nothing are skipped.
    pub fn to_text(&self) -> String {
        self.verses
            .iter()
            .map(|v| v.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Compact reference for the whole passage.
    ///
    /// `John 3:16`, `John 3:16-18`, `John 3:36-4:2`, or
    /// `Genesis 50:26-Exodus 1:1` depending on what the run spans. Verses
    /// that are not in ascending order are listed one by one instead, e.g.
    /// `John 3:18, John 3:16`.
    pub fn reference(&self) -> Option<String> {
        let first = self.verses.first()?;
        let last = self.verses.last()?;

        if !self.is_ascending() {
            let listed: Vec<String> = self.verses.iter().map(NormalizedVerse::reference).collect();
            return Some(listed.join(", "));
        }

        let reference = if first.book != last.book {
            format!("{}-{}", first.reference(), last.reference())
        } else if first.chapter != last.chapter {
            format!(
                "{} {}:{}-{}:{}",
                first.book, first.chapter, first.verse, last.chapter, last.verse
            )
        } else if first.verse != last.verse {
            format!("{}-{}", first.reference(), last.verse)
        } else {
            first.reference()
        };
        Some(reference)
    }

    /// True if every verse follows the previous one: later in the same book,
    /// or in a book not seen earlier in the run.
    fn is_ascending(&self) -> bool {
        self.verses.windows(2).enumerate().all(|(i, pair)| {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.book == next.book {
                (next.chapter, next.verse) > (prev.chapter, prev.verse)
            } else {
                !self.verses[..=i].iter().any(|v| v.book == next.book)
            }
        })
    }
}

/// Normalize every record, preserving input order.
///
/// Each verse is independent, so callers may equally split the slice and
/// normalize the parts on separate threads.
pub fn normalize_passage(records: &[VerseRecord]) -> Passage {
    Passage {
        verses: records.iter().map(normalize_record).collect(),
    }
}

/// Parse verse records from JSON Lines: one `VerseRecord` object per line.
///
/// Blank lines are ignored. The first malformed line fails the whole parse
/// with its 1-based line number.
pub fn parse_verse_records(content: &str) -> Result<Vec<VerseRecord>, LecternError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<VerseRecord>(line).map_err(|e| LecternError::Format {
                message: format!("verse record on line {}: {e}", index + 1),
            })
        })
        .collect()
}

/// Read and parse a JSON Lines verse file.
pub fn load_verse_records(path: &Path) -> Result<Vec<VerseRecord>, LecternError> {
    let content = std::fs::read_to_string(path).map_err(|source| LecternError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_verse_records(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(book: &str, chapter: u32, verse: u32, text: &str) -> VerseRecord {
        VerseRecord::new(book, chapter, verse, text)
    }

    #[test]
    fn normalize_record_keeps_identifiers() {
        let source = record("Genesis", 1, 1, "<title>The Creation</title>In the beginning");
        let verse = normalize_record(&source);

        assert_eq!(verse.book, "Genesis");
        assert_eq!(verse.chapter, 1);
        assert_eq!(verse.verse, 1);
        assert_eq!(verse.text.as_str(), "In the beginning");
        // The source record is untouched.
        assert!(source.text.starts_with("<title>"));
    }

    #[test]
    fn passage_joins_verses_in_order() {
        let passage = normalize_passage(&[
            record("John", 3, 16, "For God so loved the world,"),
            record("John", 3, 17, "<note>n</note>"),
            record("John", 3, 18, "He that believeth"),
        ]);
        assert_eq!(passage.verses().len(), 3);
        assert_eq!(
            passage.to_text(),
            "For God so loved the world, He that believeth"
        );
    }

    #[test]
    fn passage_reference_forms() {
        let single = normalize_passage(&[record("John", 3, 16, "a")]);
        assert_eq!(single.reference().as_deref(), Some("John 3:16"));

        let run = normalize_passage(&[record("John", 3, 16, "a"), record("John", 3, 18, "b")]);
        assert_eq!(run.reference().as_deref(), Some("John 3:16-18"));

        let chapters = normalize_passage(&[record("John", 3, 36, "a"), record("John", 4, 2, "b")]);
        assert_eq!(chapters.reference().as_deref(), Some("John 3:36-4:2"));

        let books = normalize_passage(&[record("Genesis", 50, 26, "a"), record("Exodus", 1, 1, "b")]);
        assert_eq!(books.reference().as_deref(), Some("Genesis 50:26-Exodus 1:1"));

        assert_eq!(Passage::default().reference(), None);
    }

    #[test]
    fn out_of_order_passage_lists_each_verse() {
        let reversed = normalize_passage(&[record("John", 3, 18, "a"), record("John", 3, 16, "b")]);
        assert_eq!(reversed.reference().as_deref(), Some("John 3:18, John 3:16"));

        let repeated = normalize_passage(&[record("John", 3, 16, "a"), record("John", 3, 16, "b")]);
        assert_eq!(repeated.reference().as_deref(), Some("John 3:16, John 3:16"));

        let back_and_forth = normalize_passage(&[
            record("Genesis", 50, 26, "a"),
            record("Exodus", 1, 1, "b"),
            record("Genesis", 50, 26, "c"),
        ]);
        assert_eq!(
            back_and_forth.reference().as_deref(),
            Some("Genesis 50:26, Exodus 1:1, Genesis 50:26")
        );
    }

    #[test]
    fn parse_skips_blank_lines() {
        let content = r#"{"book":"Psalms","chapter":23,"verse":1,"text":"The LORD is my shepherd"}

{"book":"Psalms","chapter":23,"verse":2,"text":"He maketh me to lie down"}
"#;
        let records = parse_verse_records(content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].verse, 2);
    }

    #[test]
    fn parse_reports_line_number() {
        let content = "{\"book\":\"Psalms\",\"chapter\":23,\"verse\":1,\"text\":\"ok\"}\nnot json\n";
        let err = parse_verse_records(content).unwrap_err().to_string();
        assert!(err.contains("line 2"), "got: {err}");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_verse_records(Path::new("/nonexistent/verses.jsonl")).unwrap_err();
        assert!(matches!(err, LecternError::Io { .. }));
    }
}
