// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lectern normalize` and `lectern verses` command implementations.

use std::io::Read;
use std::path::Path;

use lectern_core::LecternError;
use lectern_scripture::{load_verse_records, normalize_passage, normalize_with_warnings, Passage};
use tracing::warn;

/// Run the `lectern normalize` command.
///
/// Reads markup from `file`, or stdin when absent, and prints the plain
/// text. Warnings go to the log; the best-effort output is still printed.
pub fn run_normalize(file: Option<&Path>) -> Result<(), LecternError> {
    let markup = match file {
        Some(path) => std::fs::read_to_string(path).map_err(|source| LecternError::Io {
            path: path.to_path_buf(),
            source,
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| LecternError::Io {
                    path: "<stdin>".into(),
                    source,
                })?;
            buf
        }
    };

    let (text, warnings) = normalize_with_warnings(&markup);
    for warning in &warnings {
        warn!(%warning, "markup normalized best-effort");
    }
    println!("{text}");
    Ok(())
}

/// Run the `lectern verses` command.
pub fn run_verses(file: &Path, json: bool) -> Result<(), LecternError> {
    let records = load_verse_records(file)?;
    let passage = normalize_passage(&records);

    if json {
        let rendered = serde_json::to_string_pretty(&passage)
            .map_err(|e| LecternError::Internal(format!("failed to serialize passage: {e}")))?;
        println!("{rendered}");
    } else {
        print!("{}", render_passage(&passage));
    }
    Ok(())
}

/// One verse per line with its reference, then the combined slide text.
pub fn render_passage(passage: &Passage) -> String {
    let Some(reference) = passage.reference() else {
        return "(no verses)\n".to_string();
    };

    let mut out = String::new();
    for verse in passage.verses() {
        out.push_str(&format!("{:<18} {}\n", verse.reference(), verse.text));
    }
    out.push_str(&format!("\n{reference}\n{}\n", passage.to_text()));
    out
}
