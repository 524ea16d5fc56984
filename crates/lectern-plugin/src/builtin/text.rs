// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text slide exchange.
//!
//! The format is one slide per block, blocks separated by a line holding
//! only `---`. The first line of a block is the slide title and the rest is
//! the body:
//!
//! ```text
//! Amazing Grace
//! Amazing grace, how sweet the sound
//! ---
//! John 3:16
//! For God so loved the world
//! ```

use std::sync::Arc;

use lectern_core::{
    CapabilitySet, Exporter, Extension, ExtensionMetadata, ExtensionPoint, Importer,
    LecternError, MenuContributor, MenuItem, MenuLocation, Slide,
};

use crate::module::ExtensionModule;
use crate::registry::Registrar;

const SEPARATOR: &str = "---";
const FORMAT: &str = "text";

/// Writes slides as plain text.
pub struct TextExporter;

impl Extension for TextExporter {
    fn id(&self) -> &str {
        "text-export"
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::from([ExtensionPoint::EXPORT, ExtensionPoint::MENU])
    }

    fn metadata(&self) -> ExtensionMetadata {
        ExtensionMetadata::new("Plain Text Export")
            .with_description("Export slides as plain text separated by --- lines")
    }

    fn as_menu(&self) -> Option<&dyn MenuContributor> {
        Some(self)
    }

    fn as_exporter(&self) -> Option<&dyn Exporter> {
        Some(self)
    }
}

impl MenuContributor for TextExporter {
    fn menu_items(&self) -> Vec<MenuItem> {
        vec![MenuItem::new(
            MenuLocation::Export,
            "text-export.slides",
            "Plain Text...",
        )]
    }
}

impl Exporter for TextExporter {
    fn format(&self) -> &str {
        FORMAT
    }

    fn export(&self, slides: &[Slide]) -> Result<String, LecternError> {
        let mut blocks = Vec::with_capacity(slides.len());
        for slide in slides {
            let title = slide.title.trim();
            if title.is_empty() || title.contains('\n') {
                return Err(LecternError::Format {
                    message: format!("slide title must be a single non-empty line, got {title:?}"),
                });
            }
            if slide.body.lines().any(|line| line.trim() == SEPARATOR) {
                return Err(LecternError::Format {
                    message: format!("body of slide '{title}' contains a '{SEPARATOR}' line"),
                });
            }

            let body = slide.body.trim();
            if body.is_empty() {
                blocks.push(title.to_string());
            } else {
                blocks.push(format!("{title}\n{body}"));
            }
        }

        let mut output = blocks.join(&format!("\n{SEPARATOR}\n"));
        if !output.is_empty() {
            output.push('\n');
        }
        Ok(output)
    }
}

/// Reads slides from plain text.
pub struct TextImporter;

impl Extension for TextImporter {
    fn id(&self) -> &str {
        "text-import"
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::from([ExtensionPoint::IMPORT, ExtensionPoint::MENU])
    }

    fn metadata(&self) -> ExtensionMetadata {
        ExtensionMetadata::new("Plain Text Import")
            .with_description("Import slides from plain text separated by --- lines")
    }

    fn as_menu(&self) -> Option<&dyn MenuContributor> {
        Some(self)
    }

    fn as_importer(&self) -> Option<&dyn Importer> {
        Some(self)
    }
}

impl MenuContributor for TextImporter {
    fn menu_items(&self) -> Vec<MenuItem> {
        vec![MenuItem::new(
            MenuLocation::Import,
            "text-import.slides",
            "Plain Text...",
        )]
    }
}

impl Importer for TextImporter {
    fn format(&self) -> &str {
        FORMAT
    }

    fn import(&self, input: &str) -> Result<Vec<Slide>, LecternError> {
        let mut slides = Vec::new();
        let mut block: Vec<&str> = Vec::new();

        for line in input.lines().chain(std::iter::once(SEPARATOR)) {
            if line.trim() != SEPARATOR {
                block.push(line);
                continue;
            }

            let text = block.join("\n");
            block.clear();
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let (title, body) = text.split_once('\n').unwrap_or((text, ""));
            slides.push(Slide::new(title.trim(), body.trim()));
        }

        Ok(slides)
    }
}

/// Registers [`TextExporter`].
pub struct TextExportModule;

impl ExtensionModule for TextExportModule {
    fn id(&self) -> &str {
        "text-export"
    }

    fn activate(&self, registrar: &mut Registrar<'_>) -> Result<(), LecternError> {
        registrar.register(Arc::new(TextExporter))
    }
}

/// Registers [`TextImporter`].
pub struct TextImportModule;

impl ExtensionModule for TextImportModule {
    fn id(&self) -> &str {
        "text-import"
    }

    fn activate(&self, registrar: &mut Registrar<'_>) -> Result<(), LecternError> {
        registrar.register(Arc::new(TextImporter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides() -> Vec<Slide> {
        vec![
            Slide::new("Amazing Grace", "Amazing grace, how sweet the sound\nThat saved a wretch like me"),
            Slide::new("Announcements", ""),
            Slide::new("John 3:16", "For God so loved the world"),
        ]
    }

    #[test]
    fn export_writes_separated_blocks() {
        let text = TextExporter.export(&slides()).unwrap();
        assert_eq!(
            text,
            "Amazing Grace\nAmazing grace, how sweet the sound\nThat saved a wretch like me\n---\nAnnouncements\n---\nJohn 3:16\nFor God so loved the world\n"
        );
    }

    #[test]
    fn import_reads_what_export_wrote() {
        let text = TextExporter.export(&slides()).unwrap();
        assert_eq!(TextImporter.import(&text).unwrap(), slides());
    }

    #[test]
    fn import_ignores_empty_blocks_and_padding() {
        let input = "\n---\n\n  Title  \n\nBody\n\n---\n---\n";
        let slides = TextImporter.import(input).unwrap();
        assert_eq!(slides, vec![Slide::new("Title", "Body")]);
    }

    #[test]
    fn export_rejects_multiline_title() {
        let err = TextExporter
            .export(&[Slide::new("Two\nLines", "body")])
            .unwrap_err();
        assert!(matches!(err, LecternError::Format { .. }));
    }

    #[test]
    fn export_rejects_separator_in_body() {
        let err = TextExporter
            .export(&[Slide::new("Title", "before\n---\nafter")])
            .unwrap_err();
        assert!(err.to_string().contains("contains a '---' line"));
    }

    #[test]
    fn export_of_nothing_is_empty() {
        assert_eq!(TextExporter.export(&[]).unwrap(), "");
        assert!(TextImporter.import("").unwrap().is_empty());
    }
}
