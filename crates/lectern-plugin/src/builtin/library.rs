// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Library media types: songs, Bibles and images.

use std::sync::Arc;

use lectern_core::{
    ExtensionMetadata, ExtensionPoint, LecternError, MenuItem, MenuLocation, ToolbarItem,
};

use crate::declared::DeclaredExtension;
use crate::module::ExtensionModule;
use crate::registry::Registrar;

/// Song library: lyrics editing and song imports.
pub struct SongsModule;

impl ExtensionModule for SongsModule {
    fn id(&self) -> &str {
        "songs"
    }

    fn activate(&self, registrar: &mut Registrar<'_>) -> Result<(), LecternError> {
        let metadata = ExtensionMetadata::new("Songs")
            .with_description("Manage the song library and display lyrics")
            .required();
        let songs = DeclaredExtension::new("songs", metadata)
            .with_capability(ExtensionPoint::PLUGIN)
            .with_menu_item(
                MenuItem::new(MenuLocation::File, "songs.new", "New Song").with_shortcut("Ctrl+N"),
            )
            .with_menu_item(MenuItem::new(
                MenuLocation::Import,
                "songs.import.openlyrics",
                "OpenLyrics Songs...",
            ))
            .with_menu_item(MenuItem::new(
                MenuLocation::Tools,
                "songs.reindex",
                "Re-index Songs",
            ))
            .with_toolbar_item(
                ToolbarItem::new("songs.search", "Songs").with_tooltip("Search the song library"),
            );
        registrar.register(Arc::new(songs))
    }
}

/// Bible verses from installed scripture modules.
pub struct BiblesModule;

impl ExtensionModule for BiblesModule {
    fn id(&self) -> &str {
        "bibles"
    }

    fn activate(&self, registrar: &mut Registrar<'_>) -> Result<(), LecternError> {
        let metadata = ExtensionMetadata::new("Bibles")
            .with_description("Search scripture modules and display verses");
        let bibles = DeclaredExtension::new("bibles", metadata)
            .with_capability(ExtensionPoint::PLUGIN)
            .with_menu_item(MenuItem::new(
                MenuLocation::Import,
                "bibles.import",
                "Bible Module...",
            ))
            .with_menu_item(
                MenuItem::new(MenuLocation::View, "bibles.search", "Bible Search")
                    .with_shortcut("Ctrl+B"),
            )
            .with_toolbar_item(
                ToolbarItem::new("bibles.quick-search", "Bibles")
                    .with_tooltip("Quick verse lookup"),
            );
        registrar.register(Arc::new(bibles))
    }
}

/// Image slides.
pub struct ImagesModule;

impl ExtensionModule for ImagesModule {
    fn id(&self) -> &str {
        "images"
    }

    fn activate(&self, registrar: &mut Registrar<'_>) -> Result<(), LecternError> {
        let images = DeclaredExtension::new(
            "images",
            ExtensionMetadata::new("Images").with_description("Show pictures as slides"),
        )
        .with_capability(ExtensionPoint::PLUGIN)
        .with_toolbar_item(
            ToolbarItem::new("images.add", "Images").with_tooltip("Add images to the service"),
        );
        registrar.register(Arc::new(images))
    }
}
