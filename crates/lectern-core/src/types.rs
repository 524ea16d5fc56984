// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the extension host and content subsystems.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A named capability category that extension modules may implement.
///
/// Identity is the tag string (case-sensitive). The five built-in points are
/// available as associated constants; any other tag may be declared at run
/// time, which is what keeps the set of categories open.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionPoint(Cow<'static, str>);

impl ExtensionPoint {
    /// Generic plugin lifecycle participant.
    pub const PLUGIN: ExtensionPoint = ExtensionPoint(Cow::Borrowed("Plugin"));
    /// Contributes entries to the main menu bar.
    pub const MENU: ExtensionPoint = ExtensionPoint(Cow::Borrowed("Menu"));
    /// Contributes buttons to the main toolbar.
    pub const TOOLBAR: ExtensionPoint = ExtensionPoint(Cow::Borrowed("Toolbar"));
    /// Writes slides out to an external format.
    pub const EXPORT: ExtensionPoint = ExtensionPoint(Cow::Borrowed("Export"));
    /// Reads slides in from an external format.
    pub const IMPORT: ExtensionPoint = ExtensionPoint(Cow::Borrowed("Import"));

    /// Create an extension point from an arbitrary tag.
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    /// The built-in points, in declaration order.
    pub fn builtin() -> [ExtensionPoint; 5] {
        [
            Self::PLUGIN,
            Self::MENU,
            Self::TOOLBAR,
            Self::EXPORT,
            Self::IMPORT,
        ]
    }

    /// Returns the tag string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtensionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ExtensionPoint {
    fn from(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }
}

impl From<String> for ExtensionPoint {
    fn from(tag: String) -> Self {
        Self(Cow::Owned(tag))
    }
}

/// An ordered, de-duplicated set of extension points.
///
/// Insertion order is kept so listings stay readable; membership tests are
/// linear, which is fine for the handful of points an implementation claims.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    points: Vec<ExtensionPoint>,
}

impl CapabilitySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point. Returns false if it was already present.
    pub fn insert(&mut self, point: ExtensionPoint) -> bool {
        if self.points.contains(&point) {
            return false;
        }
        self.points.push(point);
        true
    }

    /// Returns true if `point` is in the set.
    pub fn contains(&self, point: &ExtensionPoint) -> bool {
        self.points.contains(point)
    }

    /// Returns true if every point of `other` is also in `self`.
    pub fn is_superset_of(&self, other: &CapabilitySet) -> bool {
        other.points.iter().all(|p| self.contains(p))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtensionPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<ExtensionPoint> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = ExtensionPoint>>(iter: I) -> Self {
        let mut set = CapabilitySet::new();
        for point in iter {
            set.insert(point);
        }
        set
    }
}

impl<const N: usize> From<[ExtensionPoint; N]> for CapabilitySet {
    fn from(points: [ExtensionPoint; N]) -> Self {
        points.into_iter().collect()
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.points.iter().map(ExtensionPoint::as_str).collect();
        f.write_str(&tags.join(", "))
    }
}

/// Descriptive metadata an extension implementation carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionMetadata {
    /// Human-readable name shown in plugin lists.
    pub display_name: String,
    /// One-line description.
    pub description: String,
    /// Semantic version string.
    pub version: String,
    /// Required extensions cannot be disabled from configuration.
    pub required: bool,
}

impl ExtensionMetadata {
    /// Metadata with an empty description, version `0.1.0`, and `required = false`.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            description: String::new(),
            version: "0.1.0".to_string(),
            required: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Top-level menu an item is placed under.
///
/// Declaration order is the order menus appear in the assembled menu bar.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum MenuLocation {
    File,
    /// `File > Import` submenu.
    Import,
    /// `File > Export` submenu.
    Export,
    Edit,
    View,
    Tools,
    Settings,
    Help,
}

/// A single menu entry contributed by an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Menu the entry belongs to.
    pub menu: MenuLocation,
    /// Action identifier dispatched when the entry is triggered.
    pub id: String,
    /// Visible label.
    pub label: String,
    /// Optional keyboard shortcut, e.g. `Ctrl+Shift+S`.
    #[serde(default)]
    pub shortcut: Option<String>,
}

impl MenuItem {
    pub fn new(menu: MenuLocation, id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            menu,
            id: id.into(),
            label: label.into(),
            shortcut: None,
        }
    }

    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }
}

/// A single toolbar button contributed by an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub tooltip: Option<String>,
}

impl ToolbarItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            tooltip: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// The minimal presentation unit exchanged with exporters and importers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub body: String,
}

impl Slide {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// One verse as read from an external scripture database.
///
/// `text` holds the raw module markup. Records are never mutated after they
/// are read; normalization produces a separate value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

impl VerseRecord {
    pub fn new(book: impl Into<String>, chapter: u32, verse: u32, text: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse,
            text: text.into(),
        }
    }

    /// Human-readable reference such as `John 3:16`.
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}
