// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Toolbar contributor trait.

use crate::types::ToolbarItem;

/// Contributes buttons to the host's main toolbar.
pub trait ToolbarContributor: Send + Sync {
    fn toolbar_items(&self) -> Vec<ToolbarItem>;
}
