// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Menu contributor trait.

use crate::types::MenuItem;

/// Contributes entries to the host's menu bar.
///
/// The host calls this while assembling menus at window construction time
/// and again whenever the registry changes.
pub trait MenuContributor: Send + Sync {
    fn menu_items(&self) -> Vec<MenuItem>;
}
