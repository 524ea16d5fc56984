// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extension trait definitions for the Lectern capability registry.
//!
//! Every implementation extends the [`Extension`] base trait and exposes its
//! capability-specific behaviour through the `as_*` accessors.

pub mod exchange;
pub mod extension;
pub mod menu;
pub mod toolbar;

pub use exchange::{Exporter, Importer};
pub use extension::{unsatisfied_capabilities, Extension};
pub use menu::MenuContributor;
pub use toolbar::ToolbarContributor;
