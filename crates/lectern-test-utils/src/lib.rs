// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Lectern integration tests.
//!
//! Provides mock extensions, mock modules, and a registry harness for fast,
//! deterministic tests of the capability registry and its consumers.
//!
//! # Components
//!
//! - [`MockExtension`] - Configurable implementation serving any built-in point
//! - [`MockModule`], [`FailingModule`], [`PanickingModule`] - Modules with
//!   scripted activation behaviour
//! - [`MockResolver`] - Resolver over a fixed set of module factories
//! - [`RegistryHarness`] - Builder that assembles a populated registry

pub mod harness;
pub mod mock_extension;

pub use harness::{RegistryHarness, RegistryHarnessBuilder};
pub use mock_extension::{
    FailingModule, MockExtension, MockModule, MockResolver, PanickingModule,
};
