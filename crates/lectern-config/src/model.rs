// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Lectern presentation host.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level Lectern configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LecternConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Extension module loading.
    #[serde(default)]
    pub extensions: ExtensionsConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name of the application.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "lectern".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which extension modules to load and from where.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionsConfig {
    /// Module ids to load, in order.
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,

    /// Directory of `<id>.toml` extension manifests. Every manifest found
    /// there is loaded after `modules`.
    #[serde(default)]
    pub manifest_dir: Option<String>,

    /// Module or implementation ids to leave out.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            modules: default_modules(),
            manifest_dir: None,
            disabled: Vec::new(),
        }
    }
}

fn default_modules() -> Vec<String> {
    ["songs", "bibles", "images", "text-export", "text-import"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl ExtensionsConfig {
    /// True if `id` appears in `disabled`.
    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled.iter().any(|d| d == id)
    }

    /// The manifest directory with a leading `~/` expanded to the home
    /// directory.
    pub fn resolved_manifest_dir(&self) -> Option<PathBuf> {
        let raw = self.manifest_dir.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(raw)),
        }
    }
}
