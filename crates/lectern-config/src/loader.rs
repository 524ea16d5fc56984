// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lectern.toml` > `~/.config/lectern/lectern.toml` > `/etc/lectern/lectern.toml`
//! with environment variable overrides via `LECTERN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LecternConfig;

/// Config file name looked up in every layer.
pub const CONFIG_FILE_NAME: &str = "lectern.toml";

/// System-wide config path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/lectern/lectern.toml";

/// Sections recognised in `LECTERN_<SECTION>_<KEY>` variables.
const ENV_SECTIONS: [&str; 2] = ["app", "extensions"];

/// The user config path under the XDG config directory, if one exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lectern").join(CONFIG_FILE_NAME))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lectern/lectern.toml` (system-wide)
/// 3. `~/.config/lectern/lectern.toml` (user XDG config)
/// 4. `./lectern.toml` (local directory)
/// 5. `LECTERN_*` environment variables
pub fn load_config() -> Result<LecternConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LecternConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LecternConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// Backs the `--config` flag; the XDG hierarchy is not consulted.
pub fn load_config_from_path(path: &Path) -> Result<LecternConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LecternConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LecternConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `LECTERN_EXTENSIONS_MANIFEST_DIR` must map to
/// `extensions.manifest_dir`, not `extensions.manifest.dir`.
fn env_provider() -> Env {
    Env::prefixed("LECTERN_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to a dotted config key.
fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("app_log_level"), "app.log_level");
        assert_eq!(
            map_env_key("extensions_manifest_dir"),
            "extensions.manifest_dir"
        );
        assert_eq!(map_env_key("extensions_disabled"), "extensions.disabled");
    }

    #[test]
    fn unknown_env_sections_pass_through() {
        assert_eq!(map_env_key("theme_color"), "theme_color");
        assert_eq!(map_env_key("application_name"), "application_name");
    }
}
