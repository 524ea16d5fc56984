// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as known log levels and unique module ids.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::LecternConfig;

/// Log levels accepted by `app.log_level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LecternConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.app.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` is not one of {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.app.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "app.name must not be empty".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (i, id) in config.extensions.modules.iter().enumerate() {
        if id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("extensions.modules[{i}] must not be empty"),
            });
        } else if !seen.insert(id.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate module id `{id}` in extensions.modules"),
            });
        }
    }

    for (i, id) in config.extensions.disabled.iter().enumerate() {
        if id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("extensions.disabled[{i}] must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
