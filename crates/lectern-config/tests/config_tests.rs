// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Lectern configuration system.

use lectern_config::diagnostic::ConfigError;
use lectern_config::model::LecternConfig;
use lectern_config::{
    load_and_validate_path, load_and_validate_str, load_config_from_path, load_config_from_str,
};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_lectern_config() {
    let toml = r#"
[app]
name = "sanctuary"
log_level = "debug"

[extensions]
modules = ["songs", "bibles"]
manifest_dir = "/srv/lectern/extensions"
disabled = ["images"]
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "sanctuary");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.extensions.modules, vec!["songs", "bibles"]);
    assert_eq!(
        config.extensions.manifest_dir.as_deref(),
        Some("/srv/lectern/extensions")
    );
    assert_eq!(config.extensions.disabled, vec!["images"]);
}

/// An empty file yields the compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").unwrap();
    assert_eq!(config, LecternConfig::default());
}

/// Partially specified sections keep defaults for the rest.
#[test]
fn partial_section_keeps_other_defaults() {
    let config = load_config_from_str("[extensions]\ndisabled = [\"bibles\"]\n").unwrap();
    assert_eq!(config.extensions.modules.len(), 5);
    assert!(config.extensions.is_disabled("bibles"));
    assert_eq!(config.app.log_level, "info");
}

/// Unknown field in [extensions] produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_field_suggests_correction() {
    let toml = r#"
[extensions]
modles = ["songs"]
"#;

    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            valid_keys,
            span,
            ..
        } => {
            assert_eq!(key, "modles");
            assert_eq!(suggestion.as_deref(), Some("modules"));
            assert!(valid_keys.contains("manifest_dir"));
            assert!(span.is_some(), "inline source should be located");
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[theme]\ncolor = \"blue\"\n").unwrap_err();
    assert!(matches!(&errors[0], ConfigError::UnknownKey { key, .. } if key == "theme"));
}

/// A wrongly typed value produces an InvalidType diagnostic.
#[test]
fn wrong_type_produces_invalid_type() {
    let errors = load_and_validate_str("[extensions]\nmodules = \"songs\"\n").unwrap_err();
    match &errors[0] {
        ConfigError::InvalidType { key, .. } => assert_eq!(key, "extensions.modules"),
        other => panic!("expected InvalidType, got {other:?}"),
    }
}

/// Semantic validation runs after successful deserialization.
#[test]
fn validation_errors_are_reported() {
    let toml = r#"
[app]
log_level = "chatty"

[extensions]
modules = ["songs", "songs"]
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// Loading from an explicit path reads that file.
#[test]
fn load_from_path_reads_file() {
    // Inside a jail so env overrides set by other tests cannot interfere.
    figment::Jail::expect_with(|jail| {
        jail.create_file("lectern.toml", "[app]\nname = \"chapel\"\n")?;
        let path = jail.directory().join("lectern.toml");

        let config = load_config_from_path(&path)?;
        assert_eq!(config.app.name, "chapel");

        let validated = load_and_validate_path(&path).map_err(|e| format!("{e:?}"))?;
        assert_eq!(validated, config);
        Ok(())
    });
}

/// A missing explicit config file is an error rather than silent defaults.
#[test]
fn missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let errors = load_and_validate_path(&dir.path().join("absent.toml")).unwrap_err();
    assert!(errors[0].to_string().contains("does not exist"));
}

/// Environment variables override file values through the explicit key map.
#[test]
fn env_overrides_file_values() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "[app]\nlog_level = \"warn\"\n")?;
        jail.set_env("LECTERN_APP_LOG_LEVEL", "trace");
        jail.set_env("LECTERN_EXTENSIONS_MANIFEST_DIR", "/opt/ext");

        let config = load_config_from_path(std::path::Path::new("custom.toml"))
            .map_err(|e| e.to_string())?;
        assert_eq!(config.app.log_level, "trace");
        assert_eq!(config.extensions.manifest_dir.as_deref(), Some("/opt/ext"));
        Ok(())
    });
}
