//! Integration tests for CLI config command
//!
//! Tests file I/O operations for the `segroute config` subcommand.
//! Verifies template generation, file loading, and error handling.

use segroute::cli::generate_config_template;
use segroute::config::Config;
use segroute::error::AppError;
use std::fs;
use tempfile::TempDir;

/// Helper to create temporary directory for file operations
fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

// ─────────────────────────────────────────────────────────────────────────────
// Template Content Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_generated_template_creates_valid_config_file() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("config.toml");

    fs::write(&config_path, generate_config_template()).expect("Failed to write template");

    let config =
        Config::from_file(&config_path).expect("Generated template should load as valid Config");

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.metrics.channel_capacity(), 10_000);
    assert_eq!(config.metrics.pool_max_idle(), 1024);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn test_template_file_content_matches_generation() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("config.toml");

    let template = generate_config_template();
    fs::write(&config_path, template).expect("Failed to write template");

    let content = fs::read_to_string(&config_path).expect("Failed to read back");
    assert_eq!(content, template);
}

#[test]
fn test_template_includes_documentation() {
    let template = generate_config_template();

    assert!(template.contains("# "), "Template should have comments");
    assert!(template.contains("segroute"), "Template should have header");
    assert!(
        template.contains("dropped"),
        "Template should document the drop-on-full channel"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// File Loading Error Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_file_reports_read_error() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("absent.toml");

    let err = Config::from_file(&config_path).expect_err("missing file should fail");
    match err {
        AppError::ConfigFileRead { path, source } => {
            assert!(path.ends_with("absent.toml"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected ConfigFileRead, got {:?}", other),
    }
}

#[test]
fn test_malformed_file_reports_parse_error() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(&config_path, "[server\nhost = ").expect("Failed to write file");

    let err = Config::from_file(&config_path).expect_err("malformed file should fail");
    assert!(matches!(err, AppError::ConfigParseFailed { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn test_invalid_values_report_validation_error() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("invalid.toml");
    fs::write(
        &config_path,
        r#"
[server]
host = "localhost"
port = 3000
"#,
    )
    .expect("Failed to write file");

    let err = Config::from_file(&config_path).expect_err("hostname should fail validation");
    match err {
        AppError::ConfigValidationFailed { path, reason } => {
            assert!(path.ends_with("invalid.toml"));
            assert!(reason.contains("server.host"));
        }
        other => panic!("expected ConfigValidationFailed, got {:?}", other),
    }
}

#[test]
fn test_write_to_nonexistent_parent_fails() {
    let temp_dir = create_temp_dir();
    let bad_path = temp_dir.path().join("nonexistent").join("config.toml");

    let result = fs::write(&bad_path, generate_config_template());
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::NotFound);
}
