//! Tests to ensure fatal error messages identify the failing record or resource.
//!
//! The binary prints errors with `{:#}`, which joins the whole cause chain.

use geo_validate::{run_validation, run_with_resolver, Config};
use tempfile::TempDir;

#[path = "helpers.rs"]
mod helpers;

use helpers::{config_for, row, test_resolver, write_input};

#[test]
fn test_resolver_error_names_address_file_and_cause() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_input(temp_dir.path(), "bad_ip.csv", &[row("999.1.1.1", "US")]);

    let err = run_with_resolver(&config_for(vec![input]), test_resolver())
        .expect_err("should fail");
    let msg = format!("{:#}", err);
    assert!(msg.contains("999.1.1.1"), "got: {}", msg);
    assert!(msg.contains("bad_ip.csv"), "got: {}", msg);
    assert!(msg.contains("line 2"), "got: {}", msg);
    assert!(msg.contains("invalid IP address syntax"), "got: {}", msg);
}

#[test]
fn test_malformed_input_names_missing_columns() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("headers.csv");
    std::fs::write(&path, "connection_spec_client_ip\n203.0.113.6\n").expect("write");

    let err =
        run_with_resolver(&config_for(vec![path]), test_resolver()).expect_err("should fail");
    let msg = format!("{:#}", err);
    assert!(msg.contains("headers.csv"), "got: {}", msg);
    assert!(
        msg.contains("connection_spec_client_geolocation_country_code"),
        "got: {}",
        msg
    );
}

#[test]
fn test_unreadable_input_names_path() {
    let config = config_for(vec!["nonexistent/jan.csv".into()]);
    let err = run_with_resolver(&config, test_resolver()).expect_err("should fail");
    let msg = format!("{:#}", err);
    assert!(msg.contains("nonexistent/jan.csv"), "got: {}", msg);
}

#[test]
fn test_invalid_database_names_path_and_reason() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db = temp_dir.path().join("corrupt.mmdb");
    std::fs::write(&db, b"not a database").expect("write");
    let input = write_input(temp_dir.path(), "jan.csv", &[row("203.0.113.6", "JP")]);

    let config = Config {
        inputs: vec![input],
        geoip: db,
        ..Default::default()
    };
    let msg = format!("{:#}", run_validation(&config).expect_err("should fail"));
    assert!(msg.contains("corrupt.mmdb"), "got: {}", msg);
    assert!(msg.contains("Failed to parse database"), "got: {}", msg);
}
