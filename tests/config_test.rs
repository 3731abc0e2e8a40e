//! Tests for config module

use sonar_opendata::config::{Credentials, Settings};
use sonar_opendata::errors::AppError;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_connector_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("connector.toml");

    let config_content = r#"
[Rapid7]
"rapid7.auth_url" = "https://rapid7ipimseu.okta-emea.com/api/v1/authn"
"rapid7.username" = "analyst@example.com"
"rapid7.password" = "correct horse"
"rapid7.request_timeout_secs" = 20

[PassiveTotal]
"passivetotal.username" = "someone"
"#;

    fs::write(&config_path, config_content).unwrap();

    let settings = Settings::from_toml_file(&config_path).unwrap();
    let credentials = Credentials::from_settings(&settings);

    assert_eq!(
        credentials.auth_url,
        "https://rapid7ipimseu.okta-emea.com/api/v1/authn"
    );
    assert_eq!(credentials.username, "analyst@example.com");
    assert_eq!(credentials.password, "correct horse");
    assert!(credentials.validate().is_ok());
    assert_eq!(settings.request_timeout(), Duration::from_secs(20));
}

#[test]
fn test_config_without_rapid7_section() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("connector.toml");

    fs::write(&config_path, "[Other]\nkey = \"value\"\n").unwrap();

    let settings = Settings::from_toml_file(&config_path).unwrap();
    let credentials = Credentials::from_settings(&settings);

    assert_eq!(credentials, Credentials::new("", "", ""));
    assert!(credentials.validate().is_err());
    assert_eq!(settings.request_timeout(), Duration::from_secs(60));
}

#[test]
fn test_config_missing_username_is_invalid() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("connector.toml");

    fs::write(
        &config_path,
        "[Rapid7]\n\"rapid7.auth_url\" = \"https://idp.example.com/api/v1/authn\"\n",
    )
    .unwrap();

    let settings = Settings::from_toml_file(&config_path).unwrap();
    let credentials = Credentials::from_settings(&settings);
    assert!(credentials.validate().is_err());
}

#[test]
fn test_config_invalid_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("connector.toml");

    fs::write(&config_path, "[Rapid7\n\"rapid7.username\" = \"x\"\n").unwrap();

    assert!(Settings::from_toml_file(&config_path).is_err());
}

#[test]
fn test_config_nonexistent_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = Settings::from_toml_file(&temp_dir.path().join("nonexistent.toml"));
    assert!(result.is_err());
}

#[test]
fn test_ini_style_connector_config_must_be_converted() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("connector.toml");

    fs::write(
        &config_path,
        "[Rapid7]\nrapid7.auth_url = https://rapid7ipimseu.okta-emea.com/api/v1/authn\n",
    )
    .unwrap();
    assert!(matches!(
        Settings::from_toml_file(&config_path),
        Err(AppError::ParseError(_))
    ));

    fs::write(
        &config_path,
        "[Rapid7]\n\"rapid7.auth_url\" = \"https://rapid7ipimseu.okta-emea.com/api/v1/authn\"\n",
    )
    .unwrap();
    let settings = Settings::from_toml_file(&config_path).unwrap();
    assert_eq!(
        Credentials::from_settings(&settings).auth_url,
        "https://rapid7ipimseu.okta-emea.com/api/v1/authn"
    );
}
