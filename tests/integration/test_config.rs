//! Configuration file loading tests.

use std::io::Write;

use askql::config::{Config, SALES_URL_ENV, UNIVERSITY_URL_ENV};
use askql::error::{AskqlError, ConfigError};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_file() {
    let file = write_config(
        r#"
[server]
host = "0.0.0.0"
port = 8080
enable_cors = false

[university]
url = "mysql://reader:secret@db:3306/University"
max_connections = 2

[sales]
url = "mysql://reader:secret@db:3306/Sales"

[query]
default_limit = 50
"#,
    );

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
    assert!(!config.server.enable_cors);
    assert_eq!(config.university.max_connections, 2);
    assert_eq!(config.sales.max_connections, 5);
    assert_eq!(config.sales.acquire_timeout_secs, 10);
    assert_eq!(config.query.default_limit, 50);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config("[server]\nport = 9000\n");

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert!(config.university.url.ends_with("/University"));
    assert!(config.sales.url.ends_with("/Sales"));
}

#[test]
fn test_section_without_url_is_rejected() {
    let file = write_config("[sales]\nmax_connections = 3\n");

    let mut config = Config::from_file(file.path()).unwrap();
    let err = config.apply_overrides_from(|_| None).unwrap_err();
    assert!(matches!(
        err,
        AskqlError::Config(ConfigError::MissingField(ref field)) if field == "sales.url"
    ));
}

#[test]
fn test_section_url_supplied_by_environment() {
    let file = write_config("[university]\nmax_connections = 10\n");

    let mut config = Config::from_file(file.path()).unwrap();
    config
        .apply_overrides_from(|key| {
            (key == UNIVERSITY_URL_ENV).then(|| "mysql://env:3306/University".to_string())
        })
        .unwrap();

    assert_eq!(config.university.url, "mysql://env:3306/University");
    assert_eq!(config.university.max_connections, 10);
}

#[test]
fn test_malformed_file() {
    let file = write_config("[server\nport = ");

    let err = Config::from_file(file.path()).unwrap_err();
    assert!(matches!(err, AskqlError::Config(ConfigError::Parse(_))));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, AskqlError::Config(ConfigError::ReadFile(_))));
}

#[test]
fn test_overrides_after_file() {
    let file = write_config("[university]\nurl = \"mysql://file/University\"\n");
    let mut config = Config::from_file(file.path()).unwrap();

    config
        .apply_overrides_from(|key| match key {
            k if k == UNIVERSITY_URL_ENV => Some("mysql://env/University".to_string()),
            k if k == SALES_URL_ENV => None,
            _ => None,
        })
        .unwrap();

    assert_eq!(config.university.url, "mysql://env/University");
    assert!(config.sales.url.ends_with("/Sales"));
}
