//! Tests for loading the dashboard configuration from YAML files

use invoices::config::DashboardConfig;
use invoices::core::error::{ConfigError, DashboardError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_full_config_file() {
    let file = write_config(
        r#"
server:
  bind: "0.0.0.0:8080"
database:
  url: "mysql://root@localhost:3306/invoices"
  max_connections: 10
routes:
  invoices: "/app/invoices"
  after_login: "/app"
actions:
  delete_enabled: true
log:
  filter: "invoices=debug,tower_http=info"
"#,
    );

    let config = DashboardConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.server.bind, "0.0.0.0:8080");
    let db = config.database.as_ref().unwrap();
    assert_eq!(db.url, "mysql://root@localhost:3306/invoices");
    assert_eq!(db.max_connections, 10);
    assert_eq!(config.routes.invoices, "/app/invoices");
    assert_eq!(config.routes.after_login, "/app");
    assert!(config.actions.delete_enabled);
    assert_eq!(config.log.filter, "invoices=debug,tower_http=info");
}

#[test]
fn test_load_partial_config_keeps_defaults() {
    let file = write_config("actions:\n  delete_enabled: true\n");

    let config = DashboardConfig::load(Some(file.path().to_str().unwrap())).unwrap();

    assert!(config.actions.delete_enabled);
    assert_eq!(config.server.bind, "127.0.0.1:3000");
    assert_eq!(config.routes.invoices, "/dashboard/invoices");
    assert!(config.database.is_none());
}

#[test]
fn test_load_without_path_is_default() {
    let config = DashboardConfig::load(None).unwrap();
    assert_eq!(config, DashboardConfig::default());
}

#[test]
fn test_malformed_file_reports_path() {
    let file = write_config("server: [unclosed\n");
    let path = file.path().to_str().unwrap().to_string();

    let err = DashboardConfig::from_yaml_file(&path).unwrap_err();

    match err {
        DashboardError::Config(ConfigError::ParseError { file, .. }) => {
            assert_eq!(file.as_deref(), Some(path.as_str()));
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_database_url_override_keeps_pool_size() {
    let file = write_config("database:\n  url: mysql://a/b\n  max_connections: 12\n");

    let config = DashboardConfig::load(Some(file.path().to_str().unwrap()))
        .unwrap()
        .with_database_url("mysql://c/d");

    let db = config.database.unwrap();
    assert_eq!(db.url, "mysql://c/d");
    assert_eq!(db.max_connections, 12);
}
