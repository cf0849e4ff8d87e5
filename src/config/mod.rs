//! Configuration loading and management

use crate::core::error::{ConfigError, DashboardError};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete dashboard configuration
///
/// Every section and field has a default, so an empty document is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,

    /// Absent: the in-memory store is used
    pub database: Option<DatabaseConfig>,

    pub routes: RoutesConfig,

    pub actions: ActionsConfig,

    pub log: LogConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1:3000"
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// SQL store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

/// Paths the actions revalidate and redirect to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Invoice list view; revalidated and redirected to after every mutation
    pub invoices: String,

    /// Where a successful login lands
    pub after_login: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            invoices: "/dashboard/invoices".to_string(),
            after_login: "/dashboard".to_string(),
        }
    }
}

/// Action switches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Run the delete statement instead of failing every delete request
    pub delete_enabled: bool,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, DashboardError> {
        if !Path::new(path).exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DashboardError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::from_yaml_file(path)?),
            None => Ok(Self::default()),
        }
    }

    /// Replace the database URL, keeping the configured pool size
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        let max_connections = self
            .database
            .as_ref()
            .map_or_else(default_max_connections, |db| db.max_connections);
        self.database = Some(DatabaseConfig {
            url: url.into(),
            max_connections,
        });
        self
    }
}
