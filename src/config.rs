//! Configuration module
//!
//! Loaded from a TOML file (default `~/.config/dashboard-admin/config.toml`).
//! Every section and field is optional and falls back to [`Default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::DatabaseConfig;
use crate::shared::{PagingPolicy, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "DASHBOARD_ADMIN_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Default config path: `<config dir>/dashboard-admin/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dashboard-admin")
        .join("config.toml")
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub pagination: PaginationConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds allowed for in-flight requests after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9095,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    Postgres,
    /// Process-local, lost on restart
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub backend: StorageBackend,
    pub url: String,
    pub sqlx_logging: bool,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            backend: StorageBackend::Sqlite,
            url: defaults.url,
            sqlx_logging: defaults.sqlx_logging,
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> &str {
        &self.url
    }

    pub fn is_sql(&self) -> bool {
        self.backend != StorageBackend::Memory
    }

    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            sqlx_logging: self.sqlx_logging,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    /// `plain` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "plain".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl From<&PaginationConfig> for PagingPolicy {
    fn from(cfg: &PaginationConfig) -> Self {
        PagingPolicy {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size,
        }
    }
}

/// Account created when the user table is empty at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub seed: bool,
    pub user_name: String,
    pub password: String,
    pub role: i32,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            seed: true,
            user_name: "admin".to_string(),
            password: "123456".to_string(),
            role: 1,
        }
    }
}

impl AppConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let paging = &self.pagination;
        if paging.default_page_size == 0 || paging.max_page_size == 0 {
            return Err(ConfigError::Invalid(
                "pagination page sizes must be positive".into(),
            ));
        }
        if paging.default_page_size > paging.max_page_size {
            return Err(ConfigError::Invalid(format!(
                "pagination.default_page_size ({}) exceeds max_page_size ({})",
                paging.default_page_size, paging.max_page_size
            )));
        }
        if self.database.is_sql() && self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must be set".into()));
        }
        if self.admin.seed && self.admin.user_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "admin.user_name must be set when admin.seed is enabled".into(),
            ));
        }
        Ok(())
    }

    pub fn paging_policy(&self) -> PagingPolicy {
        PagingPolicy::from(&self.pagination)
    }
}
