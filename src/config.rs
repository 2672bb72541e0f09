//! Server configuration from environment variables (a `.env` file is honoured).

use crate::error::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_FILE_PATH: &str = "file.json";
pub const DEFAULT_SCHEMA: &str = "hbnb";

/// Which storage backend to run against, with its settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File { path: PathBuf },
    Database { url: String, schema: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get("HBNB_API_HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = match get("HBNB_API_PORT") {
            Some(p) => p.parse().map_err(|_| ConfigError::InvalidPort(p))?,
            None => DEFAULT_PORT,
        };

        let backend = match get("HBNB_TYPE_STORAGE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("memory") => StorageBackend::Memory,
            Some("file") => StorageBackend::File {
                path: get("HBNB_FILE_PATH")
                    .unwrap_or_else(|| DEFAULT_FILE_PATH.into())
                    .into(),
            },
            Some("db") => StorageBackend::Database {
                url: get("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?,
                schema: get("HBNB_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into()),
            },
            Some(other) => return Err(ConfigError::InvalidBackend(other.to_string())),
        };

        Ok(ServerConfig {
            host,
            port,
            storage: StorageConfig { backend },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
