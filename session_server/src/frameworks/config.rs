use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::schema::SchemaVersion;

// Runtime/server configuration. Environment variables win over the optional
// TOML file, which wins over the defaults below.

pub const CONFIG_PATH_VAR: &str = "SESSION_SERVER_CONFIG";
pub const HOST_VAR: &str = "SESSION_SERVER_HOST";
pub const PORT_VAR: &str = "SESSION_SERVER_PORT";
pub const SCHEMA_VAR: &str = "SESSION_SCHEMA";
pub const STORE_VAR: &str = "SESSION_STORE";
pub const MONGODB_URI_VAR: &str = "MONGODB_URI";
pub const MONGODB_DATABASE_VAR: &str = "MONGODB_DATABASE";
pub const MONGODB_COLLECTION_VAR: &str = "MONGODB_COLLECTION";

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_DATABASE: &str = "StudyBuddyDB";
pub const DEFAULT_COLLECTION: &str = "misc";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("MONGODB_URI must be set when the mongo store is selected")]
    MissingMongoUri,
    #[error("invalid host `{0}`")]
    InvalidHost(String),
    #[error("invalid port `{0}`")]
    InvalidPort(String),
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    #[error("unknown store backend `{0}` (expected `mongo` or `memory`)")]
    InvalidStoreBackend(String),
    #[error("failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    ParseFile(#[from] toml::de::Error),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    #[serde(alias = "mongodb")]
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::InvalidStoreBackend(other.to_string())),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Mongo => write!(f, "mongo"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Mongo {
        uri: String,
        database: String,
        collection: String,
    },
    Memory,
}

impl StoreConfig {
    pub fn backend(&self) -> StoreBackend {
        match self {
            StoreConfig::Mongo { .. } => StoreBackend::Mongo,
            StoreConfig::Memory => StoreBackend::Memory,
        }
    }
}

// Connection strings carry credentials, keep them out of logs.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreConfig::Mongo {
                database,
                collection,
                ..
            } => f
                .debug_struct("Mongo")
                .field("uri", &"<redacted>")
                .field("database", database)
                .field("collection", collection)
                .finish(),
            StoreConfig::Memory => f.write_str("Memory"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub schema: SchemaVersion,
    pub store: StoreConfig,
}

// Shape of the optional TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub schema: Option<SchemaVersion>,
    #[serde(default)]
    pub store: FileStoreConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileStoreConfig {
    pub backend: Option<StoreBackend>,
    pub uri: Option<String>,
    pub database: Option<String>,
    pub collection: Option<String>,
}

impl FileConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

impl ServerConfig {
    // Read the process environment, plus the TOML file it points at if any.
    pub fn from_env() -> Result<Self, ConfigError> {
        let lookup = |key: &str| std::env::var(key).ok();
        let file = match non_empty(lookup(CONFIG_PATH_VAR)) {
            Some(path) => FileConfig::load(Path::new(&path))?,
            None => FileConfig::default(),
        };
        Self::from_sources(file, lookup)
    }

    // Merge file values with variables from `env`. Blank variables count as unset.
    pub fn from_sources<F>(file: FileConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| non_empty(env(key));

        let schema = match var(SCHEMA_VAR) {
            Some(value) => value.parse().map_err(ConfigError::InvalidSchema)?,
            None => file.schema.unwrap_or_default(),
        };

        let host = match var(HOST_VAR).or(file.host) {
            Some(value) => value
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost(value))?,
            None => DEFAULT_HOST,
        };

        let port = match var(PORT_VAR) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => file.port.unwrap_or_else(|| schema.default_port()),
        };

        let backend = match var(STORE_VAR) {
            Some(value) => value.parse()?,
            None => file.store.backend.unwrap_or_default(),
        };

        let store = match backend {
            StoreBackend::Memory => StoreConfig::Memory,
            StoreBackend::Mongo => StoreConfig::Mongo {
                uri: var(MONGODB_URI_VAR)
                    .or(non_empty(file.store.uri))
                    .ok_or(ConfigError::MissingMongoUri)?,
                database: var(MONGODB_DATABASE_VAR)
                    .or(file.store.database)
                    .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
                collection: var(MONGODB_COLLECTION_VAR)
                    .or(file.store.collection)
                    .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            },
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            schema,
            store,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
