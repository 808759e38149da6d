use crate::error::{ServerError, ServerResult};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use store::BackendConfig;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Connection string for the contact store (`mongodb://...` or `memory://`)
    #[serde(default)]
    pub mongodb_uri: Option<String>,

    /// Directory holding the prebuilt frontend bundle
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum request body size in KB
    #[serde(default = "default_max_body_size_kb")]
    pub max_body_size_kb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            mongodb_uri: None,
            static_dir: default_static_dir(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            max_body_size_kb: default_max_body_size_kb(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional config file and the environment.
    ///
    /// Fails when no connection string is configured.
    pub fn load() -> ServerResult<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(ServerError::Config(format!("failed to read .env: {err}")));
            }
        }
        Self::load_with(std::env::var("PORT").ok(), std::env::var("MONGODB_URI").ok())
    }

    /// Like [`ServerConfig::load`], with the unprefixed `PORT` and
    /// `MONGODB_URI` values passed in instead of read from the process.
    pub fn load_with(port: Option<String>, mongodb_uri: Option<String>) -> ServerResult<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("phonebook").required(false))
            // Override with prefixed environment variables
            .add_source(config::Environment::with_prefix("PHONEBOOK").separator("__"))
            // The plain deployment variables win
            .set_override_option("port", port)?
            .set_override_option("mongodb_uri", mongodb_uri)?;

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the server cannot start with.
    pub fn validate(&self) -> ServerResult<()> {
        match self.mongodb_uri.as_deref().map(str::trim) {
            Some(uri) if !uri.is_empty() => Ok(()),
            _ => Err(ServerError::Config(
                "MONGODB_URI must be set to a store connection string".to_string(),
            )),
        }
    }

    /// Store backend selected by the connection string.
    pub fn backend_config(&self) -> ServerResult<BackendConfig> {
        self.validate()?;
        let uri = self.mongodb_uri.as_deref().unwrap_or_default();
        BackendConfig::from_uri(uri).map_err(|err| ServerError::Config(err.to_string()))
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_kb * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_static_dir() -> String {
    "dist".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_body_size_kb() -> usize {
    100
}
