//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;

/// Which document store backs the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Google Cloud Firestore in the given project
    Firestore { project_id: String },
    /// Process-local store; data is lost on exit
    Memory,
}

impl StoreBackend {
    /// Parse a connection string: `firestore://<project-id>` or `memory://`.
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();

        if let Some(project_id) = url.strip_prefix("firestore://") {
            let project_id = project_id.trim_end_matches('/');
            if project_id.is_empty() {
                return Err(ConfigError::Invalid {
                    var: "DATABASE_URL",
                    reason: "firestore URL is missing a project id".to_string(),
                });
            }
            return Ok(StoreBackend::Firestore {
                project_id: project_id.to_string(),
            });
        }

        if url == "memory://" || url == "memory" {
            return Ok(StoreBackend::Memory);
        }

        Err(ConfigError::Invalid {
            var: "DATABASE_URL",
            reason: format!("unsupported connection string '{}'", url),
        })
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Document store selected by `DATABASE_URL`
    pub store: StoreBackend,
    /// Server port
    pub port: u16,
    /// Directory of static assets served at the root
    pub public_dir: PathBuf,
    /// Index page served at `/`
    pub index_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                reason: format!("'{}' is not a valid port", raw),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            store: StoreBackend::from_url(&database_url)?,
            port,
            public_dir: env::var("PUBLIC_DIR")
                .unwrap_or_else(|_| "public".to_string())
                .into(),
            index_file: env::var("INDEX_FILE")
                .unwrap_or_else(|_| "views/index.html".to_string())
                .into(),
        })
    }

    /// In-memory configuration for tests, with assets resolved from the crate root.
    pub fn test_default() -> Self {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        Self {
            store: StoreBackend::Memory,
            port: DEFAULT_PORT,
            public_dir: root.join("public"),
            index_file: root.join("views/index.html"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}
