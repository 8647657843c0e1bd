use crate::error::{AppError, Result};
use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_PREFIX: &str = "sheet-gateway";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins permitted to call the API with credentials.
    pub allowed_origins: Vec<String>,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    pub fn origin_headers(&self) -> Result<Vec<HeaderValue>> {
        self.allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| {
                    AppError::Config(format!("Invalid allowed origin {:?}: {}", origin, e))
                })
            })
            .collect()
    }
}

impl Config {
    /// Load configuration from an explicit path, or from the XDG config file
    /// when it exists. Without either the built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => Self::load_or_default(Self::find_config_file()),
        }
    }

    fn load_or_default(found: Option<PathBuf>) -> Result<Self> {
        match found {
            Some(path) => Self::read(&path),
            None => Ok(Config::default()),
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        config.validate()?;

        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        if self.server.body_limit == 0 {
            return Err(AppError::Config(
                "server.body_limit must be greater than zero".to_string(),
            ));
        }
        self.server.origin_headers()?;
        Ok(())
    }

    /// Existing config file in any XDG config directory. Never creates
    /// directories.
    fn find_config_file() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX).find_config_file("config.toml")
    }

    /// Get the config file path, creating its directory
    pub fn config_file() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX)
            .place_config_file("config.toml")
            .map_err(|e| AppError::Config(format!("Failed to create config directory: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                allowed_origins: vec!["https://app.example.com".to_string()],
                body_limit: 1024,
            },
        };

        let serialized = toml::to_string(&config).unwrap();
        let deserialized = Config::parse(&serialized).unwrap();

        assert_eq!(config.server.port, deserialized.server.port);
        assert_eq!(
            config.server.allowed_origins,
            deserialized.server.allowed_origins
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[server]\nport = 9000\n").unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.body_limit, DEFAULT_BODY_LIMIT);
        assert_eq!(config.server.allowed_origins.len(), DEFAULT_ALLOWED_ORIGINS.len());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_no_config_file_uses_defaults() {
        let config = Config::load_or_default(None).unwrap();

        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.host, DEFAULT_HOST);
    }

    #[test]
    fn test_found_config_file_is_read() {
        let path = std::env::temp_dir().join(format!(
            "sheet-gateway-config-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[server]\nport = 9100\n").unwrap();

        let config = Config::load_or_default(Some(path.clone()));
        fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap().server.port, 9100);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = Config::load(Some(Path::new("/nonexistent/sheet-gateway/config.toml")));
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = Config::parse("[server]\nbody_limit = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let config = Config::parse("[server]\nallowed_origins = [\"bad\\norigin\"]\n").unwrap();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }
}
