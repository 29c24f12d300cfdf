use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// CSV file with the seed reviews
    pub reviews_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            reviews_path: PathBuf::from("data/reviews.csv"),
        }
    }
}

impl AppConfig {
    /// Load configuration from `CONFIG_PATH` (or `config.toml`), then apply
    /// the `PORT` override.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;

        if let Ok(port) = std::env::var("PORT") {
            config.apply_port(&port)?;
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::parse(&raw).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    fn apply_port(&mut self, port: &str) -> Result<()> {
        self.server.port = port
            .trim()
            .parse()
            .map_err(|e| {
                warn!("Invalid PORT value {:?}: {}", port, e);
                e
            })
            .context("PORT must be a valid TCP port")?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_8000() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.storage.reviews_path, PathBuf::from("data/reviews.csv"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::parse(
            r#"
            [server]
            port = 9090
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.reviews_path, PathBuf::from("data/reviews.csv"));
    }

    #[test]
    fn storage_path_is_read() {
        let config = AppConfig::parse(
            r#"
            [storage]
            reviews_path = "/srv/reviews.csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.reviews_path, PathBuf::from("/srv/reviews.csv"));
    }

    #[test]
    fn port_override() {
        let mut config = AppConfig::default();
        config.apply_port("3000").unwrap();
        assert_eq!(config.server.port, 3000);

        assert!(config.apply_port("not-a-port").is_err());
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = AppConfig::from_file(Path::new("/nonexistent/review-analyzer.toml")).unwrap();
        assert_eq!(config.server.port, 8000);
    }
}
