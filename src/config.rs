use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(alias = "serviceName", rename = "servicename")]
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(skip)]
    pub debug_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            listen: ListenConfig::default(),
            database: DatabaseConfig::default(),
            debug_logs: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub sqlite: SqliteConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    #[serde(default = "default_db_filename")]
    pub filename: String,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            filename: default_db_filename(),
        }
    }
}

fn default_port() -> String {
    "3000".to_string()
}

fn default_service_name() -> String {
    "movielens".to_string()
}

fn default_db_filename() -> String {
    "movielens.db".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        Ok(config)
    }

    pub fn database_path(&self) -> &str {
        &self.database.sqlite.filename
    }

    /// Returns the certificate and key paths when both are configured.
    pub fn tls_files(&self) -> Option<(&str, &str)> {
        match (&self.listen.tlscert, &self.listen.tlskey) {
            (Some(cert), Some(key)) => Some((cert.as_str(), key.as_str())),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}
