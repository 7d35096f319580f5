//! Main application configuration
//!
//! This module defines the configuration structures for the scrabble-words
//! service, including environment variable and TOML file loading and
//! validation.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Port used when `HOST` does not carry one
pub const DEFAULT_DATABASE_PORT: u16 = 3306;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub database: DatabaseSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and health reports
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Port for the word and health endpoints
    pub http_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
}

/// Word store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: String,
    /// `host` or `host:port`
    pub host: String,
    pub database: String,
    /// Connection attempt timeout in seconds
    pub connect_timeout_seconds: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "scrabble-words".to_string(),
            log_level: "info".to_string(),
            bind_address: "0.0.0.0".to_string(),
            http_port: 8080,
            shutdown_timeout_seconds: 30,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            user: "root".to_string(),
            password: String::new(),
            host: "localhost:3306".to_string(),
            database: "scrabble".to_string(),
            connect_timeout_seconds: 5,
        }
    }
}

impl DatabaseSettings {
    /// Connection address in `user:pass@host/database` form
    pub fn address(&self) -> String {
        format!(
            "{}:{}@{}/{}",
            self.user, self.password, self.host, self.database
        )
    }

    /// Same as [`address`](Self::address) with the password masked
    pub fn redacted_address(&self) -> String {
        let password = if self.password.is_empty() { "" } else { "****" };
        format!("{}:{}@{}/{}", self.user, password, self.host, self.database)
    }

    /// Split `host` into hostname and port
    pub fn host_and_port(&self) -> Result<(String, u16)> {
        match self.host.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse()
                    .map_err(|_| anyhow!("Invalid database port in HOST: {}", self.host))?;
                Ok((host.to_string(), port))
            }
            None => Ok((self.host.clone(), DEFAULT_DATABASE_PORT)),
        }
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(bind_address) = env::var("BIND_ADDRESS") {
            config.service.bind_address = bind_address;
        }
        if let Ok(port) = env::var("HTTP_PORT") {
            config.service.http_port = port
                .parse()
                .map_err(|_| anyhow!("Invalid HTTP_PORT value: {}", port))?;
        }
        if let Ok(timeout) = env::var("SHUTDOWN_TIMEOUT_SECONDS") {
            config.service.shutdown_timeout_seconds = timeout
                .parse()
                .map_err(|_| anyhow!("Invalid SHUTDOWN_TIMEOUT_SECONDS value: {}", timeout))?;
        }

        // Database settings
        if let Ok(user) = env::var("USER") {
            config.database.user = user;
        }
        if let Ok(password) = env::var("PASS") {
            config.database.password = password;
        }
        if let Ok(host) = env::var("HOST") {
            config.database.host = host;
        }
        if let Ok(database) = env::var("DB") {
            config.database.database = database;
        }
        if let Ok(timeout) = env::var("DB_CONNECT_TIMEOUT_SECONDS") {
            config.database.connect_timeout_seconds = timeout
                .parse()
                .map_err(|_| anyhow!("Invalid DB_CONNECT_TIMEOUT_SECONDS value: {}", timeout))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents).context("Invalid TOML configuration")?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.service.shutdown_timeout_seconds)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.http_port == 0 {
        return Err(anyhow!("HTTP port cannot be 0"));
    }
    if config.service.bind_address.is_empty() {
        return Err(anyhow!("Bind address cannot be empty"));
    }
    if config.service.shutdown_timeout_seconds == 0 {
        return Err(anyhow!("Shutdown timeout must be greater than 0"));
    }

    // Validate database settings
    if config.database.host.is_empty() {
        return Err(anyhow!("Database host cannot be empty"));
    }
    if config.database.database.is_empty() {
        return Err(anyhow!("Database name cannot be empty"));
    }
    if config.database.connect_timeout_seconds == 0 {
        return Err(anyhow!("Database connect timeout must be greater than 0"));
    }
    config.database.host_and_port()?;

    Ok(())
}
