use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Prefix of every environment variable read by the service
pub const ENV_PREFIX: &str = "OUTLETFOOD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_storage_backend")]
    pub storage_backend: String,
    #[serde(default = "default_foods_table")]
    pub foods_table_name: String,
    #[serde(default = "default_add_ons_table")]
    pub add_ons_table_name: String,
    #[serde(default = "default_outlets_table")]
    pub outlets_table_name: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Endpoint override, e.g. DynamoDB Local
    #[serde(default)]
    pub dynamodb_endpoint: Option<String>,
    #[serde(default)]
    pub auto_create_tables: bool,
    /// Require a food's outlet to exist on create and update
    #[serde(default)]
    pub validate_outlet_reference: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_service_version")]
    pub service_version: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub enable_json_logging: bool,
}

/// Where entities are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    DynamoDb,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dynamodb" => Ok(StorageBackend::DynamoDb),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::ValidationError {
                message: format!("Unknown storage backend: {}", other),
            }),
        }
    }
}

/// Deserialize one configuration section from the prefixed environment
fn load_section<T: DeserializeOwned>(
    source: config::Environment,
    section: &str,
) -> Result<T, ConfigError> {
    let settings = config::Config::builder()
        .add_source(source)
        .build()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to load {} config: {}", section, e),
        })?;

    settings
        .try_deserialize()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to deserialize {} config: {}", section, e),
        })
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
}

impl Config {
    pub fn from_environment() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment");

        let config = Config {
            server: load_section(environment(), "server")?,
            database: load_section(environment(), "database")?,
            observability: load_section(environment(), "observability")?,
        };

        config.validate()?;

        info!("Configuration loaded successfully");
        debug!("Configuration: {:?}", config);

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Request timeout cannot be 0".to_string(),
            });
        }

        let tables = [
            ("Foods", &self.database.foods_table_name),
            ("Add-ons", &self.database.add_ons_table_name),
            ("Outlets", &self.database.outlets_table_name),
        ];
        for (label, name) in tables {
            if name.is_empty() {
                return Err(ConfigError::ValidationError {
                    message: format!("{} table name cannot be empty", label),
                });
            }
        }

        self.database.backend()?;
        Ok(())
    }

    /// OTLP collector endpoint, empty when unset
    pub fn otlp_endpoint(&self) -> &str {
        self.observability.otlp_endpoint.as_deref().unwrap_or("")
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl DatabaseConfig {
    pub fn backend(&self) -> Result<StorageBackend, ConfigError> {
        self.storage_backend.parse()
    }

    /// Build a DynamoDB client for the configured region and endpoint
    pub async fn dynamodb_client(&self) -> DynamoDbClient {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(self.region.clone()));

        if let Some(endpoint) = &self.dynamodb_endpoint {
            info!("Using DynamoDB endpoint override: {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        }

        DynamoDbClient::new(&loader.load().await)
    }
}

// Default value functions
pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    8080
}

pub(crate) fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_max_request_size() -> usize {
    1024 * 1024 // 1MB
}

pub(crate) fn default_storage_backend() -> String {
    "dynamodb".to_string()
}

pub(crate) fn default_foods_table() -> String {
    "Foods".to_string()
}

pub(crate) fn default_add_ons_table() -> String {
    "AddOns".to_string()
}

pub(crate) fn default_outlets_table() -> String {
    "Outlets".to_string()
}

pub(crate) fn default_region() -> String {
    "us-west-2".to_string()
}

pub(crate) fn default_service_name() -> String {
    "outlet-food-rs".to_string()
}

pub(crate) fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests;
