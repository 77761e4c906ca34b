//! Configuration module
//!
//! Environment-driven settings for the HTTP server and the storage backend the
//! pushup pipeline writes to. `.env` files are honoured through `dotenvy`.

use std::env;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 5000;
const MAX_FILE_SIZE_MB: usize = 20;
const REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_REGION: &str = "us-east-1";

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub request_timeout_secs: u64,
    pub log_format: String,
}

/// Storage and upload configuration
#[derive(Clone, Debug)]
pub struct PushupConfig {
    pub base: BaseConfig,
    pub storage_backend: StorageBackend,
    // Absent bucket keeps the server up; /pushup then answers 500.
    pub s3_bucket_name: Option<String>,
    pub s3_region: String,
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    /// URL prefix the local backend's files are served from. Required for
    /// `local`; this service does not serve the files itself.
    pub local_storage_base_url: Option<String>,
    pub max_file_size_bytes: usize,
    pub cleanup_on_failure: bool,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<PushupConfig>);

impl Config {
    fn as_pushup(&self) -> &PushupConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_pushup().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = PushupConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_pushup().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_pushup().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_pushup().base.environment
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.as_pushup().base.request_timeout_secs
    }

    pub fn log_format(&self) -> &str {
        &self.as_pushup().base.log_format
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_pushup().storage_backend
    }

    pub fn s3_bucket_name(&self) -> Option<&str> {
        self.as_pushup().s3_bucket_name.as_deref()
    }

    pub fn s3_region(&self) -> &str {
        &self.as_pushup().s3_region
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_pushup().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_pushup().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.as_pushup().local_storage_base_url.as_deref()
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.as_pushup().max_file_size_bytes
    }

    pub fn cleanup_on_failure(&self) -> bool {
        self.as_pushup().cleanup_on_failure
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| v.trim().to_lowercase())
        .and_then(|v| match v.as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

impl PushupConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(get: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = get("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = match get("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let base = BaseConfig {
            server_port,
            cors_origins,
            environment,
            request_timeout_secs: get("REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(REQUEST_TIMEOUT_SECS)
                .max(1),
            log_format: get("LOG_FORMAT")
                .map(|s| s.trim().to_lowercase())
                .unwrap_or_else(|| "text".to_string()),
        };

        let storage_backend = match get("STORAGE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>()?,
            None => StorageBackend::S3,
        };

        let max_file_size_mb = get("MAX_FILE_SIZE_MB")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);
        let max_file_size_bytes = max_file_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_FILE_SIZE_MB is too large"))?;

        let config = PushupConfig {
            storage_backend,
            s3_bucket_name: get("S3_BUCKET_NAME")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            s3_region: get("S3_REGION")
                .or_else(|| get("AWS_REGION"))
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            s3_endpoint: get("S3_ENDPOINT").filter(|s| !s.trim().is_empty()),
            local_storage_path: get("LOCAL_STORAGE_PATH"),
            local_storage_base_url: get("LOCAL_STORAGE_BASE_URL")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            max_file_size_bytes,
            cleanup_on_failure: parse_bool(get("PUSHUP_CLEANUP_ON_FAILURE"), false),
            base,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage_backend == StorageBackend::Local {
            if self.local_storage_path.is_none() {
                return Err(anyhow::anyhow!(
                    "LOCAL_STORAGE_PATH must be set when STORAGE_BACKEND=local"
                ));
            }
            if self.local_storage_base_url.is_none() {
                return Err(anyhow::anyhow!(
                    "LOCAL_STORAGE_BASE_URL must be set when STORAGE_BACKEND=local"
                ));
            }
        }
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than zero"));
        }
        Ok(())
    }
}
