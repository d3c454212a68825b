mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "app.db";
pub const DEFAULT_IMAGE_PATH: &str = "assets/default-image.jpg";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 100 * 1024 * 1024;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub default_image_path: PathBuf,
    pub port: u16,
    pub bind_address: String,
    pub logging_level: RequestsLoggingLevel,
    pub max_upload_size_bytes: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            default_image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            logging_level: RequestsLoggingLevel::default(),
            max_upload_size_bytes: DEFAULT_MAX_UPLOAD_SIZE_BYTES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub default_image_path: PathBuf,
    pub port: u16,
    pub bind_address: String,
    pub logging_level: RequestsLoggingLevel,
    pub max_upload_size_bytes: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.db_path.clone());
        if db_path.is_dir() {
            bail!("db_path points to a directory: {:?}", db_path);
        }

        let default_image_path = file
            .default_image_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.default_image_path.clone());

        let logging_level = match file.logging_level {
            Some(s) => match parse_logging_level(&s) {
                Some(level) => level,
                None => bail!("Invalid logging_level in config file: {}", s),
            },
            None => cli.logging_level.clone(),
        };

        let max_upload_size_bytes = file
            .max_upload_size_bytes
            .unwrap_or(cli.max_upload_size_bytes);
        if max_upload_size_bytes == 0 {
            bail!("max_upload_size_bytes must be greater than zero");
        }

        Ok(Self {
            db_path,
            default_image_path,
            port: file.port.unwrap_or(cli.port),
            bind_address: file
                .bind_address
                .unwrap_or_else(|| cli.bind_address.clone()),
            logging_level,
            max_upload_size_bytes,
        })
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
