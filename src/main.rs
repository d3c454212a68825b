use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use audio_record_server::config::{self, DEFAULT_BIND_ADDRESS, DEFAULT_DB_PATH, DEFAULT_IMAGE_PATH};
use audio_record_server::server::{run_server, RequestsLoggingLevel, ServerConfig};
use audio_record_server::{DefaultImage, SqliteAudioStore};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database file holding the audio records.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Image stored for records created without one.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_IMAGE_PATH)]
    pub default_image_path: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = config::DEFAULT_PORT)]
    pub port: u16,

    /// The address to bind to.
    #[clap(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind_address: String,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Maximum accepted request body size, uploads included.
    #[clap(long, default_value_t = config::DEFAULT_MAX_UPLOAD_SIZE_BYTES)]
    pub max_upload_size_bytes: usize,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            db_path: args.db_path.clone(),
            default_image_path: args.default_image_path.clone(),
            port: args.port,
            bind_address: args.bind_address.clone(),
            logging_level: args.logging_level.clone(),
            max_upload_size_bytes: args.max_upload_size_bytes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  db_path: {:?}", app_config.db_path);
    info!("  default_image_path: {:?}", app_config.default_image_path);
    info!("  listen address: {}", app_config.listen_address());

    let default_image = DefaultImage::load(&app_config.default_image_path)?;

    info!("Opening audio database at {:?}...", app_config.db_path);
    let audio_store = Arc::new(SqliteAudioStore::new(&app_config.db_path)?);

    let shutdown_token = CancellationToken::new();
    let ctrl_c_token = shutdown_token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C, initiating graceful shutdown");
                ctrl_c_token.cancel();
            }
            Err(err) => error!("Failed to listen for Ctrl+C: {}", err),
        }
    });

    let result = run_server(
        ServerConfig::from(&app_config),
        &app_config.bind_address,
        audio_store.clone(),
        default_image,
        shutdown_token,
    )
    .await;

    // The router held the other references; this closes the database.
    drop(audio_store);
    info!("Audio database closed");
    result
}
