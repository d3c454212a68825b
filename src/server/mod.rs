mod audio_routes;
pub mod config;
mod error;
mod http_layers;
pub mod server;
pub mod state;
mod upload;

pub use audio_routes::{parse_record_id, DELETE_SUCCESS_MESSAGE};
pub use config::ServerConfig;
pub use error::{AudioApiError, ErrorResponse, MessageResponse};
pub use http_layers::*;
pub use server::{make_app, run_server};
pub use upload::AudioUpload;
