//! Audio Record Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod audio_store;
pub mod config;
pub mod default_image;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use audio_store::{AudioRecord, AudioStore, SqliteAudioStore};
pub use default_image::DefaultImage;
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
