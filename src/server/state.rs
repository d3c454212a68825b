use axum::extract::FromRef;

use crate::audio_store::AudioStore;
use crate::default_image::DefaultImage;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedAudioStore = Arc<dyn AudioStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub audio_store: GuardedAudioStore,
    pub default_image: DefaultImage,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        audio_store: GuardedAudioStore,
        default_image: DefaultImage,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            audio_store,
            default_image,
        }
    }
}

impl FromRef<ServerState> for GuardedAudioStore {
    fn from_ref(input: &ServerState) -> Self {
        input.audio_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for DefaultImage {
    fn from_ref(input: &ServerState) -> Self {
        input.default_image.clone()
    }
}
