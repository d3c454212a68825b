use anyhow::{Context, Result};
use std::time::Duration;

use axum::{extract::State, middleware, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::audio_routes::make_audio_routes;
use super::{log_requests, state::*, ServerConfig};
use crate::default_image::DefaultImage;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: &'static str,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn make_app(
    config: ServerConfig,
    audio_store: GuardedAudioStore,
    default_image: DefaultImage,
) -> Router {
    let state = ServerState::new(config, audio_store, default_image);

    let home_router: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone());

    #[allow(unused_mut)]
    let mut app: Router = home_router.merge(make_audio_routes(state.clone()));

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(super::slowdown_request));
    }
    app.layer(middleware::from_fn_with_state(state, log_requests))
}

/// Serves until `shutdown` is cancelled, then lets in-flight requests finish.
pub async fn run_server(
    config: ServerConfig,
    bind_address: &str,
    audio_store: GuardedAudioStore,
    default_image: DefaultImage,
    shutdown: CancellationToken,
) -> Result<()> {
    let address = format!("{}:{}", bind_address, config.port);
    let app = make_app(config, audio_store, default_image);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}
