//! Random slowdown middleware for exercising clients against a sluggish server

use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::IntoResponse;
use rand_distr::{Distribution, Normal};
use std::time::Duration;

/// Delays each request by a gaussian amount of time (mean 1s, standard deviation 2s,
/// clamped at zero).
pub async fn slowdown_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    tokio::time::sleep(random_delay()).await;
    next.run(request).await
}

fn random_delay() -> Duration {
    let delay_ms = Normal::new(1000.0_f64, 2000.0)
        .map(|normal| normal.sample(&mut rand::rng()))
        .unwrap_or(0.0)
        .max(0.0);
    Duration::from_millis(delay_ms as u64)
}
