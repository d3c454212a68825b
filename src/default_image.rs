//! Fallback image attached to records created without one.

use anyhow::{Context, Result};
use axum::body::Bytes;
use std::path::Path;
use tracing::info;

/// The fallback image bytes, loaded once at startup and shared by all requests.
#[derive(Clone, Debug)]
pub struct DefaultImage {
    bytes: Bytes,
}

impl DefaultImage {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read default image at {:?}", path))?;
        info!(
            "Loaded default image from {:?} ({:#})",
            path,
            byte_unit::Byte::from(data.len())
        );
        Ok(Self::from_bytes(data))
    }

    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self { bytes: data.into() }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}
