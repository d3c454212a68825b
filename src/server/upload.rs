//! Turns a multipart request into in-memory buffers before any route logic runs.

use axum::extract::{multipart::MultipartRejection, Multipart};
use tracing::{debug, warn};

use super::error::AudioApiError;

pub const AUDIO_FILE_FIELD: &str = "audioFile";
pub const IMAGE_FILE_FIELD: &str = "imageFile";
pub const TITLE_FIELD: &str = "title";
pub const GENRE_FIELD: &str = "genre";

/// The named parts of an audio upload.
///
/// A file slot is filled only by a part that carries a filename, and a zero-byte
/// file still counts as supplied. Text values are `None` when absent or empty.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AudioUpload {
    pub audio_file: Option<Vec<u8>>,
    pub image_file: Option<Vec<u8>>,
    pub title: Option<String>,
    pub genre: Option<String>,
}

impl AudioUpload {
    /// Reads every part of the request. A request that is not multipart at all
    /// yields an empty upload. Only the first part of each known name is kept.
    pub async fn extract(
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Self, AudioApiError> {
        let mut multipart = match multipart {
            Ok(multipart) => multipart,
            Err(rejection) => {
                debug!("Request carries no multipart body: {}", rejection);
                return Ok(Self::default());
            }
        };

        let mut upload = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().unwrap_or("").to_string();
            match field_name.as_str() {
                AUDIO_FILE_FIELD | IMAGE_FILE_FIELD => {
                    if field.file_name().is_none() {
                        debug!("Ignoring {} part sent without a filename", field_name);
                        continue;
                    }
                    let data = field.bytes().await?;
                    let slot = if field_name == AUDIO_FILE_FIELD {
                        &mut upload.audio_file
                    } else {
                        &mut upload.image_file
                    };
                    if slot.is_some() {
                        warn!("Ignoring repeated {} part", field_name);
                    } else {
                        *slot = Some(data.to_vec());
                    }
                }
                TITLE_FIELD | GENRE_FIELD => {
                    let text = field.text().await?;
                    let slot = if field_name == TITLE_FIELD {
                        &mut upload.title
                    } else {
                        &mut upload.genre
                    };
                    if slot.is_none() {
                        *slot = non_empty_text(text);
                    }
                }
                other => {
                    debug!("Skipping unknown multipart field {:?}", other);
                }
            }
        }
        Ok(upload)
    }
}

fn non_empty_text(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
