//! Audio record HTTP routes.
//!
//! - `GET /audio` lists every record
//! - `GET /audio/{id}` fetches one
//! - `POST /audio` creates one from a multipart upload
//! - `PUT /audio/{id}` replaces title, genre and/or image
//! - `DELETE /audio/{id}` removes one

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Path, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, info};

use super::error::{AudioApiError, MessageResponse};
use super::state::{GuardedAudioStore, ServerState};
use super::upload::AudioUpload;
use crate::audio_store::{AudioRecord, AudioRecordUpdate, AudioStore, NewAudioRecord};
use crate::default_image::DefaultImage;

pub const DELETE_SUCCESS_MESSAGE: &str = "Audio entry deleted successfully";

/// Accepts anything that reads as a number, provided the number is a whole
/// value above zero, so `"7"`, `" 7 "`, `"7.0"` and `"7e0"` all name record 7.
pub fn parse_record_id(raw: &str) -> Result<i64, AudioApiError> {
    let token = raw.trim();
    if let Ok(id) = token.parse::<i64>() {
        return if id > 0 {
            Ok(id)
        } else {
            Err(AudioApiError::InvalidIdentifier)
        };
    }

    // Forms like "7.0" or "1e2" only.
    let number: f64 = token
        .parse()
        .map_err(|_| AudioApiError::InvalidIdentifier)?;
    if !number.is_finite() || number.fract() != 0.0 || number <= 0.0 || number >= i64::MAX as f64
    {
        return Err(AudioApiError::InvalidIdentifier);
    }
    Ok(number as i64)
}

/// Runs a store call on the blocking pool so the request task never holds the
/// runtime while SQLite works.
async fn with_store<T, F>(store: &GuardedAudioStore, operation: F) -> Result<T, AudioApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn AudioStore) -> anyhow::Result<T> + Send + 'static,
{
    let store = store.clone();
    let result = tokio::task::spawn_blocking(move || operation(store.as_ref()))
        .await
        .map_err(|err| AudioApiError::StorageFailure(format!("Storage task failed: {}", err)))?;
    Ok(result?)
}

/// Create-time validation. The order of the checks decides which error a
/// request with several problems gets.
pub fn validate_new_record(
    upload: AudioUpload,
    default_image: &DefaultImage,
) -> Result<NewAudioRecord, AudioApiError> {
    let audio_file = upload.audio_file.ok_or(AudioApiError::MissingAudio)?;
    let title = upload.title.ok_or(AudioApiError::MissingTitle)?;
    let genre = upload.genre.ok_or(AudioApiError::MissingGenre)?;
    let image_file = match upload.image_file {
        Some(image_file) => image_file,
        None => {
            debug!("No image supplied, using default image");
            default_image.to_vec()
        }
    };
    Ok(NewAudioRecord {
        title,
        genre,
        image_file,
        audio_file,
    })
}

async fn list_audio(
    State(store): State<GuardedAudioStore>,
) -> Result<Json<Vec<AudioRecord>>, AudioApiError> {
    let records = with_store(&store, |store| store.list_audio()).await?;
    Ok(Json(records))
}

async fn get_audio(
    State(store): State<GuardedAudioStore>,
    Path(id): Path<String>,
) -> Result<Json<AudioRecord>, AudioApiError> {
    let id = parse_record_id(&id)?;
    with_store(&store, move |store| store.get_audio(id))
        .await?
        .map(Json)
        .ok_or(AudioApiError::NotFound)
}

async fn create_audio(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AudioRecord>, AudioApiError> {
    let upload = AudioUpload::extract(multipart).await?;
    let new_record = validate_new_record(upload, &state.default_image)?;

    let (id, new_record) = with_store(&state.audio_store, move |store| {
        let id = store.insert_audio(&new_record)?;
        Ok((id, new_record))
    })
    .await?;

    info!("Created audio entry {} ({:?})", id, new_record.title);
    Ok(Json(new_record.into_record(id)))
}

async fn update_audio(
    State(store): State<GuardedAudioStore>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AudioRecord>, AudioApiError> {
    let id = parse_record_id(&id)?;
    let upload = AudioUpload::extract(multipart).await?;
    let update = AudioRecordUpdate {
        image_file: upload.image_file,
        title: upload.title,
        genre: upload.genre,
    };

    if update.is_empty() {
        debug!("Nothing to update for audio entry {}", id);
    } else {
        let changed = with_store(&store, move |store| store.update_audio(id, &update)).await?;
        debug!("Updated {} row(s) for audio entry {}", changed, id);
    }

    // An unknown id only shows up here: the update above touches zero rows
    // without complaint.
    with_store(&store, move |store| store.get_audio(id))
        .await?
        .map(Json)
        .ok_or(AudioApiError::NotFound)
}

async fn delete_audio(
    State(store): State<GuardedAudioStore>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AudioApiError> {
    let id = parse_record_id(&id)?;
    let deleted = with_store(&store, move |store| store.delete_audio(id)).await?;
    if deleted > 0 {
        info!("Deleted audio entry {}", id);
    } else {
        debug!("Delete of unknown audio entry {} ignored", id);
    }
    Ok(Json(MessageResponse {
        message: DELETE_SUCCESS_MESSAGE.to_string(),
    }))
}

pub fn make_audio_routes(state: ServerState) -> Router {
    let max_upload_size_bytes = state.config.max_upload_size_bytes;
    Router::new()
        .route("/audio", get(list_audio).post(create_audio))
        .route(
            "/audio/{id}",
            get(get_audio).put(update_audio).delete(delete_audio),
        )
        .layer(DefaultBodyLimit::max(max_upload_size_bytes))
        .with_state(state)
}
