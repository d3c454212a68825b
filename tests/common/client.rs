//! HTTP client for end-to-end tests
//!
//! Wraps reqwest and provides one method per audio endpoint.

use super::constants::*;
use audio_record_server::AudioRecord;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use std::time::Duration;

/// Builder for the multipart bodies accepted by `POST /audio` and `PUT /audio/{id}`.
#[derive(Default, Clone)]
pub struct AudioForm {
    audio_file: Option<Vec<u8>>,
    image_file: Option<Vec<u8>>,
    title: Option<String>,
    genre: Option<String>,
}

#[allow(dead_code)]
impl AudioForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form that passes create validation
    pub fn complete(title: &str, genre: &str) -> Self {
        Self::new()
            .audio(AUDIO_BYTES)
            .image(IMAGE_BYTES)
            .title(title)
            .genre(genre)
    }

    pub fn audio(mut self, data: &[u8]) -> Self {
        self.audio_file = Some(data.to_vec());
        self
    }

    pub fn image(mut self, data: &[u8]) -> Self {
        self.image_file = Some(data.to_vec());
        self
    }

    pub fn without_image(mut self) -> Self {
        self.image_file = None;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn genre(mut self, genre: &str) -> Self {
        self.genre = Some(genre.to_string());
        self
    }

    fn into_form(self) -> Form {
        let mut form = Form::new();
        if let Some(data) = self.audio_file {
            form = form.part(
                "audioFile",
                Part::bytes(data)
                    .file_name("track.mp3")
                    .mime_str("audio/mpeg")
                    .expect("valid mime"),
            );
        }
        if let Some(data) = self.image_file {
            form = form.part(
                "imageFile",
                Part::bytes(data)
                    .file_name("cover.png")
                    .mime_str("image/png")
                    .expect("valid mime"),
            );
        }
        if let Some(title) = self.title {
            form = form.text("title", title);
        }
        if let Some(genre) = self.genre {
            form = form.text("genre", genre);
        }
        form
    }
}

/// HTTP test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    #[allow(dead_code)]
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET /audio
    pub async fn list_audio(&self) -> Response {
        self.client
            .get(format!("{}/audio", self.base_url))
            .send()
            .await
            .expect("List audio request failed")
    }

    /// GET /audio/{id}
    pub async fn get_audio(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/audio/{}", self.base_url, id))
            .send()
            .await
            .expect("Get audio request failed")
    }

    /// POST /audio
    pub async fn create_audio(&self, form: AudioForm) -> Response {
        self.client
            .post(format!("{}/audio", self.base_url))
            .multipart(form.into_form())
            .send()
            .await
            .expect("Create audio request failed")
    }

    /// PUT /audio/{id}
    pub async fn update_audio(&self, id: &str, form: AudioForm) -> Response {
        self.client
            .put(format!("{}/audio/{}", self.base_url, id))
            .multipart(form.into_form())
            .send()
            .await
            .expect("Update audio request failed")
    }

    /// DELETE /audio/{id}
    pub async fn delete_audio(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/audio/{}", self.base_url, id))
            .send()
            .await
            .expect("Delete audio request failed")
    }

    /// Creates a record and returns it, asserting success.
    pub async fn create_record(&self, form: AudioForm) -> AudioRecord {
        let response = self.create_audio(form).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "Record creation failed"
        );
        response.json().await.expect("Invalid record JSON")
    }
}
