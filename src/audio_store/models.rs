use serde::{Deserialize, Serialize};

/// A stored audio entry, as returned by every read path and by create.
///
/// Binary payloads travel as standard base64 strings when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioRecord {
    pub id: i64,
    pub title: String,
    pub genre: String,
    #[serde(with = "base64_bytes")]
    pub image_file: Vec<u8>,
    #[serde(with = "base64_bytes")]
    pub audio_file: Vec<u8>,
}

/// Everything needed to insert a row. The image is already resolved, either
/// uploaded or the fallback.
#[derive(Debug, Clone)]
pub struct NewAudioRecord {
    pub title: String,
    pub genre: String,
    pub image_file: Vec<u8>,
    pub audio_file: Vec<u8>,
}

impl NewAudioRecord {
    pub fn into_record(self, id: i64) -> AudioRecord {
        AudioRecord {
            id,
            title: self.title,
            genre: self.genre,
            image_file: self.image_file,
            audio_file: self.audio_file,
        }
    }
}

/// Partial update. `None` leaves the column untouched; the audio payload has
/// no counterpart here because it is immutable after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioRecordUpdate {
    pub image_file: Option<Vec<u8>>,
    pub title: Option<String>,
    pub genre: Option<String>,
}

impl AudioRecordUpdate {
    pub fn is_empty(&self) -> bool {
        self.image_file.is_none() && self.title.is_none() && self.genre.is_none()
    }
}

pub(crate) mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> AudioRecord {
        AudioRecord {
            id: 7,
            title: "Riff".to_string(),
            genre: "Jazz".to_string(),
            image_file: vec![0xff, 0xd8, 0xff],
            audio_file: b"ID3".to_vec(),
        }
    }

    #[test]
    fn serializes_with_camel_case_and_base64_payloads() {
        let value = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "title": "Riff",
                "genre": "Jazz",
                "imageFile": "/9j/",
                "audioFile": "SUQz",
            })
        );
    }

    #[test]
    fn deserializes_what_it_serializes() {
        let text = serde_json::to_string(&sample_record()).unwrap();
        let parsed: AudioRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, sample_record());
    }

    #[test]
    fn rejects_invalid_base64() {
        let result = serde_json::from_value::<AudioRecord>(json!({
            "id": 1,
            "title": "t",
            "genre": "g",
            "imageFile": "not base64!",
            "audioFile": "",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(AudioRecordUpdate::default().is_empty());
        let update = AudioRecordUpdate {
            genre: Some("Blues".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn new_record_keeps_fields_when_assigned_an_id() {
        let record = NewAudioRecord {
            title: "Riff".to_string(),
            genre: "Jazz".to_string(),
            image_file: vec![1],
            audio_file: vec![2],
        }
        .into_record(3);
        assert_eq!(record.id, 3);
        assert_eq!(record.image_file, vec![1]);
        assert_eq!(record.audio_file, vec![2]);
    }
}
