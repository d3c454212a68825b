mod models;
mod schema;
mod sqlite_audio_store;

pub use models::*;
pub use schema::AUDIO_VERSIONED_SCHEMAS;
pub use sqlite_audio_store::SqliteAudioStore;

use anyhow::Result;

/// Row-oriented persistence for audio records. Every method maps to a single
/// SQL statement, so each call is atomic on its own but sequences of calls are not.
pub trait AudioStore: Send + Sync {
    /// All records in store order (insertion order for SQLite).
    fn list_audio(&self) -> Result<Vec<AudioRecord>>;
    fn get_audio(&self, id: i64) -> Result<Option<AudioRecord>>;
    /// Inserts a row and returns the id the store assigned to it.
    fn insert_audio(&self, record: &NewAudioRecord) -> Result<i64>;
    /// Applies the supplied fields only. Returns the number of rows touched,
    /// which is 0 both for an empty update and for an unknown id.
    fn update_audio(&self, id: i64, update: &AudioRecordUpdate) -> Result<usize>;
    /// Returns the number of rows removed (0 or 1).
    fn delete_audio(&self, id: i64) -> Result<usize>;
}
