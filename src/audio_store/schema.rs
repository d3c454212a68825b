//! SQLite schema for the audio record database.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

pub const AUDIO_TABLE_NAME: &str = "audio";

/// Column names follow the JSON field names so that databases written by
/// earlier deployments of the service open without migration.
const AUDIO_TABLE_V1: Table = Table {
    name: AUDIO_TABLE_NAME,
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_autoincrement = true
        ),
        sqlite_column!("title", &SqlType::Text),
        sqlite_column!("genre", &SqlType::Text),
        sqlite_column!("imageFile", &SqlType::Blob),
        sqlite_column!("audioFile", &SqlType::Blob),
    ],
    indices: &[],
};

pub const AUDIO_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[AUDIO_TABLE_V1],
}];
