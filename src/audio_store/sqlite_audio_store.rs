use super::models::{AudioRecord, AudioRecordUpdate, NewAudioRecord};
use super::schema::{AUDIO_TABLE_NAME, AUDIO_VERSIONED_SCHEMAS};
use super::AudioStore;
use crate::sqlite_persistence::{read_schema_version, VersionedSchema};
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, params_from_iter, types::ToSql, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

const SELECT_AUDIO_COLUMNS: &str = "SELECT id, title, genre, imageFile, audioFile FROM audio";

pub struct SqliteAudioStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAudioStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        if !path.exists() {
            info!("Creating new audio database at {:?}", path);
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open audio database at {:?}", path))?;
        Self::prepare_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::prepare_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn latest_schema() -> &'static VersionedSchema {
        &AUDIO_VERSIONED_SCHEMAS[AUDIO_VERSIONED_SCHEMAS.len() - 1]
    }

    /// Brings the connection to the latest schema. Three cases are handled:
    /// an empty database gets the tables created, an unstamped database that
    /// already holds a compatible `audio` table is adopted, and a stamped one
    /// is validated against its recorded version.
    fn prepare_schema(conn: &Connection) -> Result<()> {
        let latest = Self::latest_schema();
        match read_schema_version(conn)? {
            None => {
                let table_exists = match latest.tables.iter().find(|t| t.name == AUDIO_TABLE_NAME)
                {
                    Some(table) => table.exists(conn)?,
                    None => false,
                };
                if table_exists {
                    info!("Adopting existing unversioned {} table", AUDIO_TABLE_NAME);
                    latest
                        .validate(conn)
                        .context("Existing audio table does not match the expected layout")?;
                    latest.stamp(conn)?;
                } else {
                    latest.create(conn)?;
                }
            }
            Some(version) => {
                let schema = AUDIO_VERSIONED_SCHEMAS
                    .iter()
                    .find(|s| s.version == version)
                    .with_context(|| format!("Unknown audio database version {}", version))?;
                schema.validate(conn).with_context(|| {
                    format!(
                        "Audio database schema validation failed for version {}",
                        version
                    )
                })?;
                debug!("Audio database at schema version {}", version);
            }
        }
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Audio database connection mutex poisoned"))
    }

    fn row_to_audio_record(row: &rusqlite::Row) -> rusqlite::Result<AudioRecord> {
        Ok(AudioRecord {
            id: row.get("id")?,
            title: row.get("title")?,
            genre: row.get("genre")?,
            image_file: row.get("imageFile")?,
            audio_file: row.get("audioFile")?,
        })
    }
}

impl AudioStore for SqliteAudioStore {
    fn list_audio(&self) -> Result<Vec<AudioRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(SELECT_AUDIO_COLUMNS)?;
        let records = stmt
            .query_map([], Self::row_to_audio_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    fn get_audio(&self, id: i64) -> Result<Option<AudioRecord>> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_AUDIO_COLUMNS),
                params![id],
                Self::row_to_audio_record,
            )
            .optional()?;
        Ok(record)
    }

    fn insert_audio(&self, record: &NewAudioRecord) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO audio (title, genre, audioFile, imageFile) VALUES (?1, ?2, ?3, ?4)",
            params![
                record.title,
                record.genre,
                record.audio_file,
                record.image_file
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update_audio(&self, id: i64, update: &AudioRecordUpdate) -> Result<usize> {
        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();

        if let Some(image_file) = &update.image_file {
            assignments.push("imageFile = ?");
            values.push(image_file);
        }
        if let Some(title) = &update.title {
            assignments.push("title = ?");
            values.push(title);
        }
        if let Some(genre) = &update.genre {
            assignments.push("genre = ?");
            values.push(genre);
        }

        if assignments.is_empty() {
            return Ok(0);
        }
        values.push(&id);

        let query = format!("UPDATE audio SET {} WHERE id = ?", assignments.join(", "));
        let conn = self.conn()?;
        let changed = conn.execute(&query, params_from_iter(values))?;
        Ok(changed)
    }

    fn delete_audio(&self, id: i64) -> Result<usize> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM audio WHERE id = ?1", params![id])?;
        Ok(deleted)
    }
}
