//! SQLite-backed storage gateway.
//!
//! One table, five nullable TEXT columns beside the rowid. Every column
//! crosses the [`crate::convert`] layer on both read and write, so callers
//! only ever see temporal types.

use std::path::Path;
use std::sync::Mutex;

use chrono::NaiveDate;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use crate::convert;
use crate::error::RepositoryError;
use crate::repository::Repository;
use crate::temporal::Temporal;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS temporals (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    local_date  TEXT,
    local_time  TEXT,
    instant_ts  TEXT,
    zone_id     TEXT,
    zone_offset TEXT
)";

const COLUMNS: &str = "id, local_date, local_time, instant_ts, zone_id, zone_offset";

pub struct SqliteRepository {
    conn: Mutex<Connection>,
}

impl SqliteRepository {
    /// Open (creating if needed) a file-backed store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a fresh in-memory store. Used by tests and throwaway runs.
    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, RepositoryError> {
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteRepository {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self, operation: &'static str) -> Result<std::sync::MutexGuard<'_, Connection>, RepositoryError> {
        self.conn
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned(operation))
    }
}

/// Raw column values as the engine hands them back, before conversion.
struct StoredRow {
    id: i64,
    local_date: Option<String>,
    local_time: Option<String>,
    instant_ts: Option<String>,
    zone_id: Option<String>,
    zone_offset: Option<String>,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredRow> {
    Ok(StoredRow {
        id: row.get(0)?,
        local_date: row.get(1)?,
        local_time: row.get(2)?,
        instant_ts: row.get(3)?,
        zone_id: row.get(4)?,
        zone_offset: row.get(5)?,
    })
}

/// Apply the converters column by column. A parse failure here means the
/// stored data is corrupt and surfaces as a hard error.
fn hydrate(row: StoredRow) -> Result<Temporal, RepositoryError> {
    Ok(Temporal {
        id: Some(row.id),
        local_date: row
            .local_date
            .as_deref()
            .map(convert::date_from_storage)
            .transpose()?,
        local_time: row
            .local_time
            .as_deref()
            .map(convert::time_from_storage)
            .transpose()?,
        instant: row
            .instant_ts
            .as_deref()
            .map(convert::instant_from_storage)
            .transpose()?,
        zone_id: row
            .zone_id
            .as_deref()
            .map(convert::zone_id_from_storage)
            .transpose()?,
        zone_offset: row
            .zone_offset
            .as_deref()
            .map(convert::zone_offset_from_storage)
            .transpose()?,
    })
}

impl Repository for SqliteRepository {
    fn get(&self, id: i64) -> Result<Option<Temporal>, RepositoryError> {
        let conn = self.lock("get")?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM temporals WHERE id = ?1", COLUMNS),
                params![id],
                read_row,
            )
            .optional()?;
        row.map(hydrate).transpose()
    }

    fn get_all(&self) -> Result<Vec<Temporal>, RepositoryError> {
        let conn = self.lock("get_all")?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM temporals", COLUMNS))?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(hydrate).collect()
    }

    fn save(&self, temporal: &Temporal) -> Result<Temporal, RepositoryError> {
        let local_date = temporal.local_date.map(convert::date_to_storage);
        let local_time = temporal.local_time.map(convert::time_to_storage);
        let instant_ts = temporal.instant.map(convert::instant_to_storage);
        let zone_id = temporal.zone_id.map(convert::zone_id_to_storage);
        let zone_offset = temporal.zone_offset.map(convert::zone_offset_to_storage);

        let conn = self.lock("save")?;
        let id = match temporal.id {
            Some(id) => {
                debug!("upserting temporal {}", id);
                conn.execute(
                    "INSERT INTO temporals (id, local_date, local_time, instant_ts, zone_id, zone_offset) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
                     ON CONFLICT(id) DO UPDATE SET \
                         local_date = excluded.local_date, \
                         local_time = excluded.local_time, \
                         instant_ts = excluded.instant_ts, \
                         zone_id = excluded.zone_id, \
                         zone_offset = excluded.zone_offset",
                    params![id, local_date, local_time, instant_ts, zone_id, zone_offset],
                )?;
                id
            }
            None => {
                conn.execute(
                    "INSERT INTO temporals (local_date, local_time, instant_ts, zone_id, zone_offset) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![local_date, local_time, instant_ts, zone_id, zone_offset],
                )?;
                let id = conn.last_insert_rowid();
                debug!("inserted temporal {}", id);
                id
            }
        };

        Ok(Temporal {
            id: Some(id),
            ..temporal.clone()
        })
    }

    fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let conn = self.lock("delete")?;
        let removed = conn.execute("DELETE FROM temporals WHERE id = ?1", params![id])?;
        debug!("delete temporal {} removed {} row(s)", id, removed);
        Ok(())
    }

    fn find_by_local_date(&self, date: NaiveDate) -> Result<Vec<Temporal>, RepositoryError> {
        let conn = self.lock("find_by_local_date")?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM temporals WHERE local_date = ?1",
            COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![convert::date_to_storage(date)], read_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(hydrate).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Corrupt column text must surface as a hard conversion failure, not a
    // silently absent field.
    #[test]
    fn corrupt_zone_column_is_a_hard_failure() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        {
            let conn = repo.lock("test").unwrap();
            conn.execute(
                "INSERT INTO temporals (id, zone_id) VALUES (?1, ?2)",
                params![1, "America/Atlantis"],
            )
            .unwrap();
        }
        assert!(matches!(
            repo.get(1),
            Err(RepositoryError::Convert(_))
        ));
    }

    #[test]
    fn all_null_columns_hydrate_as_absent_fields() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        {
            let conn = repo.lock("test").unwrap();
            conn.execute("INSERT INTO temporals DEFAULT VALUES", [])
                .unwrap();
        }
        let temporal = repo.get(1).unwrap().unwrap();
        assert_eq!(temporal.id, Some(1));
        assert!(temporal.local_date.is_none());
        assert!(temporal.local_time.is_none());
        assert!(temporal.instant.is_none());
        assert!(temporal.zone_id.is_none());
        assert!(temporal.zone_offset.is_none());
    }
}
