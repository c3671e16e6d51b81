//! SQLite storage backend.
//!
//! The ledger snapshot is stored in three tables: `meta` (owner, counter,
//! format version), `deliveries` and `events`. Every save rewrites them in a
//! single transaction.

mod row;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{LedgerError, Result};
use crate::events::{EventLog, LedgerEvent};
use crate::record::{DeliveryRecord, Owner, PackageId};
use crate::storage::traits::LedgerStore;
use crate::storage::types::{LedgerSnapshot, FORMAT_VERSION};

use row::{from_sql_id, to_sql_id, DeliveryRow, EventRow};

const SCHEMA: &str = r#"
    CREATE TABLE meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE deliveries (
        id INTEGER PRIMARY KEY,
        sender TEXT NOT NULL,
        recipient TEXT NOT NULL,
        dispatch_time INTEGER NOT NULL,
        status TEXT NOT NULL,
        delivery_time INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE events (
        seq INTEGER PRIMARY KEY,
        package_id INTEGER NOT NULL REFERENCES deliveries(id),
        kind TEXT NOT NULL,
        payload_json TEXT NOT NULL
    );

    CREATE INDEX events_package_id ON events(package_id);
"#;

/// SQLite-backed ledger store.
pub struct SqliteStore {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| LedgerError::Storage("SQLite connection poisoned".to_string()))
    }

    fn read_meta(conn: &Connection, key: &str) -> Result<Option<String>> {
        let value = conn
            .query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn require_meta(conn: &Connection, key: &str) -> Result<String> {
        Self::read_meta(conn, key)?
            .ok_or_else(|| LedgerError::Storage(format!("Missing metadata key: {}", key)))
    }

    fn write_meta(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn load_deliveries(conn: &Connection) -> Result<Vec<DeliveryRecord>> {
        let mut stmt = conn.prepare(
            "SELECT id, sender, recipient, dispatch_time, status, delivery_time
             FROM deliveries ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DeliveryRow {
                    id: row.get(0)?,
                    sender: row.get(1)?,
                    recipient: row.get(2)?,
                    dispatch_time: row.get(3)?,
                    status: row.get(4)?,
                    delivery_time: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(DeliveryRecord::try_from).collect()
    }

    fn load_events(conn: &Connection) -> Result<EventLog> {
        let mut stmt = conn.prepare("SELECT seq, payload_json FROM events ORDER BY seq ASC")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(EventRow {
                    seq: row.get(0)?,
                    payload_json: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let events = rows
            .into_iter()
            .map(LedgerEvent::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(EventLog::from(events))
    }
}

impl LedgerStore for SqliteStore {
    fn create(path: &Path, owner: &Owner) -> Result<Self> {
        if path.exists() {
            return Err(LedgerError::Storage(
                "Ledger file already exists".to_string(),
            ));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;

        Self::write_meta(&conn, "format_version", FORMAT_VERSION)?;
        Self::write_meta(&conn, "owner", owner.as_str())?;
        Self::write_meta(&conn, "next_id", &PackageId::FIRST.to_string())?;
        Self::write_meta(&conn, "enforce_owner", "false")?;
        Self::write_meta(&conn, "created_at", &Utc::now().to_rfc3339())?;

        tracing::info!(path = %path.display(), owner = %owner, "ledger store created");
        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LedgerError::Storage(format!(
                "Ledger file not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let version = Self::read_meta(&conn, "format_version")
            .map_err(|_| LedgerError::Storage("Not a delivery ledger".to_string()))?
            .ok_or_else(|| LedgerError::Storage("Not a delivery ledger".to_string()))?;
        if version != FORMAT_VERSION {
            return Err(LedgerError::Storage(format!(
                "Unsupported format version: {}",
                version
            )));
        }

        tracing::debug!(path = %path.display(), "ledger store opened");
        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    fn load(&self) -> Result<LedgerSnapshot> {
        let conn = self.lock_conn()?;

        let owner = Owner::new(Self::require_meta(&conn, "owner")?);
        let next_id = Self::require_meta(&conn, "next_id")?.parse::<PackageId>()?;
        let deliveries = Self::load_deliveries(&conn)?;
        let events = Self::load_events(&conn)?;

        Ok(LedgerSnapshot {
            owner,
            next_id,
            deliveries,
            events,
        })
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        snapshot.validate()?;
        let mut conn = self.lock_conn()?;

        let stored_owner = Self::require_meta(&conn, "owner")?;
        if stored_owner != snapshot.owner.as_str() {
            return Err(LedgerError::Validation(
                "Snapshot owner does not match stored owner".to_string(),
            ));
        }

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM events", [])?;
        tx.execute("DELETE FROM deliveries", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO deliveries (id, sender, recipient, dispatch_time, status, delivery_time)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for record in &snapshot.deliveries {
                let row = DeliveryRow::from_record(record)?;
                insert.execute(params![
                    row.id,
                    row.sender,
                    row.recipient,
                    row.dispatch_time,
                    row.status,
                    row.delivery_time
                ])?;
            }

            let mut insert = tx.prepare(
                "INSERT INTO events (seq, package_id, kind, payload_json) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (seq, event) in snapshot.events.iter().enumerate() {
                let payload = serde_json::to_string(event)?;
                insert.execute(params![
                    seq as i64 + 1,
                    to_sql_id(event.package_id())?,
                    event.name(),
                    payload
                ])?;
            }
        }
        Self::write_meta(&tx, "next_id", &snapshot.next_id.to_string())?;
        Self::write_meta(&tx, "last_modified", &Utc::now().to_rfc3339())?;
        tx.commit()?;

        tracing::info!(
            path = %self.path.display(),
            deliveries = snapshot.deliveries.len(),
            events = snapshot.events.len(),
            "ledger saved"
        );
        Ok(())
    }

    fn enforce_owner(&self) -> Result<bool> {
        let conn = self.lock_conn()?;
        match Self::read_meta(&conn, "enforce_owner")?.as_deref() {
            None | Some("false") => Ok(false),
            Some("true") => Ok(true),
            Some(other) => Err(LedgerError::Storage(format!(
                "Invalid enforce_owner value: {}",
                other
            ))),
        }
    }

    fn set_enforce_owner(&self, enforce: bool) -> Result<()> {
        let conn = self.lock_conn()?;
        Self::write_meta(&conn, "enforce_owner", if enforce { "true" } else { "false" })?;
        tracing::info!(path = %self.path.display(), enforce_owner = enforce, "owner policy stored");
        Ok(())
    }

    fn check_integrity(&self) -> Result<()> {
        {
            let conn = self.lock_conn()?;
            let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
            if result != "ok" {
                return Err(LedgerError::Storage(format!(
                    "SQLite integrity check failed: {}",
                    result
                )));
            }

            let max_id: Option<i64> =
                conn.query_row("SELECT MAX(id) FROM deliveries", [], |row| row.get(0))?;
            if let Some(max_id) = max_id {
                from_sql_id(max_id)?;
            }
        }

        self.load()?.validate()
    }
}
