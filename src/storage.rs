// 💾 Storage - saved widget inputs and calculation history (SQLite)
//
// widget_state holds the last inputs of each widget (last write wins).
// history is append-only; a record whose fingerprint equals the newest entry
// of the same widget is a repeated click and is skipped.

use crate::calculators::Calculator;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub entry_id: String,
    pub widget_key: String,
    pub recorded_at: DateTime<Utc>,
    pub fingerprint: String,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
}

impl HistoryEntry {
    pub fn new(widget_key: &str, input: serde_json::Value, output: serde_json::Value) -> Self {
        Self {
            entry_id: uuid::Uuid::new_v4().to_string(),
            widget_key: widget_key.to_string(),
            recorded_at: Utc::now(),
            fingerprint: fingerprint(widget_key, &input),
            input,
            output,
        }
    }
}

/// sha256 over the widget key and its canonical input JSON
pub fn fingerprint(widget_key: &str, input: &serde_json::Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(widget_key.as_bytes());
    hasher.update(b"\0");
    hasher.update(input.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Outcome of `record`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Appended(String),
    /// Same inputs as the newest entry; nothing written
    Duplicate(String),
}

pub struct HistoryStore {
    conn: Connection,
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS widget_state (
            widget_key TEXT PRIMARY KEY,
            inputs_json TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            entry_id TEXT UNIQUE NOT NULL,
            widget_key TEXT NOT NULL,
            recorded_at TEXT NOT NULL,
            fingerprint TEXT NOT NULL,
            input_json TEXT NOT NULL,
            output_json TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_history_widget ON history(widget_key, id)",
        [],
    )?;

    Ok(())
}

impl HistoryStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        setup_database(&conn).context("Failed to set up database schema")?;
        tracing::debug!(path = %path.display(), "opened history store");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        setup_database(&conn)?;
        Ok(Self { conn })
    }

    // ========================================================================
    // WIDGET INPUTS
    // ========================================================================

    pub fn save_inputs<T: Serialize>(&self, widget_key: &str, inputs: &T) -> Result<()> {
        let json = serde_json::to_string(inputs)?;
        self.conn.execute(
            "INSERT INTO widget_state (widget_key, inputs_json, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(widget_key) DO UPDATE SET
                inputs_json = excluded.inputs_json,
                updated_at = excluded.updated_at",
            params![widget_key, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn load_inputs_json(&self, widget_key: &str) -> Result<Option<serde_json::Value>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT inputs_json FROM widget_state WHERE widget_key = ?1",
                params![widget_key],
                |row| row.get(0),
            )
            .optional()?;

        json.map(|j| serde_json::from_str(&j).context("Stored inputs are not valid JSON"))
            .transpose()
    }

    /// Saved inputs for a widget, or None if never saved
    pub fn load_inputs<T: DeserializeOwned>(&self, widget_key: &str) -> Result<Option<T>> {
        match self.load_inputs_json(widget_key)? {
            Some(value) => {
                let inputs = serde_json::from_value(value)
                    .with_context(|| format!("Stored inputs for '{}' no longer match", widget_key))?;
                Ok(Some(inputs))
            }
            None => Ok(None),
        }
    }

    // ========================================================================
    // HISTORY
    // ========================================================================

    pub fn record<C: Calculator>(&self, input: &C::Input, output: &C::Output) -> Result<Recorded> {
        self.record_json(C::KEY, serde_json::to_value(input)?, serde_json::to_value(output)?)
    }

    pub fn record_json(
        &self,
        widget_key: &str,
        input: serde_json::Value,
        output: serde_json::Value,
    ) -> Result<Recorded> {
        let entry = HistoryEntry::new(widget_key, input, output);

        let newest: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT entry_id, fingerprint FROM history
                 WHERE widget_key = ?1 ORDER BY id DESC LIMIT 1",
                params![widget_key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        if let Some((entry_id, fp)) = newest {
            if fp == entry.fingerprint {
                tracing::debug!(widget = widget_key, "skipping repeated history entry");
                return Ok(Recorded::Duplicate(entry_id));
            }
        }

        self.conn.execute(
            "INSERT INTO history (
                entry_id, widget_key, recorded_at, fingerprint, input_json, output_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.entry_id,
                entry.widget_key,
                entry.recorded_at.to_rfc3339(),
                entry.fingerprint,
                entry.input.to_string(),
                entry.output.to_string(),
            ],
        )?;

        tracing::info!(widget = widget_key, entry = %entry.entry_id, "recorded calculation");
        Ok(Recorded::Appended(entry.entry_id))
    }

    /// Entries for a widget, newest first
    pub fn history(&self, widget_key: &str) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT entry_id, widget_key, recorded_at, fingerprint, input_json, output_json
             FROM history WHERE widget_key = ?1 ORDER BY id DESC",
        )?;

        let rows = stmt.query_map(params![widget_key], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (entry_id, widget_key, recorded_at, fingerprint, input_json, output_json) = row?;
            entries.push(HistoryEntry {
                entry_id,
                widget_key,
                recorded_at: DateTime::parse_from_rfc3339(&recorded_at)
                    .context("Invalid recorded_at timestamp")?
                    .with_timezone(&Utc),
                fingerprint,
                input: serde_json::from_str(&input_json)?,
                output: serde_json::from_str(&output_json)?,
            });
        }
        Ok(entries)
    }

    /// Number of entries removed
    pub fn clear_history(&self, widget_key: &str) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM history WHERE widget_key = ?1", params![widget_key])?;
        tracing::info!(widget = widget_key, removed, "cleared history");
        Ok(removed)
    }
}
