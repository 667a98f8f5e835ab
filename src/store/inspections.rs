//! SQLite-backed inspection store
//!
//! Holds the tire inspection log and the alert workflow rows the dashboard
//! renders. The schema mirrors the two tables the rest of the system writes:
//! `inspections` (one row per vehicle scan) and `alerts` (workflow entries
//! created for unsafe scans).

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("bad timestamp in row: {0}")]
    Timestamp(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Badge status of an inspection row. Anything other than the two known
/// statuses renders without a badge and only matches the `all` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionStatus {
    Safe,
    Unsafe,
    Unknown,
}

impl InspectionStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "safe" => InspectionStatus::Safe,
            "unsafe" => InspectionStatus::Unsafe,
            _ => InspectionStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionStatus::Safe => "safe",
            InspectionStatus::Unsafe => "unsafe",
            InspectionStatus::Unknown => "",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            InspectionStatus::Safe => "SAFE",
            InspectionStatus::Unsafe => "UNSAFE",
            InspectionStatus::Unknown => "--",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Inspection {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    /// License plate; None when the camera could not read one.
    pub plate: Option<String>,
    pub location: String,
    pub camera: Option<String>,
    pub status: InspectionStatus,
    /// Model confidence score, 0-100.
    pub confidence: u8,
    pub defects: Vec<String>,
}

impl Inspection {
    /// Plate cell text as rendered; a missing plate reads as empty.
    pub fn plate_text(&self) -> &str {
        self.plate.as_deref().unwrap_or("")
    }
}

/// Alert workflow status: pending -> acknowledged -> resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    Pending,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "acknowledged" => AlertStatus::Acknowledged,
            "resolved" => AlertStatus::Resolved,
            _ => AlertStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Pending => "pending",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
        }
    }
}

/// Alert joined with its inspection's plate and location for display.
#[derive(Debug, Clone)]
pub struct Alert {
    pub id: i64,
    pub inspection_id: i64,
    pub plate: Option<String>,
    pub location: String,
    pub status: AlertStatus,
    pub response: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Aggregates for the dashboard stat cards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub total: u64,
    pub safe: u64,
    pub unsafe_count: u64,
    pub pending_alerts: u64,
    /// Percentage of safe inspections, one decimal place. Zero when empty.
    pub pass_rate: f64,
}

#[derive(Debug)]
pub struct InspectionStore {
    conn: Connection,
}

impl InspectionStore {
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS inspections (
                id         INTEGER PRIMARY KEY,
                timestamp  TEXT NOT NULL,
                plate      TEXT,
                location   TEXT NOT NULL,
                camera     TEXT,
                status     TEXT NOT NULL,
                confidence INTEGER NOT NULL,
                defects    TEXT
            );
            CREATE TABLE IF NOT EXISTS alerts (
                id            INTEGER PRIMARY KEY,
                inspection_id INTEGER NOT NULL REFERENCES inspections(id),
                status        TEXT NOT NULL DEFAULT 'pending',
                response      TEXT,
                created_at    TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        let row: Option<i64> = self
            .conn
            .query_row("SELECT id FROM inspections LIMIT 1", [], |row| row.get(0))
            .optional()?;
        Ok(row.is_none())
    }

    /// Most recent inspections for the dashboard table.
    pub fn load_recent(&self, limit: usize) -> StoreResult<Vec<Inspection>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, plate, location, camera, status, confidence, defects
             FROM inspections ORDER BY timestamp DESC LIMIT ?1",
        )?;
        let mut rows = stmt.query(params![limit as i64])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(read_inspection(row)?);
        }
        Ok(out)
    }

    /// Full inspection log, newest first.
    pub fn load_all(&self) -> StoreResult<Vec<Inspection>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, plate, location, camera, status, confidence, defects
             FROM inspections ORDER BY timestamp DESC",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(read_inspection(row)?);
        }
        Ok(out)
    }

    /// Alerts joined with the plate/location of the inspection that raised
    /// them, newest first.
    pub fn load_alerts(&self) -> StoreResult<Vec<Alert>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.inspection_id, i.plate, i.location, a.status, a.response, a.created_at
             FROM alerts a JOIN inspections i ON i.id = a.inspection_id
             ORDER BY a.created_at DESC",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let status: String = row.get(4)?;
            let created_at: String = row.get(6)?;
            out.push(Alert {
                id: row.get(0)?,
                inspection_id: row.get(1)?,
                plate: row.get(2)?,
                location: row.get(3)?,
                status: AlertStatus::parse(&status),
                response: row.get(5)?,
                created_at: parse_timestamp(&created_at)?,
            });
        }
        Ok(out)
    }

    pub fn stats(&self) -> StoreResult<Stats> {
        let total = self.count("SELECT COUNT(*) FROM inspections")?;
        let safe = self.count("SELECT COUNT(*) FROM inspections WHERE status = 'safe'")?;
        let unsafe_count =
            self.count("SELECT COUNT(*) FROM inspections WHERE status = 'unsafe'")?;
        let pending_alerts =
            self.count("SELECT COUNT(*) FROM alerts WHERE status = 'pending'")?;

        let pass_rate = if total > 0 {
            (safe as f64 / total as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };

        Ok(Stats {
            total,
            safe,
            unsafe_count,
            pending_alerts,
            pass_rate,
        })
    }

    pub fn insert_inspection(
        &self,
        timestamp: NaiveDateTime,
        plate: Option<&str>,
        location: &str,
        camera: Option<&str>,
        status: &str,
        confidence: u8,
        defects: Option<&str>,
    ) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO inspections (timestamp, plate, location, camera, status, confidence, defects)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                timestamp.format(TIMESTAMP_FORMAT).to_string(),
                plate,
                location,
                camera,
                status,
                confidence as i64,
                defects,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_alert(
        &self,
        inspection_id: i64,
        status: &str,
        response: Option<&str>,
        created_at: NaiveDateTime,
    ) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO alerts (inspection_id, status, response, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                inspection_id,
                status,
                response,
                created_at.format(TIMESTAMP_FORMAT).to_string(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn count(&self, sql: &str) -> StoreResult<u64> {
        let n: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(n.max(0) as u64)
    }
}

fn read_inspection(row: &rusqlite::Row<'_>) -> StoreResult<Inspection> {
    let timestamp: String = row.get(1)?;
    let status: String = row.get(5)?;
    let confidence: i64 = row.get(6)?;
    let defects: Option<String> = row.get(7)?;
    Ok(Inspection {
        id: row.get(0)?,
        timestamp: parse_timestamp(&timestamp)?,
        plate: row.get(2)?,
        location: row.get(3)?,
        camera: row.get(4)?,
        status: InspectionStatus::parse(&status),
        confidence: confidence.clamp(0, 100) as u8,
        defects: split_defects(defects.as_deref()),
    })
}

fn parse_timestamp(raw: &str) -> StoreResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| StoreError::Timestamp(raw.to_string()))
}

/// Comma-separated defect list into trimmed entries, dropping empties.
fn split_defects(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 13)
            .unwrap()
            .and_hms_opt(14, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_roundtrip_and_ordering() {
        let store = InspectionStore::open_in_memory().unwrap();
        store
            .insert_inspection(ts(1), Some("AAA-1111"), "Gate 1", Some("CAM-001"), "safe", 90, None)
            .unwrap();
        store
            .insert_inspection(
                ts(5),
                None,
                "Gate 2",
                None,
                "unsafe",
                82,
                Some("Tread Wear, Bulge"),
            )
            .unwrap();

        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 2);
        // Newest first
        assert_eq!(all[0].location, "Gate 2");
        assert_eq!(all[0].status, InspectionStatus::Unsafe);
        assert_eq!(all[0].plate_text(), "");
        assert_eq!(all[0].defects, vec!["Tread Wear", "Bulge"]);
        assert_eq!(all[1].plate_text(), "AAA-1111");
    }

    #[test]
    fn test_recent_limit() {
        let store = InspectionStore::open_in_memory().unwrap();
        for minute in 0..15 {
            store
                .insert_inspection(ts(minute), Some("X"), "Gate", None, "safe", 80, None)
                .unwrap();
        }
        assert_eq!(store.load_recent(10).unwrap().len(), 10);
    }

    #[test]
    fn test_stats_pass_rate() {
        let store = InspectionStore::open_in_memory().unwrap();
        let a = store
            .insert_inspection(ts(1), Some("A"), "Gate", None, "safe", 90, None)
            .unwrap();
        store
            .insert_inspection(ts(2), Some("B"), "Gate", None, "safe", 91, None)
            .unwrap();
        let c = store
            .insert_inspection(ts(3), Some("C"), "Gate", None, "unsafe", 88, Some("Bulge"))
            .unwrap();
        store.insert_alert(c, "pending", None, ts(3)).unwrap();
        store
            .insert_alert(a, "resolved", Some("false positive"), ts(4))
            .unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.safe, 2);
        assert_eq!(stats.unsafe_count, 1);
        assert_eq!(stats.pending_alerts, 1);
        assert_eq!(stats.pass_rate, 66.7);
    }

    #[test]
    fn test_alerts_join_plate() {
        let store = InspectionStore::open_in_memory().unwrap();
        let id = store
            .insert_inspection(ts(1), Some("DPJ-2877"), "Checkpoint A", None, "unsafe", 91, None)
            .unwrap();
        store.insert_alert(id, "pending", None, ts(2)).unwrap();

        let alerts = store.load_alerts().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].plate.as_deref(), Some("DPJ-2877"));
        assert_eq!(alerts[0].status, AlertStatus::Pending);
        assert_eq!(alerts[0].inspection_id, id);
    }

    #[test]
    fn test_unknown_status_parses_to_unknown() {
        assert_eq!(InspectionStatus::parse("weird"), InspectionStatus::Unknown);
        assert_eq!(InspectionStatus::parse(""), InspectionStatus::Unknown);
        assert_eq!(InspectionStatus::Unknown.as_str(), "");
    }
}
