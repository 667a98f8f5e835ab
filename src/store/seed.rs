//! Demo data seeder
//!
//! Populates an empty database with a realistic inspection log so the
//! dashboard has something to show. Run once via `atis --seed`; a database
//! that already has rows is left alone.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::inspections::{InspectionStore, StoreResult};

struct SeedInspection {
    offset_min: i64,
    plate: Option<&'static str>,
    location: &'static str,
    camera: &'static str,
    status: &'static str,
    confidence: u8,
    defects: Option<&'static str>,
}

struct SeedAlert {
    // Index into INSPECTIONS; must point at an unsafe row.
    inspection: usize,
    status: &'static str,
    response: Option<&'static str>,
}

const INSPECTIONS: &[SeedInspection] = &[
    SeedInspection { offset_min: 0, plate: Some("BXP-8735"), location: "Highway I-95 South - Mile 58", camera: "CAM-002", status: "safe", confidence: 79, defects: None },
    SeedInspection { offset_min: 1, plate: Some("BGL-8880"), location: "Interstate 80 - Weigh Station", camera: "CAM-005", status: "safe", confidence: 86, defects: None },
    SeedInspection { offset_min: 4, plate: Some("DPJ-2877"), location: "Route 66 East - Checkpoint A", camera: "CAM-003", status: "unsafe", confidence: 91, defects: Some("Tread Wear,Sidewall Damage,Bulge") },
    SeedInspection { offset_min: 14, plate: Some("MLL-2498"), location: "Highway 101 - Toll Plaza", camera: "CAM-006", status: "safe", confidence: 84, defects: None },
    SeedInspection { offset_min: 24, plate: Some("7DT-3323"), location: "Highway I-95 South - Mile 58", camera: "CAM-007", status: "safe", confidence: 94, defects: None },
    SeedInspection { offset_min: 27, plate: Some("WNZ-8747"), location: "Interstate 80 - Weigh Station", camera: "CAM-005", status: "safe", confidence: 93, defects: None },
    SeedInspection { offset_min: 29, plate: None, location: "Highway I-95 South - Mile 58", camera: "CAM-002", status: "safe", confidence: 91, defects: None },
    SeedInspection { offset_min: 17, plate: Some("X7X-4114"), location: "Route 66 East - Checkpoint A", camera: "CAM-003", status: "unsafe", confidence: 81, defects: Some("Sidewall Damage,Cracking,Bulge") },
    SeedInspection { offset_min: 23, plate: Some("KXB-0007"), location: "Highway 101 - Toll Plaza", camera: "CAM-006", status: "safe", confidence: 81, defects: None },
    SeedInspection { offset_min: 26, plate: None, location: "Highway I-95 North - Checkpoint B", camera: "CAM-004", status: "unsafe", confidence: 88, defects: Some("Tread Wear,Sidewall Damage,Puncture") },
    SeedInspection { offset_min: 28, plate: Some("THB-1995"), location: "Interstate 80 - Weigh Station", camera: "CAM-005", status: "unsafe", confidence: 86, defects: Some("Puncture") },
    SeedInspection { offset_min: 39, plate: Some("KDX-6325"), location: "Interstate 80 - Weigh Station", camera: "CAM-005", status: "unsafe", confidence: 81, defects: None },
    SeedInspection { offset_min: 42, plate: Some("WTU-6244"), location: "Highway I-95 North - Checkpoint B", camera: "CAM-004", status: "safe", confidence: 92, defects: None },
    SeedInspection { offset_min: 55, plate: None, location: "Route 66 West - Checkpoint C", camera: "CAM-008", status: "unsafe", confidence: 76, defects: Some("Tread Wear") },
    SeedInspection { offset_min: 63, plate: Some("CVX-2910"), location: "Highway 101 - Toll Plaza", camera: "CAM-006", status: "safe", confidence: 89, defects: None },
    SeedInspection { offset_min: 90, plate: Some("AKW-5519"), location: "Highway I-95 North - Checkpoint B", camera: "CAM-004", status: "unsafe", confidence: 82, defects: Some("Bulge,Over Inflation") },
    SeedInspection { offset_min: 120, plate: Some("QMP-1176"), location: "Highway I-95 South - Mile 58", camera: "CAM-002", status: "safe", confidence: 87, defects: None },
    SeedInspection { offset_min: 238, plate: Some("VDM-5786"), location: "Highway I-95 North - Checkpoint B", camera: "CAM-004", status: "unsafe", confidence: 85, defects: Some("Bulge,Over Inflation,Cracking") },
    SeedInspection { offset_min: 441, plate: Some("XPV-8558"), location: "Highway 101 - Toll Plaza", camera: "CAM-006", status: "unsafe", confidence: 88, defects: Some("Sidewall Damage,Puncture,Cracking") },
    SeedInspection { offset_min: 618, plate: None, location: "Route 66 West - Checkpoint C", camera: "CAM-008", status: "unsafe", confidence: 84, defects: Some("Tread Wear,Sidewall Damage,Bulge") },
    SeedInspection { offset_min: 780, plate: Some("FXJ-0917"), location: "Route 66 East - Checkpoint A", camera: "CAM-003", status: "unsafe", confidence: 86, defects: Some("Sidewall Damage,Cracking") },
    SeedInspection { offset_min: 950, plate: Some("WBX-3341"), location: "Highway I-95 South - Mile 58", camera: "CAM-002", status: "unsafe", confidence: 80, defects: Some("Flat Spot,Tread Wear") },
];

const ALERTS: &[SeedAlert] = &[
    SeedAlert { inspection: 2, status: "pending", response: None },
    SeedAlert { inspection: 9, status: "pending", response: None },
    SeedAlert { inspection: 10, status: "pending", response: None },
    SeedAlert { inspection: 13, status: "acknowledged", response: None },
    SeedAlert { inspection: 15, status: "acknowledged", response: None },
    SeedAlert { inspection: 17, status: "resolved", response: Some("Vehicle stopped at weigh station, tire replaced") },
    SeedAlert { inspection: 18, status: "resolved", response: Some("Owner notified, repair confirmed") },
    SeedAlert { inspection: 21, status: "resolved", response: Some("False positive after manual check") },
];

fn base_time() -> NaiveDateTime {
    // Base time matches the demo dataset the dashboard screenshots use.
    NaiveDate::from_ymd_opt(2026, 2, 13)
        .expect("valid date")
        .and_hms_opt(14, 48, 33)
        .expect("valid time")
}

/// Seed demo inspections and alerts. Returns the number of inspections
/// inserted, or 0 when the database already had data.
pub fn seed_demo_data(store: &InspectionStore) -> StoreResult<usize> {
    if !store.is_empty()? {
        return Ok(0);
    }

    let base = base_time();
    let mut ids = Vec::with_capacity(INSPECTIONS.len());
    for row in INSPECTIONS {
        let timestamp = base - Duration::minutes(row.offset_min);
        let id = store.insert_inspection(
            timestamp,
            row.plate,
            row.location,
            Some(row.camera),
            row.status,
            row.confidence,
            row.defects,
        )?;
        ids.push((id, timestamp));
    }

    for alert in ALERTS {
        let (inspection_id, timestamp) = ids[alert.inspection];
        store.insert_alert(inspection_id, alert.status, alert.response, timestamp)?;
    }

    Ok(INSPECTIONS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AlertStatus, InspectionStore};

    #[test]
    fn test_seed_populates_empty_db() {
        let store = InspectionStore::open_in_memory().unwrap();
        let inserted = seed_demo_data(&store).unwrap();
        assert_eq!(inserted, INSPECTIONS.len());

        let stats = store.stats().unwrap();
        assert_eq!(stats.total, INSPECTIONS.len() as u64);
        assert!(stats.unsafe_count > 0);
        assert_eq!(stats.pending_alerts, 3);

        let alerts = store.load_alerts().unwrap();
        assert_eq!(alerts.len(), ALERTS.len());
        assert!(alerts
            .iter()
            .any(|alert| alert.status == AlertStatus::Resolved && alert.response.is_some()));
    }

    #[test]
    fn test_seed_skips_populated_db() {
        let store = InspectionStore::open_in_memory().unwrap();
        seed_demo_data(&store).unwrap();
        let second = seed_demo_data(&store).unwrap();
        assert_eq!(second, 0);
        assert_eq!(store.load_all().unwrap().len(), INSPECTIONS.len());
    }

    #[test]
    fn test_alert_indices_point_at_unsafe_rows() {
        for alert in ALERTS {
            assert_eq!(INSPECTIONS[alert.inspection].status, "unsafe");
        }
    }
}
