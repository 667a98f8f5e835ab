use std::path::Path;

use anyhow::Result;

use crate::store::{Alert, Inspection, TIMESTAMP_FORMAT};

pub(super) fn write_inspections(path: &Path, rows: &[&Inspection]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "id",
        "timestamp",
        "plate",
        "location",
        "camera",
        "status",
        "confidence",
        "defects",
    ])?;
    for row in rows {
        writer.write_record([
            row.id.to_string(),
            row.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            row.plate_text().to_string(),
            row.location.clone(),
            row.camera.clone().unwrap_or_default(),
            row.status.badge().to_string(),
            row.confidence.to_string(),
            row.defects.join("; "),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub(super) fn write_alerts(path: &Path, alerts: &[Alert]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "id",
        "inspection_id",
        "plate",
        "location",
        "status",
        "response",
        "created_at",
    ])?;
    for alert in alerts {
        writer.write_record([
            alert.id.to_string(),
            alert.inspection_id.to_string(),
            alert.plate.clone().unwrap_or_default(),
            alert.location.clone(),
            alert.status.as_str().to_string(),
            alert.response.clone().unwrap_or_default(),
            alert.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
