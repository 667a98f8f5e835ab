use std::path::Path;

use anyhow::Result;
use serde_json::json;

use crate::store::{Alert, Inspection, TIMESTAMP_FORMAT};

pub(super) fn write_inspection(path: &Path, inspection: &Inspection, alerts: &[&Alert]) -> Result<()> {
    let alerts: Vec<_> = alerts
        .iter()
        .map(|alert| {
            json!({
                "id": alert.id,
                "status": alert.status.as_str(),
                "response": alert.response,
                "created_at": alert.created_at.format(TIMESTAMP_FORMAT).to_string(),
            })
        })
        .collect();

    let value = json!({
        "id": inspection.id,
        "timestamp": inspection.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        "plate": inspection.plate,
        "location": inspection.location,
        "camera": inspection.camera,
        "status": inspection.status.badge(),
        "confidence": inspection.confidence,
        "defects": inspection.defects,
        "alerts": alerts,
    });

    std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    Ok(())
}
