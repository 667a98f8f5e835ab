mod csv_export;
mod json_export;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::Local;

use crate::app::{App, Section, View};
use crate::core::{Action, NotifyLevel};

/// Directory for generated export files, created on demand.
pub fn get_export_dir() -> Result<PathBuf> {
    let dir = crate::config::data_dir()?.join("exports");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    Ok(dir)
}

fn generate_filename(prefix: &str, ext: &str) -> String {
    format!("{}_{}.{}", prefix, Local::now().format("%Y%m%d_%H%M%S"), ext)
}

/// Export whatever the user is looking at. Tables go to CSV, a single
/// inspection detail goes to JSON.
pub fn export_current_view(app: &App) -> Action {
    let result = match app.current_view() {
        View::InspectionDetail => export_detail(app),
        View::Main => match app.active_section {
            Section::Alerts => export_alerts(app),
            Section::Dashboard | Section::History | Section::Reports => export_inspections(app),
        },
    };

    match result {
        Ok(path) => Action::Notify(format!("Exported to {}", path.display()), NotifyLevel::Info),
        Err(err) => Action::Notify(format!("Export failed: {err}"), NotifyLevel::Error),
    }
}

fn export_inspections(app: &App) -> Result<PathBuf> {
    let rows: Vec<_> = match app.active_section {
        // Reports has no table of its own; export the full history.
        Section::Reports => app.history.iter().collect(),
        _ => {
            let indices = app.visible_row_indices();
            let table = app.table_rows();
            indices.iter().filter_map(|idx| table.get(*idx)).collect()
        }
    };
    anyhow::ensure!(!rows.is_empty(), "no rows to export");

    let path = get_export_dir()?.join(generate_filename("inspections", "csv"));
    csv_export::write_inspections(&path, &rows)?;
    Ok(path)
}

fn export_alerts(app: &App) -> Result<PathBuf> {
    anyhow::ensure!(!app.alerts.is_empty(), "no alerts to export");
    let path = get_export_dir()?.join(generate_filename("alerts", "csv"));
    csv_export::write_alerts(&path, &app.alerts)?;
    Ok(path)
}

fn export_detail(app: &App) -> Result<PathBuf> {
    let inspection = app
        .detail_inspection
        .and_then(|id| app.inspection_by_id(id))
        .context("no inspection selected")?;
    let alerts = app.alerts_for(inspection.id);
    let path = get_export_dir()?.join(generate_filename(
        &format!("inspection_{}", inspection.id),
        "json",
    ));
    json_export::write_inspection(&path, inspection, &alerts)?;
    Ok(path)
}
