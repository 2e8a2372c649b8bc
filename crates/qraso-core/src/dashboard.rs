use qraso_gateway::{DashboardError, DashboardSource};
use qraso_types::{DashboardRow, DisplayIndex, VerdictRecord};

/// Number rows 1.. in fetch order. Indices are display-only.
pub fn project(records: Vec<VerdictRecord>) -> Vec<DashboardRow> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| DashboardRow {
            index: DisplayIndex(i + 1),
            record,
        })
        .collect()
}

pub async fn load(source: &dyn DashboardSource) -> Result<Vec<DashboardRow>, DashboardError> {
    let records = source.fetch_warnings().await?;
    tracing::info!("Loaded {} reported URLs", records.len());
    Ok(project(records))
}
