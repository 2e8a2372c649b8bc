use qraso_types::{AppEvent, Notice};

use crate::scan_context::ScanContext;

pub async fn handle_dashboard_load(ctx: ScanContext) {
    match qraso_core::dashboard::load(ctx.dashboard.as_ref()).await {
        Ok(rows) => {
            tracing::debug!("Dashboard loaded with {} rows", rows.len());
            if let Err(e) = ctx.event_tx.send(AppEvent::ShowDashboard(rows)).await {
                tracing::error!("Failed to send dashboard to UI: {}", e);
            }
        }
        Err(e) => {
            tracing::warn!("Dashboard load failed: {}", e);
            ctx.notify(Notice::error(e.user_message())).await;
        }
    }
}
