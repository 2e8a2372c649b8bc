use qraso_types::{ESCALATION_THRESHOLD, EntryId, Notice};

use crate::scan_context::ScanContext;

pub async fn handle_report(ctx: ScanContext, id: EntryId) {
    let reportable = {
        let store = ctx.state.store.read().await;
        store.get(id).map(|entry| entry.is_reportable())
    };
    if reportable == Some(false) {
        ctx.notify(Notice::error("Only SUSPICIOUS results can be reported."))
            .await;
        return;
    }

    match ctx.reports.report(id).await {
        Ok(count) => {
            let mut message = format!("Reported. This URL has now been reported {count} time(s).");
            if count >= ESCALATION_THRESHOLD {
                message.push_str(" It is on the warning list.");
            }
            ctx.notify(Notice::info(message)).await;
            if let Err(e) = ctx.show_entries().await {
                tracing::error!("Failed to refresh entries: {}", e);
            }
        }
        Err(e) => {
            tracing::warn!("Report for {} failed: {}", id, e);
            ctx.notify(Notice::error(e.user_message())).await;
        }
    }
}
