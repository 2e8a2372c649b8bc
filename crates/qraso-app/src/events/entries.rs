use qraso_types::{EntryId, Notice};

use crate::scan_context::ScanContext;

pub async fn handle_delete_entry(ctx: &ScanContext, id: EntryId) -> anyhow::Result<()> {
    let removed = ctx.state.store.write().await.delete_one(id);
    if !removed {
        tracing::debug!("Delete of {} ignored, no such entry", id);
    }
    ctx.show_entries().await
}

pub async fn handle_delete_all(ctx: &ScanContext) -> anyhow::Result<()> {
    let cleared = ctx.state.store.write().await.delete_all();
    tracing::info!("Cleared {} entries", cleared);
    ctx.show_entries().await
}

pub async fn handle_copy_url(ctx: &ScanContext, id: EntryId) {
    let url = {
        let store = ctx.state.store.read().await;
        store.get(id).map(|entry| entry.record.original_url.clone())
    };
    let Some(url) = url else {
        ctx.notify(Notice::error("That result no longer exists.")).await;
        return;
    };

    let copied = {
        let url = url.clone();
        tokio::task::spawn_blocking(move || qraso_io::clipboard::copy_text(&url)).await
    };

    match copied {
        Ok(Ok(())) => ctx.notify(Notice::info(format!("Copied {url}"))).await,
        Ok(Err(e)) => {
            tracing::warn!("Clipboard copy failed: {e:#}");
            ctx.notify(Notice::error("Could not copy to the clipboard.")).await;
        }
        Err(e) => tracing::error!("Clipboard task error: {}", e),
    }
}
