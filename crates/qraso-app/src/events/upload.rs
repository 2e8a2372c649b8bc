use std::path::Path;

use qraso_core::EnqueueError;
use qraso_types::{ImagePayload, Notice, UploadOrigin};

use crate::scan_context::ScanContext;

async fn enqueue(ctx: &ScanContext, payload: ImagePayload) {
    let file_name = payload.file_name.clone();
    match ctx.uploads.enqueue(payload) {
        Ok(()) => {
            tracing::info!("Queued upload {} ({} waiting)", file_name, ctx.uploads.queued());
        }
        Err(EnqueueError::Rejected(reason)) => {
            tracing::debug!("Upload {} rejected: {}", file_name, reason);
        }
        Err(EnqueueError::Closed) => {
            tracing::error!("Upload queue closed, dropping {}", file_name);
            ctx.notify(Notice::error("Uploads are unavailable.")).await;
        }
    }
}

pub async fn handle_upload_path(ctx: &ScanContext, path: &Path, origin: UploadOrigin) {
    match qraso_io::file::read_image(path, origin).await {
        Ok(payload) => enqueue(ctx, payload).await,
        Err(e) => {
            tracing::warn!("Upload failed: {e:#}");
            ctx.notify(Notice::error(format!("{e:#}"))).await;
        }
    }
}

pub async fn handle_image_input(ctx: &ScanContext, payload: ImagePayload) {
    enqueue(ctx, payload).await;
}

pub async fn handle_clipboard_paste(ctx: &ScanContext) {
    let image = tokio::task::spawn_blocking(qraso_io::clipboard::read_clipboard_image).await;

    match image {
        Ok(Ok(payload)) => enqueue(ctx, payload).await,
        Ok(Err(e)) => {
            tracing::warn!("Clipboard paste failed: {e:#}");
            ctx.notify(Notice::error("No image on the clipboard.")).await;
        }
        Err(e) => tracing::error!("Clipboard task error: {}", e),
    }
}
