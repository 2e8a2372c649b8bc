use qraso_core::CaptureOutcome;
use qraso_types::{Notice, ScanPayload};

use crate::scan_context::ScanContext;

/// Run one detection through the capture session.
///
/// `manual` scans come from the prompt and arm the session first; feed detections
/// only count while the camera is on.
pub async fn handle_scan(ctx: ScanContext, payload: ScanPayload, manual: bool) {
    if manual {
        let enabled = ctx.state.config.read().await.capture.enabled;
        if !enabled {
            ctx.notify(Notice::error("Scanning is disabled in this profile."))
                .await;
            return;
        }
        ctx.capture.start();
    }

    match ctx.capture.on_detect(payload).await {
        CaptureOutcome::Ignored => {
            tracing::debug!(">>> [SCAN] Ignored (camera off or empty scan)");
        }
        CaptureOutcome::Busy => {
            if manual {
                ctx.notify(Notice::info("Still analyzing the previous scan."))
                    .await;
            }
        }
        CaptureOutcome::Completed(result) => {
            ctx.pipeline.publish_outcome(&ctx.event_tx, &result).await;
            if let Err(e) = ctx.event_tx.send(ctx.capture.status()).await {
                tracing::error!("Failed to send capture status to UI: {}", e);
            }
        }
    }
}
