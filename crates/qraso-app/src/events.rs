use kanal::AsyncReceiver;
use qraso_types::{AppEvent, UiEvent};

use crate::scan_context::ScanContext;

pub mod capture;
pub mod dashboard;
pub mod entries;
pub mod report;
pub mod scan;
pub mod upload;

use capture::handle_capture_command;
use dashboard::handle_dashboard_load;
use entries::{handle_copy_url, handle_delete_all, handle_delete_entry};
use report::handle_report;
use scan::handle_scan;
use upload::{handle_clipboard_paste, handle_image_input, handle_upload_path};

/// App's main loop
pub async fn event_loop(
    ctx: ScanContext,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    ctx.event_tx.send(AppEvent::BackendReady).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = ui_to_app_rx.recv().await?;
        if event == AppEvent::UiEvent(UiEvent::Close) {
            tracing::info!("[EVENT_LOOP] UI closed");
            break;
        }

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );
        handle_events(&ctx, event).await?;
    }

    Ok(())
}

/// Dispatch one event. Anything that waits on the backend runs on its own task
/// so the loop keeps serving other surfaces meanwhile.
pub async fn handle_events(ctx: &ScanContext, event: AppEvent) -> anyhow::Result<()> {
    match event {
        AppEvent::ScanDetected(payload) => {
            tokio::spawn(handle_scan(ctx.clone(), payload, false));
        }
        AppEvent::ManualScan(text) => {
            tokio::spawn(handle_scan(
                ctx.clone(),
                qraso_types::ScanPayload::Text(text),
                true,
            ));
        }
        // Reads stay on the loop so uploads enter the queue in trigger order
        AppEvent::UploadPath { path, origin } => {
            handle_upload_path(ctx, &path, origin).await;
        }
        AppEvent::ImageInput(payload) => {
            handle_image_input(ctx, payload).await;
        }
        AppEvent::PasteClipboard => {
            handle_clipboard_paste(ctx).await;
        }
        AppEvent::ReportEntry(id) => {
            tokio::spawn(handle_report(ctx.clone(), id));
        }
        AppEvent::DeleteEntry(id) => {
            handle_delete_entry(ctx, id).await?;
        }
        AppEvent::DeleteAll => {
            handle_delete_all(ctx).await?;
        }
        AppEvent::CopyUrl(id) => {
            handle_copy_url(ctx, id).await;
        }
        AppEvent::RefreshEntries => {
            ctx.show_entries().await?;
        }
        AppEvent::LoadDashboard => {
            tokio::spawn(handle_dashboard_load(ctx.clone()));
        }
        AppEvent::Capture(command) => {
            handle_capture_command(ctx, command).await?;
        }
        AppEvent::UiEvent(_) => {}
        AppEvent::ShowEntries(_)
        | AppEvent::ShowDashboard(_)
        | AppEvent::Notify(_)
        | AppEvent::CaptureStatus { .. }
        | AppEvent::UploadStatus { .. }
        | AppEvent::BackendReady => {
            // UI-only event, ignore in backend
        }
    }

    Ok(())
}
