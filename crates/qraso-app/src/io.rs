use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use qraso_core::AppState;
use qraso_types::AppEvent;
use tokio_util::sync::CancellationToken;

/// Background input sources: the scanner feed and the clipboard image watcher.
///
/// Detections are forwarded to the event loop like any other user action.
pub async fn watcher_io(
    state: Arc<AppState>,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (scanner_ws_url, watch_clipboard, poll) = {
        let config = state.config.read().await;
        (
            config
                .capture
                .scanner_ws_url
                .clone()
                .filter(|_| config.capture.enabled),
            config.upload.watch_clipboard,
            Duration::from_millis(config.upload.clipboard_poll_ms),
        )
    };

    let mut feed = None;
    if let Some(url) = scanner_ws_url {
        tracing::info!("Starting scanner feed listener on {}", url);

        let tx = event_tx.clone();
        let listener = qraso_io::ws::start_ws_listener(&url, move |payload| {
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Err(e) = tx.send(AppEvent::ScanDetected(payload)).await {
                    tracing::error!("Failed to send scanner detection to app: {}", e);
                }
            });
        })
        .await;

        match listener {
            Ok(handle) => feed = Some(handle),
            Err(e) => tracing::error!("Scanner feed unavailable: {}", e),
        }
    }

    if watch_clipboard {
        tracing::info!("Starting clipboard image watcher");

        let tx = event_tx.clone();
        tokio::select! {
            result = qraso_io::clipboard::watch_clipboard_images(poll, move |image| {
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = tx.send(AppEvent::ImageInput(image)).await {
                        tracing::error!("Failed to send clipboard image to app: {}", e);
                    }
                });
            }) => {
                if let Err(e) = result {
                    tracing::error!("Clipboard watcher error: {}", e);
                }
                cancel.cancelled().await;
            }
            _ = cancel.cancelled() => {
                tracing::info!("Clipboard watcher stopping");
            }
        }
    } else {
        cancel.cancelled().await;
    }

    if let Some(feed) = feed {
        feed.abort();
        tracing::info!("Scanner feed listener stopping");
    }

    Ok(())
}
