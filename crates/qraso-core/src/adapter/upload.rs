use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use kanal::{AsyncReceiver, AsyncSender};
use qraso_types::{AppEvent, ImagePayload, ScanInput, UploadOrigin};

use crate::flight::SingleFlight;
use crate::pipeline::{InputRejected, Pipeline};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EnqueueError {
    #[error(transparent)]
    Rejected(#[from] InputRejected),

    #[error("upload queue is closed")]
    Closed,
}

/// File upload surface: explicit selection, drag-and-drop and paste.
///
/// All three entry points share one FIFO queue drained by a single worker,
/// so one adapter never has two uploads in flight. Triggers that arrive
/// while an upload runs wait their turn.
pub struct FileAdapter {
    queue: AsyncSender<ImagePayload>,
    flight: Arc<SingleFlight>,
    pending: Arc<AtomicUsize>,
}

impl FileAdapter {
    /// Spawn the upload worker. Outcomes are published on `events`.
    pub fn spawn(pipeline: Arc<Pipeline>, events: AsyncSender<AppEvent>) -> Self {
        let (queue, rx) = kanal::unbounded_async();
        let flight = SingleFlight::new();
        let pending = Arc::new(AtomicUsize::new(0));

        tokio::spawn(run_queue(
            rx,
            pipeline,
            events,
            flight.clone(),
            pending.clone(),
        ));

        Self {
            queue,
            flight,
            pending,
        }
    }

    pub fn select(&self, bytes: Vec<u8>, file_name: String) -> Result<(), EnqueueError> {
        self.enqueue(ImagePayload {
            bytes,
            file_name,
            origin: UploadOrigin::Selection,
        })
    }

    pub fn drop_file(&self, bytes: Vec<u8>, file_name: String) -> Result<(), EnqueueError> {
        self.enqueue(ImagePayload {
            bytes,
            file_name,
            origin: UploadOrigin::Drop,
        })
    }

    pub fn paste(&self, bytes: Vec<u8>, file_name: String) -> Result<(), EnqueueError> {
        self.enqueue(ImagePayload {
            bytes,
            file_name,
            origin: UploadOrigin::Paste,
        })
    }

    pub fn enqueue(&self, payload: ImagePayload) -> Result<(), EnqueueError> {
        if payload.bytes.is_empty() {
            tracing::debug!("Ignoring empty {} upload", payload.origin);
            return Err(InputRejected::NoFile.into());
        }

        tracing::debug!(
            "Queueing '{}' from {} ({} ahead)",
            payload.file_name,
            payload.origin,
            self.queued()
        );

        self.pending.fetch_add(1, Ordering::SeqCst);
        match self.queue.try_send(payload) {
            Ok(true) => Ok(()),
            _ => {
                self.pending.fetch_sub(1, Ordering::SeqCst);
                Err(EnqueueError::Closed)
            }
        }
    }

    /// An upload is currently talking to the gateway
    pub fn is_busy(&self) -> bool {
        self.flight.is_busy()
    }

    /// Uploads accepted but not finished, including the running one
    pub fn queued(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

async fn run_queue(
    rx: AsyncReceiver<ImagePayload>,
    pipeline: Arc<Pipeline>,
    events: AsyncSender<AppEvent>,
    flight: Arc<SingleFlight>,
    pending: Arc<AtomicUsize>,
) {
    while let Ok(payload) = rx.recv().await {
        let outcome = {
            let guard = flight.try_acquire();
            debug_assert!(guard.is_some(), "upload worker overlapped itself");

            send_status(&events, true, pending.load(Ordering::SeqCst)).await;

            tracing::info!("Uploading '{}' ({})", payload.file_name, payload.origin);
            pipeline.submit(ScanInput::Image(payload)).await
        };

        let queued = pending.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);

        pipeline.publish_outcome(&events, &outcome).await;
        send_status(&events, false, queued).await;
    }

    tracing::debug!("Upload queue closed");
}

async fn send_status(events: &AsyncSender<AppEvent>, busy: bool, queued: usize) {
    if let Err(e) = events.send(AppEvent::UploadStatus { busy, queued }).await {
        tracing::error!("Failed to send upload status to UI: {}", e);
    }
}
