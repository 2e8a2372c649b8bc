use std::sync::Arc;

use kanal::AsyncSender;
use qraso_core::{AppState, CaptureAdapter, FileAdapter, Pipeline, ReportDesk};
use qraso_gateway::{Classifier, DashboardSource, QrBackendClient, Reporter};
use qraso_types::{AppEvent, Notice};

/// Everything the event handlers share, built once per session
#[derive(Clone)]
pub struct ScanContext {
    pub state: Arc<AppState>,
    pub event_tx: AsyncSender<AppEvent>,
    pub pipeline: Arc<Pipeline>,
    pub capture: Arc<CaptureAdapter>,
    pub uploads: Arc<FileAdapter>,
    pub reports: Arc<ReportDesk>,
    pub dashboard: Arc<dyn DashboardSource>,
}

impl ScanContext {
    /// Wire every gateway to the HTTP backend from the current config
    pub async fn connect(state: Arc<AppState>, event_tx: AsyncSender<AppEvent>) -> Self {
        let base_url = state.config.read().await.network.base_url.clone();
        tracing::info!("Using analysis backend at {}", base_url);

        let backend = Arc::new(QrBackendClient::new(base_url));
        Self::with_gateways(state, event_tx, backend.clone(), backend.clone(), backend).await
    }

    pub async fn with_gateways(
        state: Arc<AppState>,
        event_tx: AsyncSender<AppEvent>,
        classifier: Arc<dyn Classifier>,
        reporter: Arc<dyn Reporter>,
        dashboard: Arc<dyn DashboardSource>,
    ) -> Self {
        let capture_config = state.config.read().await.capture.clone();
        let pipeline = Arc::new(Pipeline::new(state.store.clone(), classifier));

        Self {
            capture: Arc::new(CaptureAdapter::new(pipeline.clone(), &capture_config)),
            uploads: Arc::new(FileAdapter::spawn(pipeline.clone(), event_tx.clone())),
            reports: Arc::new(ReportDesk::new(state.store.clone(), reporter)),
            dashboard,
            pipeline,
            event_tx,
            state,
        }
    }

    pub async fn notify(&self, notice: Notice) {
        if let Err(e) = self.event_tx.send(AppEvent::Notify(notice)).await {
            tracing::error!("Failed to send notice to UI: {}", e);
        }
    }

    /// Push the current store snapshot to the UI
    pub async fn show_entries(&self) -> anyhow::Result<()> {
        let entries = self.state.store.read().await.list_all();
        self.event_tx.send(AppEvent::ShowEntries(entries)).await?;
        Ok(())
    }
}
