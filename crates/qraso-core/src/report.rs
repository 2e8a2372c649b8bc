use std::sync::Arc;

use qraso_gateway::{ReportError, Reporter};
use qraso_types::EntryId;

use crate::flight::KeyedFlight;
use crate::store::{ReportCountUpdate, SharedStore};

#[derive(Debug, thiserror::Error)]
pub enum ReportFlowError {
    #[error("no entry {0}")]
    UnknownEntry(EntryId),

    #[error("report for {0} already in progress")]
    InFlight(EntryId),

    #[error(transparent)]
    Gateway(#[from] ReportError),
}

impl ReportFlowError {
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownEntry(_) => "That result no longer exists.".to_string(),
            Self::InFlight(_) => "A report for this result is already being sent.".to_string(),
            Self::Gateway(e) => e.user_message(),
        }
    }
}

/// Sends reports and feeds the returned count back into the store
pub struct ReportDesk {
    store: SharedStore,
    reporter: Arc<dyn Reporter>,
    flights: Arc<KeyedFlight<EntryId>>,
}

impl ReportDesk {
    pub fn new(store: SharedStore, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            store,
            reporter,
            flights: KeyedFlight::new(),
        }
    }

    pub fn in_flight(&self, id: EntryId) -> bool {
        self.flights.in_flight(&id)
    }

    /// Report the entry's URL. Returns the count now stored for the entry,
    /// which never drops below what was already recorded.
    ///
    /// On failure the stored count is left untouched.
    pub async fn report(&self, id: EntryId) -> Result<u32, ReportFlowError> {
        let _guard = self
            .flights
            .try_acquire(id)
            .ok_or(ReportFlowError::InFlight(id))?;

        let url = {
            let store = self.store.read().await;
            let entry = store.get(id).ok_or(ReportFlowError::UnknownEntry(id))?;
            if !entry.is_reportable() {
                tracing::debug!("Reporting {} labelled {}", id, entry.record.label);
            }
            entry.record.original_url.clone()
        };

        let receipt = self.reporter.report(&url).await.inspect_err(|e| {
            tracing::error!("Report for {} failed: {}", url, e);
        })?;

        let count = match self.store.write().await.update_report_count(id, receipt.count) {
            ReportCountUpdate::Applied { previous, current } => {
                tracing::info!("Reported {}: count {} -> {}", url, previous, current);
                current
            }
            ReportCountUpdate::Stale { current, .. } => current,
            ReportCountUpdate::Missing => {
                tracing::debug!("{} was deleted while its report was in flight", id);
                receipt.count
            }
        };

        Ok(count)
    }
}
