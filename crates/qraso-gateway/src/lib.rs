mod client;
mod error;
mod wire;

pub use client::QrBackendClient;
pub use error::{ClassificationError, DashboardError, ReportError};
pub use wire::{MalformedVerdict, parse_verdict};

use qraso_types::{ScanInput, VerdictRecord};

/// Remote QR classification
#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    /// Classify scanned text or an uploaded image.
    ///
    /// Never retries; failures go straight back to the caller.
    async fn submit(&self, input: ScanInput) -> Result<VerdictRecord, ClassificationError>;
}

/// Remote report counter for suspicious URLs
#[async_trait::async_trait]
pub trait Reporter: Send + Sync {
    /// Report a URL. The gateway does not check the verdict label.
    async fn report(&self, url: &str) -> Result<ReportReceipt, ReportError>;
}

/// Read side of the backend's warning list
#[async_trait::async_trait]
pub trait DashboardSource: Send + Sync {
    async fn fetch_warnings(&self) -> Result<Vec<VerdictRecord>, DashboardError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportReceipt {
    pub status: String,
    pub count: u32,
}
