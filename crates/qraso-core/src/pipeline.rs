use std::sync::Arc;

use kanal::AsyncSender;
use qraso_gateway::{ClassificationError, Classifier, parse_verdict};
use qraso_types::{AppEvent, EntryId, Notice, ScanInput, ScanPayload, VerdictRecord};

use crate::preprocess::{Preprocessor, ScanTextPreprocessor};
use crate::store::SharedStore;

/// Local input that never reaches the gateway
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputRejected {
    #[error("scan text is empty")]
    EmptyText,

    #[error("no file selected")]
    NoFile,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Rejected(#[from] InputRejected),

    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

impl SubmitError {
    /// Notice to show, or `None` for outcomes that stay silent
    /// (local rejection and malformed verdicts)
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Rejected(_) => None,
            Self::Classification(e) if e.is_malformed() => None,
            Self::Classification(e) => Some(Notice::error(e.user_message())),
        }
    }
}

/// Input → classification → result store
pub struct Pipeline {
    store: SharedStore,
    classifier: Arc<dyn Classifier>,
    preprocessor: ScanTextPreprocessor,
}

impl Pipeline {
    pub fn new(store: SharedStore, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            store,
            classifier,
            preprocessor: ScanTextPreprocessor,
        }
    }

    /// Normalize scan text and reject input that has nothing to submit
    pub fn validate(&self, input: ScanInput) -> Result<ScanInput, InputRejected> {
        match input {
            ScanInput::Text(text) => {
                let text = self.preprocessor.process(&text);
                if text.is_empty() {
                    return Err(InputRejected::EmptyText);
                }
                Ok(ScanInput::Text(text))
            }
            ScanInput::Image(image) => {
                if image.bytes.is_empty() {
                    return Err(InputRejected::NoFile);
                }
                Ok(ScanInput::Image(image))
            }
        }
    }

    /// Classify one input and append the verdict. No retries.
    pub async fn submit(&self, input: ScanInput) -> Result<EntryId, SubmitError> {
        let input = self.validate(input).inspect_err(|e| {
            tracing::debug!("Input rejected locally: {}", e);
        })?;

        match self.classifier.submit(input).await {
            Ok(record) => Ok(self.append(record).await),
            Err(e) => {
                if e.is_malformed() {
                    tracing::warn!("Dropping malformed verdict: {}", e);
                } else {
                    tracing::error!("Classification failed: {}", e);
                }
                Err(e.into())
            }
        }
    }

    /// Accept either raw scan text or a decode response produced upstream
    pub async fn ingest(&self, payload: ScanPayload) -> Result<EntryId, SubmitError> {
        match payload {
            ScanPayload::Text(text) => self.submit(ScanInput::Text(text)).await,
            ScanPayload::Decoded(value) => match parse_verdict(value) {
                Ok(record) => Ok(self.append(record).await),
                Err(e) => {
                    tracing::warn!("Dropping malformed decode response: {}", e);
                    Err(ClassificationError::from(e).into())
                }
            },
        }
    }

    async fn append(&self, record: VerdictRecord) -> EntryId {
        let url = record.original_url.clone();
        let label = record.label;
        let id = self.store.write().await.append(record);
        tracing::info!("Stored {} {} as {}", label, url, id);
        id
    }

    /// Push the result of a submission to the presentation side
    pub async fn publish_outcome(
        &self,
        events: &AsyncSender<AppEvent>,
        outcome: &Result<EntryId, SubmitError>,
    ) {
        let event = match outcome {
            Ok(_) => AppEvent::ShowEntries(self.store.read().await.list_all()),
            Err(e) => match e.notice() {
                Some(notice) => AppEvent::Notify(notice),
                None => return,
            },
        };

        if let Err(e) = events.send(event).await {
            tracing::error!("Failed to publish submission outcome: {}", e);
        }
    }
}
