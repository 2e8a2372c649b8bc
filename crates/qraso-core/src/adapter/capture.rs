use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use qraso_config::capture::CaptureConfig;
use qraso_types::{AppEvent, EntryId, FacingMode, ScanPayload};

use crate::flight::SingleFlight;
use crate::pipeline::{Pipeline, SubmitError};
use crate::preprocess::{Preprocessor, ScanTextPreprocessor};

#[derive(Debug)]
pub enum CaptureOutcome {
    /// Session not armed, or nothing to submit
    Ignored,
    /// A previous detection is still being resolved
    Busy,
    Completed(Result<EntryId, SubmitError>),
}

/// Continuous capture surface.
///
/// Detections arrive as a stream; while one is being classified every further
/// detection is rejected, not queued.
pub struct CaptureAdapter {
    pipeline: Arc<Pipeline>,
    flight: Arc<SingleFlight>,
    scanning: AtomicBool,
    stop_after_scan: bool,
    facing: Mutex<FacingMode>,
    last_scanned: Mutex<Option<String>>,
}

impl CaptureAdapter {
    pub fn new(pipeline: Arc<Pipeline>, config: &CaptureConfig) -> Self {
        Self {
            pipeline,
            flight: SingleFlight::new(),
            scanning: AtomicBool::new(false),
            stop_after_scan: config.stop_after_scan,
            facing: Mutex::new(config.facing),
            last_scanned: Mutex::new(None),
        }
    }

    pub fn start(&self) {
        self.scanning.store(true, Ordering::SeqCst);
        tracing::info!("Capture session armed ({})", self.facing().constraint());
    }

    pub fn stop(&self) {
        self.scanning.store(false, Ordering::SeqCst);
        tracing::info!("Capture session stopped");
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.flight.is_busy()
    }

    pub fn facing(&self) -> FacingMode {
        *self.facing.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Front/back switch. Has no effect on how detections are handled.
    pub fn toggle_facing(&self) -> FacingMode {
        let mut facing = self.facing.lock().unwrap_or_else(|e| e.into_inner());
        *facing = facing.flipped();
        *facing
    }

    pub fn last_scanned(&self) -> Option<String> {
        self.last_scanned
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn status(&self) -> AppEvent {
        AppEvent::CaptureStatus {
            scanning: self.is_scanning(),
            facing: self.facing(),
            last_scanned: self.last_scanned(),
        }
    }

    pub async fn on_detect(&self, payload: ScanPayload) -> CaptureOutcome {
        if !self.is_scanning() {
            return CaptureOutcome::Ignored;
        }

        let (payload, scanned) = match payload {
            ScanPayload::Text(text) => {
                let text = ScanTextPreprocessor.process(&text);
                if text.is_empty() {
                    return CaptureOutcome::Ignored;
                }
                (ScanPayload::Text(text.clone()), Some(text))
            }
            ScanPayload::Decoded(value) => {
                let url = value
                    .get("original_url")
                    .and_then(|v| v.as_str())
                    .map(str::to_string);
                (ScanPayload::Decoded(value), url)
            }
        };

        let Some(_guard) = self.flight.try_acquire() else {
            tracing::debug!("Detection dropped, previous scan still resolving");
            return CaptureOutcome::Busy;
        };

        if let Some(scanned) = scanned {
            tracing::info!("Scanned: {}", scanned);
            *self.last_scanned.lock().unwrap_or_else(|e| e.into_inner()) = Some(scanned);
        }

        let result = self.pipeline.ingest(payload).await;

        if self.stop_after_scan {
            self.stop();
        }

        CaptureOutcome::Completed(result)
    }
}
