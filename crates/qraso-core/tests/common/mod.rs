//! Deterministic gateway fakes shared by the core tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use qraso_core::{Pipeline, ResultStore, SharedStore};
use qraso_gateway::{
    ClassificationError, Classifier, ReportError, ReportReceipt, Reporter, parse_verdict,
};
use qraso_types::{ScanInput, VerdictRecord};
use serde_json::json;
use tokio::sync::{RwLock, Semaphore};

type Respond = Box<dyn Fn(&ScanInput) -> Result<VerdictRecord, ClassificationError> + Send + Sync>;

pub fn verdict(url: &str, label: &str) -> VerdictRecord {
    parse_verdict(json!({
        "original_url": url,
        "final_url": url,
        "domain": "example.com",
        "ssl_valid": true,
        "label": label
    }))
    .expect("test verdict is well formed")
}

pub fn new_store() -> SharedStore {
    Arc::new(RwLock::new(ResultStore::new()))
}

pub struct FakeClassifier {
    respond: Respond,
    delay: Duration,
    gate: Option<Arc<Semaphore>>,
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub seen: Mutex<Vec<ScanInput>>,
}

impl FakeClassifier {
    /// Echo text input back as a verdict with the given label
    pub fn labelling(label: &'static str) -> Self {
        Self::responding(move |input| {
            let url = match input {
                ScanInput::Text(text) => text.clone(),
                ScanInput::Image(image) => format!("http://from-image/{}", image.file_name),
            };
            Ok(verdict(&url, label))
        })
    }

    pub fn responding<F>(respond: F) -> Self
    where
        F: Fn(&ScanInput) -> Result<VerdictRecord, ClassificationError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            delay: Duration::ZERO,
            gate: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Each call waits for one permit
    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Classifier for FakeClassifier {
    async fn submit(&self, input: ScanInput) -> Result<VerdictRecord, ClassificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = (self.respond)(&input);
        self.seen.lock().unwrap().push(input);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

type ReportRespond = Box<dyn Fn(&str) -> Result<ReportReceipt, ReportError> + Send + Sync>;

pub struct FakeReporter {
    respond: ReportRespond,
    gate: Option<Arc<Semaphore>>,
    pub urls: Mutex<Vec<String>>,
}

impl FakeReporter {
    pub fn counting(count: u32) -> Self {
        Self::responding(move |_| {
            Ok(ReportReceipt {
                status: "신고 완료".to_string(),
                count,
            })
        })
    }

    pub fn failing(message: &'static str) -> Self {
        Self::responding(move |_| Err(ReportError::Rejected(message.to_string())))
    }

    pub fn responding<F>(respond: F) -> Self
    where
        F: Fn(&str) -> Result<ReportReceipt, ReportError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            gate: None,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait::async_trait]
impl Reporter for FakeReporter {
    async fn report(&self, url: &str) -> Result<ReportReceipt, ReportError> {
        self.urls.lock().unwrap().push(url.to_string());
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        (self.respond)(url)
    }
}

pub fn pipeline_with(store: &SharedStore, classifier: Arc<FakeClassifier>) -> Arc<Pipeline> {
    Arc::new(Pipeline::new(store.clone(), classifier))
}

/// Wait until `cond` holds, yielding to other tasks in between
pub async fn wait_for(mut cond: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}
