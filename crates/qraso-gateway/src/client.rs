use async_trait::async_trait;
use qraso_types::{ScanInput, VerdictRecord};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::wire::{MalformedVerdict, parse_verdict};
use crate::{
    ClassificationError, Classifier, DashboardError, DashboardSource, ReportError, ReportReceipt,
    Reporter,
};

/// HTTP client for the QR analysis backend
#[derive(Clone)]
pub struct QrBackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl QrBackendClient {
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl Classifier for QrBackendClient {
    async fn submit(&self, input: ScanInput) -> Result<VerdictRecord, ClassificationError> {
        let request = self.client.post(self.endpoint("decode_qr"));

        let request = match input {
            ScanInput::Text(text) => {
                tracing::debug!("Submitting scanned text ({} chars)", text.len());
                request.json(&json!({ "url": text }))
            }
            ScanInput::Image(image) => {
                tracing::debug!(
                    "Uploading '{}' ({} bytes, {})",
                    image.file_name,
                    image.bytes.len(),
                    image.origin
                );
                let part = Part::bytes(image.bytes).file_name(image.file_name);
                request.multipart(Form::new().part("file", part))
            }
        };

        let (status, body) = read_body(request.send().await?).await?;

        if let Some(message) = error_message(body.as_ref()) {
            return Err(ClassificationError::Rejected(message));
        }

        if !status.is_success() {
            return Err(ClassificationError::HttpStatus(status.as_u16()));
        }

        let body = body.ok_or(MalformedVerdict::NotAnObject("a non-JSON body"))?;
        Ok(parse_verdict(body)?)
    }
}

#[derive(Deserialize)]
struct ReportBody {
    #[serde(default)]
    status: Option<String>,
    current_count: u32,
}

#[async_trait]
impl Reporter for QrBackendClient {
    async fn report(&self, url: &str) -> Result<ReportReceipt, ReportError> {
        let response = self
            .client
            .post(self.endpoint("report_qr"))
            .json(&json!({ "url": url }))
            .send()
            .await?;

        let (status, body) = read_body(response).await?;

        if let Some(message) = error_message(body.as_ref()) {
            return Err(ReportError::Rejected(message));
        }

        if !status.is_success() {
            return Err(ReportError::HttpStatus(status.as_u16()));
        }

        let body = body.ok_or_else(|| ReportError::Malformed("non-JSON body".to_string()))?;
        let parsed: ReportBody =
            serde_json::from_value(body).map_err(|e| ReportError::Malformed(e.to_string()))?;

        Ok(ReportReceipt {
            status: parsed.status.unwrap_or_default(),
            count: parsed.current_count,
        })
    }
}

#[async_trait]
impl DashboardSource for QrBackendClient {
    async fn fetch_warnings(&self) -> Result<Vec<VerdictRecord>, DashboardError> {
        let response = self.client.get(self.endpoint("get_warning")).send().await?;
        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            return Err(match error_message(body.as_ref()) {
                Some(message) => DashboardError::Rejected(message),
                None => DashboardError::HttpStatus(status.as_u16()),
            });
        }

        let Some(Value::Array(rows)) = body else {
            return Err(DashboardError::Malformed("expected a JSON array".to_string()));
        };

        let total = rows.len();
        let records: Vec<VerdictRecord> = rows
            .into_iter()
            .filter_map(|row| match parse_verdict(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping dashboard row: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Dashboard: {} of {} rows usable", records.len(), total);
        Ok(records)
    }
}

/// Read status and body; a body that is not JSON comes back as `None`
async fn read_body(response: reqwest::Response) -> Result<(StatusCode, Option<Value>), reqwest::Error> {
    let status = response.status();
    let bytes = response.bytes().await?;
    Ok((status, serde_json::from_slice(&bytes).ok()))
}

fn error_message(body: Option<&Value>) -> Option<String> {
    body?
        .get("error")?
        .as_str()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
