use qraso_types::{RiskLabel, VerdictRecord, VirusTotalScore};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum MalformedVerdict {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing original_url")]
    MissingOriginalUrl,
}

/// Turn a decode response into a `VerdictRecord`.
///
/// Only `original_url` is mandatory. Nulls become empty strings or `None`,
/// and booleans stored as 0/1 by the backend database are accepted.
pub fn parse_verdict(value: Value) -> Result<VerdictRecord, MalformedVerdict> {
    let Value::Object(fields) = value else {
        return Err(MalformedVerdict::NotAnObject(kind(&value)));
    };

    let original_url = text(fields.get("original_url"))
        .filter(|url| !url.trim().is_empty())
        .ok_or(MalformedVerdict::MissingOriginalUrl)?;

    Ok(VerdictRecord {
        original_url,
        final_url: text(fields.get("final_url")).unwrap_or_default(),
        domain: text(fields.get("domain")).unwrap_or_default(),
        ssl_valid: flag(fields.get("ssl_valid")).unwrap_or(false),
        whois_creation_date: text(fields.get("whois_creation_date")),
        virustotal_score: fields
            .get("virustotal_score")
            .and_then(|v| serde_json::from_value::<VirusTotalScore>(v.clone()).ok()),
        phishtank_result: flag(fields.get("phishtank_result")),
        label: RiskLabel::from_wire(fields.get("label")),
    })
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn flag(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
