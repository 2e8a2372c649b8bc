use std::fmt;

use serde::Deserialize;

/// Report count at which the backend promotes a suspicious URL to its warning list
pub const ESCALATION_THRESHOLD: u32 = 3;

/// Four-valued risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RiskLabel {
    Safe,
    Suspicious,
    Dangerous,
    #[default]
    Unknown,
}

impl RiskLabel {
    /// Map a backend label to a known variant.
    ///
    /// The backend speaks Korean ("안전", "의심", "위험"); the English names are
    /// accepted as aliases. Everything else degrades to `Unknown`.
    pub fn from_wire(value: Option<&serde_json::Value>) -> Self {
        match value.and_then(|v| v.as_str()) {
            Some(label) => Self::from_label(label),
            None => Self::Unknown,
        }
    }

    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        match label {
            "안전" => Self::Safe,
            "의심" => Self::Suspicious,
            "위험" => Self::Dangerous,
            _ if label.eq_ignore_ascii_case("safe") => Self::Safe,
            _ if label.eq_ignore_ascii_case("suspicious") => Self::Suspicious,
            _ if label.eq_ignore_ascii_case("dangerous") => Self::Dangerous,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Suspicious => "SUSPICIOUS",
            Self::Dangerous => "DANGEROUS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// VirusTotal result as reported by the backend.
///
/// Either a numeric score or the textual summary the backend builds from the
/// last analysis stats.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VirusTotalScore {
    Score(f64),
    Summary(String),
}

impl fmt::Display for VirusTotalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Score(score) => write!(f, "{score}"),
            Self::Summary(summary) => f.write_str(summary),
        }
    }
}

/// Classification result for one submitted URL or QR payload
#[derive(Debug, Clone, PartialEq)]
pub struct VerdictRecord {
    pub original_url: String,
    pub final_url: String,
    pub domain: String,
    pub ssl_valid: bool,
    pub whois_creation_date: Option<String>,
    pub virustotal_score: Option<VirusTotalScore>,
    pub phishtank_result: Option<bool>,
    pub label: RiskLabel,
}

/// Result store key. Generated locally, never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Locally tracked verdict with its report counter
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisEntry {
    pub id: EntryId,
    pub record: VerdictRecord,
    pub reported_count: u32,
}

impl AnalysisEntry {
    pub fn new(id: EntryId, record: VerdictRecord) -> Self {
        Self {
            id,
            record,
            reported_count: 0,
        }
    }

    /// Only suspicious verdicts may be reported
    pub fn is_reportable(&self) -> bool {
        self.record.label == RiskLabel::Suspicious
    }

    pub fn is_escalated(&self) -> bool {
        self.reported_count >= ESCALATION_THRESHOLD
    }
}

/// 1-based row number of a dashboard fetch. Re-derived on every fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayIndex(pub usize);

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRow {
    pub index: DisplayIndex,
    pub record: VerdictRecord,
}
