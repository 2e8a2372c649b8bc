use crate::wire::MalformedVerdict;

const CLASSIFICATION_FAILED: &str =
    "An error occurred while analyzing the QR code. Check that the server is running.";
const REPORT_FAILED: &str = "Report failed.";
const DASHBOARD_FAILED: &str = "Could not load the reported URL dashboard.";

#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Backend error: {0}")]
    Rejected(String),

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("Malformed verdict: {0}")]
    Malformed(#[from] MalformedVerdict),
}

impl ClassificationError {
    /// Message shown to the user: the backend's own text when it sent one
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            _ => CLASSIFICATION_FAILED.to_string(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Backend error: {0}")]
    Rejected(String),

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("Malformed report response: {0}")]
    Malformed(String),
}

impl ReportError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            _ => REPORT_FAILED.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Backend error: {0}")]
    Rejected(String),

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("Malformed dashboard response: {0}")]
    Malformed(String),
}

impl DashboardError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) => format!("{DASHBOARD_FAILED} ({message})"),
            _ => DASHBOARD_FAILED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_wins_over_generic_text() {
        let err = ReportError::Rejected("already reported".to_string());
        assert_eq!(err.user_message(), "already reported");

        let err = ReportError::HttpStatus(500);
        assert_eq!(err.user_message(), REPORT_FAILED);
    }

    #[test]
    fn malformed_classification_is_flagged() {
        let err = ClassificationError::from(MalformedVerdict::MissingOriginalUrl);
        assert!(err.is_malformed());
        assert_eq!(err.user_message(), CLASSIFICATION_FAILED);
    }
}
