use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::verdict::{AnalysisEntry, DashboardRow, EntryId};

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Capture source detected a code
    ScanDetected(ScanPayload),
    /// Text typed at the prompt; arms the capture session for one detection
    ManualScan(String),
    /// File chosen explicitly or dropped onto the terminal
    UploadPath {
        path: PathBuf,
        origin: UploadOrigin,
    },
    /// Image bytes ready for upload (clipboard paste)
    ImageInput(ImagePayload),
    /// Read an image from the clipboard right now
    PasteClipboard,
    ReportEntry(EntryId),
    DeleteEntry(EntryId),
    DeleteAll,
    CopyUrl(EntryId),
    RefreshEntries,
    LoadDashboard,
    Capture(CaptureCommand),
    UiEvent(UiEvent),

    ShowEntries(Vec<AnalysisEntry>),
    ShowDashboard(Vec<DashboardRow>),
    Notify(Notice),
    CaptureStatus {
        scanning: bool,
        facing: FacingMode,
        last_scanned: Option<String>,
    },
    UploadStatus {
        busy: bool,
        queued: usize,
    },
    BackendReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCommand {
    Start,
    Stop,
    Flip,
}

/// What a capture source hands over on detection
#[derive(Debug, Clone, PartialEq)]
pub enum ScanPayload {
    /// Raw decoded text, to be classified
    Text(String),
    /// Structured decode response produced upstream
    Decoded(serde_json::Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOrigin {
    Selection,
    Drop,
    Paste,
}

impl fmt::Display for UploadOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadOrigin::Selection => "selection",
            UploadOrigin::Drop => "drop",
            UploadOrigin::Paste => "paste",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub origin: UploadOrigin,
}

/// Input accepted by the classification gateway
#[derive(Debug, Clone, PartialEq)]
pub enum ScanInput {
    Text(String),
    Image(ImagePayload),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// "user"
    Front,
    /// "environment"
    #[default]
    Back,
}

impl FacingMode {
    pub fn flipped(self) -> Self {
        match self {
            FacingMode::Front => FacingMode::Back,
            FacingMode::Back => FacingMode::Front,
        }
    }

    pub fn constraint(self) -> &'static str {
        match self {
            FacingMode::Front => "user",
            FacingMode::Back => "environment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Blocking user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
