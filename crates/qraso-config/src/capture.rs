use std::env;

use qraso_types::FacingMode;
use serde::{Deserialize, Serialize};

pub const SCANNER_WS_ENV: &str = "QRASO_SCANNER_WS";

fn default_enabled() -> bool {
    true
}

fn default_stop_after_scan() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct CaptureConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub facing: FacingMode,
    /// Disarm the capture session once a detection has been resolved
    #[serde(default = "default_stop_after_scan")]
    pub stop_after_scan: bool,
    /// WebSocket feed delivering scanned codes
    pub scanner_ws_url: Option<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            facing: FacingMode::default(),
            stop_after_scan: default_stop_after_scan(),
            scanner_ws_url: None,
        }
    }
}

impl CaptureConfig {
    pub fn new() -> Self {
        Self {
            scanner_ws_url: env::var(SCANNER_WS_ENV).ok().filter(|url| !url.is_empty()),
            ..Self::default()
        }
    }
}
