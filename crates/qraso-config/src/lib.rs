use std::env;

use serde::{Deserialize, Serialize};

use self::capture::CaptureConfig;
use self::network::NetworkConfig;
use self::ui::UiConfig;
use self::upload::UploadConfig;

pub mod capture;
pub mod network;
pub mod ui;
pub mod upload;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub capture: CaptureConfig,
    pub upload: UploadConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        Config {
            network: NetworkConfig::new(),
            capture: CaptureConfig::new(),
            upload: UploadConfig::default(),
            ui: UiConfig::default(),
        }
    }

    /// Re-apply environment overrides on top of a loaded profile
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var(network::BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            self.network = NetworkConfig::with_override(Some(url));
        }

        if let Ok(url) = env::var(capture::SCANNER_WS_ENV)
            && !url.is_empty()
        {
            self.capture.scanner_ws_url = Some(url);
        }
    }
}
