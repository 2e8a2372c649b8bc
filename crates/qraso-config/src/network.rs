use std::env;

use serde::{Deserialize, Serialize};

pub const BASE_URL_ENV: &str = "QRASO_BASE_URL";

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

/// Remote QR analysis backend
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        Self::with_override(env::var(BASE_URL_ENV).ok())
    }

    pub fn with_override(base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(default_base_url);

        Self { base_url }
    }
}
