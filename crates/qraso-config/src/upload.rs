use serde::{Deserialize, Serialize};

fn default_watch_clipboard() -> bool {
    false
}

fn default_clipboard_poll_ms() -> u64 {
    500
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct UploadConfig {
    /// Submit images that appear on the clipboard without an explicit paste
    #[serde(default = "default_watch_clipboard")]
    pub watch_clipboard: bool,
    #[serde(default = "default_clipboard_poll_ms")]
    pub clipboard_poll_ms: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            watch_clipboard: default_watch_clipboard(),
            clipboard_poll_ms: default_clipboard_poll_ms(),
        }
    }
}
