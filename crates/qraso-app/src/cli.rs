use clap::Parser;
use qraso_config::Config;
use qraso_config::network::NetworkConfig;

#[derive(Parser, Debug)]
#[command(name = "qraso")]
#[command(about = "Check QR codes against a phishing analysis backend", version)]
pub struct Cli {
    /// Profile to load from the config directory
    #[arg(long, default_value = "main")]
    pub profile: String,

    /// Analysis backend, e.g. http://localhost:5000
    #[arg(long)]
    pub base_url: Option<String>,

    /// WebSocket feed delivering scanned codes
    #[arg(long)]
    pub scanner_ws: Option<String>,

    /// Upload images as soon as they appear on the clipboard
    #[arg(long)]
    pub watch_clipboard: bool,

    /// Log as JSON even on a terminal
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Flags win over profile and environment
    pub fn apply(&self, config: &mut Config) {
        if self.base_url.is_some() {
            config.network = NetworkConfig::with_override(self.base_url.clone());
        }
        if let Some(url) = &self.scanner_ws {
            config.capture.scanner_ws_url = Some(url.clone());
        }
        if self.watch_clipboard {
            config.upload.watch_clipboard = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_profile_values() {
        let cli = Cli::parse_from([
            "qraso",
            "--base-url",
            "http://qr.local:8080",
            "--scanner-ws",
            "ws://127.0.0.1:9001",
            "--watch-clipboard",
        ]);
        let mut config = Config::default();

        cli.apply(&mut config);

        assert_eq!(config.network.base_url, "http://qr.local:8080");
        assert_eq!(
            config.capture.scanner_ws_url.as_deref(),
            Some("ws://127.0.0.1:9001")
        );
        assert!(config.upload.watch_clipboard);
        assert_eq!(cli.profile, "main");
    }

    #[test]
    fn absent_flags_leave_config_alone() {
        let cli = Cli::parse_from(["qraso", "--profile", "work"]);
        let mut config = Config::default();
        config.network.base_url = "http://from-profile".to_string();

        cli.apply(&mut config);

        assert_eq!(config.network.base_url, "http://from-profile");
        assert!(!config.upload.watch_clipboard);
        assert_eq!(cli.profile, "work");
    }
}
