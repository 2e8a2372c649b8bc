use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default scan text preprocessor
    fn process(&self, text: &str) -> String {
        let mut text = text.trim().to_string();

        if text.is_empty() {
            return text;
        }

        // Unicode normalization (NFC)
        text = text.nfc().collect();

        // Scanners split long payloads across lines
        text = text.replace(['\n', '\r'], "").trim().to_string();

        text
    }
}

pub struct ScanTextPreprocessor;
impl Preprocessor for ScanTextPreprocessor {}
