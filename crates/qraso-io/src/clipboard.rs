use std::time::Duration;

use anyhow::{Context, bail};
use arboard::Clipboard;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use qraso_types::{ImagePayload, UploadOrigin};
use tokio::time;

const PASTE_FILE_NAME: &str = "clipboard.png";

/// Encode raw RGBA pixels as PNG
pub fn encode_png(width: usize, height: usize, rgba: &[u8]) -> anyhow::Result<Vec<u8>> {
    let width = u32::try_from(width).context("Image too wide")?;
    let height = u32::try_from(height).context("Image too tall")?;
    if rgba.len() as u64 != u64::from(width) * u64::from(height) * 4 {
        bail!("RGBA buffer does not match {width}x{height}");
    }

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(rgba, width, height, image::ExtendedColorType::Rgba8)
        .context("Failed to encode PNG")?;
    Ok(buffer)
}

fn to_payload(image: arboard::ImageData<'_>) -> anyhow::Result<ImagePayload> {
    Ok(ImagePayload {
        bytes: encode_png(image.width, image.height, &image.bytes)?,
        file_name: PASTE_FILE_NAME.to_string(),
        origin: UploadOrigin::Paste,
    })
}

/// Image currently on the clipboard, as a paste upload
pub fn read_clipboard_image() -> anyhow::Result<ImagePayload> {
    let mut clipboard = Clipboard::new()?;
    let image = clipboard
        .get_image()
        .context("No image on the clipboard")?;
    to_payload(image)
}

pub fn copy_text(text: &str) -> anyhow::Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Poll the clipboard and report each new image once.
///
/// Whatever is on the clipboard when watching starts is not reported.
pub async fn watch_clipboard_images<F>(poll: Duration, mut on_image: F) -> anyhow::Result<()>
where
    F: FnMut(ImagePayload) + Send + 'static,
{
    let mut clipboard = Clipboard::new()?;
    let mut last_image: Option<Vec<u8>> = clipboard
        .get_image()
        .ok()
        .map(|image| image.bytes.into_owned());

    let mut interval = time::interval(poll);

    loop {
        interval.tick().await;
        if let Ok(image) = clipboard.get_image()
            && !image.bytes.is_empty()
            && last_image.as_deref() != Some(image.bytes.as_ref())
        {
            last_image = Some(image.bytes.to_vec());
            match to_payload(image) {
                Ok(payload) => on_image(payload),
                Err(e) => tracing::warn!("Skipping clipboard image: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_rgba_as_png() {
        let pixels = [255u8, 0, 0, 255, 0, 255, 0, 255];

        let png = encode_png(2, 1, &pixels).unwrap();

        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(encode_png(4, 4, &[0u8; 3]).is_err());
    }
}
