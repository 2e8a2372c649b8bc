use std::path::Path;

use anyhow::{Context, bail};
use qraso_types::{ImagePayload, UploadOrigin};

/// Read an image file for upload. Emptiness is left to the upload adapter.
pub async fn read_image(path: &Path, origin: UploadOrigin) -> anyhow::Result<ImagePayload> {
    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Cannot open {}", path.display()))?;
    if metadata.is_dir() {
        bail!("{} is a directory", path.display());
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    tracing::debug!("Read {} bytes from {file_name} ({origin})", bytes.len());

    Ok(ImagePayload {
        bytes,
        file_name,
        origin,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn reads_bytes_and_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&[1, 2, 3])
            .unwrap();

        let payload = read_image(&path, UploadOrigin::Drop).await.unwrap();

        assert_eq!(payload.bytes, [1, 2, 3]);
        assert_eq!(payload.file_name, "code.png");
        assert_eq!(payload.origin, UploadOrigin::Drop);
    }

    #[tokio::test]
    async fn directories_and_missing_files_fail() {
        let dir = tempfile::tempdir().unwrap();

        let err = read_image(dir.path(), UploadOrigin::Selection)
            .await
            .unwrap_err();
        assert!(err.to_string().ends_with("is a directory"));

        let missing = dir.path().join("nope.png");
        assert!(read_image(&missing, UploadOrigin::Selection).await.is_err());
    }

    #[tokio::test]
    async fn empty_file_is_read_as_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let payload = read_image(file.path(), UploadOrigin::Selection)
            .await
            .unwrap();

        assert!(payload.bytes.is_empty());
    }
}
