//! Input loading: read an uploaded resume from disk into memory.
//!
//! The rasterizer works on bytes, so the presentation layer only needs to
//! hand over the file contents. Content is not inspected here; an empty or
//! non-PDF file is the rasterizer's `Decode` error, not an I/O one.

use crate::error::ScreenerError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Read the whole document at `path`.
pub async fn load_document(path: impl AsRef<Path>) -> Result<Vec<u8>, ScreenerError> {
    let path = path.as_ref();

    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ScreenerError::DocumentNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => ScreenerError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ScreenerError::Internal(format!("Failed to read {}: {}", path.display(), e)),
    })?;

    debug!("Loaded {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes)
}
