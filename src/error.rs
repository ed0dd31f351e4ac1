//! Error types for the resume-screener library.
//!
//! Every screening either fully succeeds or fully fails, so there is a single
//! fatal error type, [`ScreenerError`]. Nothing is retried locally: the
//! variants are grouped by where they originate so the presentation layer
//! can word its message, and that is all.
//!
//! * Input — no document, or the uploaded file could not be read.
//! * Document — the bytes are not a renderable PDF.
//! * Service — the generative model rejected or failed the call.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the resume-screener library.
#[derive(Debug, Error)]
pub enum ScreenerError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// An analysis was requested but no resume was uploaded.
    #[error("No resume uploaded.\nPlease upload a resume PDF file.")]
    MissingInput,

    /// The uploaded file path does not exist.
    #[error("Resume file not found: '{path}'\nCheck the path exists and is readable.")]
    DocumentNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── Document errors ───────────────────────────────────────────────────
    /// Bytes could not be parsed or rendered as a PDF.
    #[error("Could not decode the resume as a PDF: {detail}")]
    Decode { detail: String },

    /// The PDF parsed but contains no pages.
    #[error("The resume PDF contains no pages")]
    NoPages,

    /// The rendered page could not be encoded as JPEG.
    #[error("Image encoding failed: {detail}")]
    Encode { detail: String },

    /// pdfium could not be loaded from the configured renderer path.
    #[error(
        "Failed to bind to the pdfium library at '{path}': {detail}\n\n\
The native renderer must be installed before screening.\n\
  • Set PDFIUM_LIB_PATH to the directory holding libpdfium (or the library file).\n\
  • Pre-built libraries: https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    RendererUnavailable { path: PathBuf, detail: String },

    // ── Service errors ────────────────────────────────────────────────────
    /// The API credential is missing or was rejected.
    #[error("Authentication with the model service failed: {detail}\nSet GOOGLE_API_KEY (or GEMINI_API_KEY).")]
    Authentication { detail: String },

    /// Transport failure or a non-auth error status from the model service.
    #[error("Model service unavailable{}: {detail}", http_status_suffix(.status))]
    ServiceUnavailable { status: Option<u16>, detail: String },

    /// The service answered but returned no candidate text.
    #[error("Model service returned no text (the response may have been blocked)")]
    EmptyCompletion,

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn http_status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl ScreenerError {
    /// `true` for errors raised before any external capability was invoked
    /// because the caller supplied nothing to screen.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, ScreenerError::MissingInput)
    }
}
