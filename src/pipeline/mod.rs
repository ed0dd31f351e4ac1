//! Pipeline stages for resume screening.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ encode ──▶ llm
//! (path)    (pdfium)   (base64)   (Gemini)
//! ```
//!
//! 1. [`input`]  — read the uploaded file into memory
//! 2. [`render`] — rasterise page 1 only; runs in `spawn_blocking` because
//!    pdfium is not async-safe. Owns the [`render::Rasterizer`] seam.
//! 3. [`encode`] — JPEG-encode and base64-wrap the page for the request body
//! 4. [`llm`]    — one fire-once call to the model; the only stage with
//!    network I/O. Owns the [`llm::CompletionRequester`] seam.

pub mod encode;
pub mod input;
pub mod llm;
pub mod render;
