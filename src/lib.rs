//! # resume-screener
//!
//! Screen a resume against a job description with a vision-capable model.
//!
//! The resume's first page is rasterised with pdfium and sent as an image,
//! so the model sees layout, headings and emphasis exactly as a recruiter
//! would, without any lossy text extraction in between.
//!
//! ## Pipeline Overview
//!
//! ```text
//! resume.pdf
//!  │
//!  ├─ 1. Guard    no document → MissingInput, nothing is called
//!  ├─ 2. Render   page 1 only, via pdfium (spawn_blocking)
//!  ├─ 3. Encode   RGB → JPEG → base64, one-element payload
//!  ├─ 4. Request  [job description, page image, instruction] → Gemini
//!  └─ 5. Output   model text verbatim, labelled by mode
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume_screener::{Mode, Preset, Screener, ScreenerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // GOOGLE_API_KEY and PDFIUM_LIB_PATH are read here, once.
//!     let config = ScreenerConfig::from_env()?;
//!     let screener = Screener::from_config(&config);
//!
//!     let resume = std::fs::read("resume.pdf")?;
//!     let analysis = screener
//!         .screen("Senior Rust engineer, 5+ years", Some(resume.as_slice()), &Mode::Preset(Preset::Fit))
//!         .await?;
//!     println!("{}\n\n{}", analysis.label, analysis.response);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `screener` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! ## Native renderer
//!
//! pdfium is an environment precondition: install a build from
//! <https://github.com/bblanchon/pdfium-binaries> and point
//! `PDFIUM_LIB_PATH` at it (default `/usr/local/lib`). It is never
//! downloaded at runtime.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod screen;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ScreenerConfig, ScreenerConfigBuilder};
pub use error::ScreenerError;
pub use output::Analysis;
pub use pipeline::encode::{EncodedImagePayload, ImagePart};
pub use pipeline::input::load_document;
pub use pipeline::llm::{CompletionRequester, GeminiRequester};
pub use pipeline::render::{PdfiumRasterizer, Rasterizer};
pub use prompts::{Mode, Preset, PromptSpec, DEFAULT_CUSTOM_PROMPT};
pub use screen::Screener;
