//! PDF rasterisation: render the first page of a resume via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! `pdfium-render` wraps the pdfium C++ library, which keeps thread-local
//! state and blocks while it renders. The work is moved onto Tokio's
//! blocking pool so an async caller never stalls a worker thread.
//!
//! ## Why only the first page?
//!
//! A resume front-loads the identifying content (name, summary, recent
//! roles). One page keeps the request small and the payload shape fixed.
//! Later pages are never rendered.

use crate::config::ScreenerConfig;
use crate::error::ScreenerError;
use crate::pipeline::encode::{self, EncodedImagePayload};
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Longest edge of the rendered page in pixels.
pub const MAX_RENDERED_PIXELS: u32 = 2000;

/// Leading bytes of every PDF file.
const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// The header may sit anywhere in this many leading bytes.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Converts an uploaded document into the single-page image payload.
pub trait Rasterizer {
    fn rasterize_first_page(
        &self,
        document: &[u8],
    ) -> impl Future<Output = Result<EncodedImagePayload, ScreenerError>> + Send;
}

/// [`Rasterizer`] backed by a locally installed pdfium library.
///
/// The library is bound on every call from the configured path; it is an
/// environment precondition and is never downloaded or substituted.
#[derive(Debug, Clone)]
pub struct PdfiumRasterizer {
    library_path: PathBuf,
}

impl PdfiumRasterizer {
    pub fn new(config: &ScreenerConfig) -> Self {
        Self {
            library_path: resolve_library_path(&config.renderer_path),
        }
    }

    /// Full path of the pdfium library this rasterizer binds to.
    pub fn library_path(&self) -> &Path {
        &self.library_path
    }
}

impl Rasterizer for PdfiumRasterizer {
    async fn rasterize_first_page(
        &self,
        document: &[u8],
    ) -> Result<EncodedImagePayload, ScreenerError> {
        check_pdf_header(document)?;

        let library_path = self.library_path.clone();
        let bytes = document.to_vec();

        let image = tokio::task::spawn_blocking(move || {
            let pdfium = bind_pdfium(&library_path)?;
            render_first_page_blocking(&pdfium, &bytes)
        })
        .await
        .map_err(|e| ScreenerError::Internal(format!("Render task panicked: {}", e)))??;

        let part = encode::encode_page(&image).map_err(|e| ScreenerError::Encode {
            detail: e.to_string(),
        })?;

        Ok(EncodedImagePayload::single(part))
    }
}

/// Accept either a directory holding the platform library or the library
/// file itself.
pub fn resolve_library_path(renderer_path: &Path) -> PathBuf {
    if renderer_path.is_dir() {
        renderer_path.join(Pdfium::pdfium_platform_library_name())
    } else {
        renderer_path.to_path_buf()
    }
}

/// Reject input that cannot be a PDF before touching the native library.
pub fn check_pdf_header(document: &[u8]) -> Result<(), ScreenerError> {
    if document.is_empty() {
        return Err(ScreenerError::Decode {
            detail: "document is empty".into(),
        });
    }
    let head = &document[..document.len().min(HEADER_SEARCH_WINDOW)];
    if !head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC) {
        let shown = &document[..document.len().min(4)];
        return Err(ScreenerError::Decode {
            detail: format!("not a PDF (first bytes: {:?})", shown),
        });
    }
    Ok(())
}

/// Bind to the pdfium library at an explicit path.
pub fn bind_pdfium(library_path: &Path) -> Result<Pdfium, ScreenerError> {
    Pdfium::bind_to_library(library_path)
        .map(Pdfium::new)
        .map_err(|e| ScreenerError::RendererUnavailable {
            path: library_path.to_path_buf(),
            detail: format!("{:?}", e),
        })
}

/// Blocking implementation: load from memory, render page index 0.
pub fn render_first_page_blocking(
    pdfium: &Pdfium,
    document: &[u8],
) -> Result<DynamicImage, ScreenerError> {
    let pdf = pdfium
        .load_pdf_from_byte_slice(document, None)
        .map_err(|e| ScreenerError::Decode {
            detail: format!("{:?}", e),
        })?;

    let pages = pdf.pages();
    let total_pages = pages.len() as usize;
    if total_pages == 0 {
        return Err(ScreenerError::NoPages);
    }
    info!("PDF loaded: {} pages, rendering page 1", total_pages);

    let render_config = PdfRenderConfig::new()
        .set_target_width(MAX_RENDERED_PIXELS as i32)
        .set_maximum_height(MAX_RENDERED_PIXELS as i32);

    let page = pages.get(0).map_err(|e| ScreenerError::Decode {
        detail: format!("page 1: {:?}", e),
    })?;

    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|e| ScreenerError::Decode {
            detail: format!("page 1: {:?}", e),
        })?;

    let image = bitmap.as_image();
    debug!("Rendered page 1 → {}x{} px", image.width(), image.height());

    Ok(image)
}
