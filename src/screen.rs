//! Screening entry points: guard → rasterize → request.
//!
//! A [`Screener`] owns one [`Rasterizer`] and one [`CompletionRequester`].
//! Production code uses [`Screener::from_config`] (pdfium + Gemini); tests
//! inject fakes. Each call is independent: the document is re-rasterised
//! every time and nothing is cached between submissions.

use crate::config::ScreenerConfig;
use crate::error::ScreenerError;
use crate::output::Analysis;
use crate::pipeline::llm::{CompletionRequester, GeminiRequester};
use crate::pipeline::render::{PdfiumRasterizer, Rasterizer};
use crate::prompts::Mode;
use std::time::Instant;
use tracing::{info, warn};

/// Runs one analysis per call with injected capabilities.
#[derive(Debug, Clone)]
pub struct Screener<R, C> {
    rasterizer: R,
    requester: C,
}

impl Screener<PdfiumRasterizer, GeminiRequester> {
    /// Wire the native renderer and the Gemini client from `config`.
    pub fn from_config(config: &ScreenerConfig) -> Self {
        Self::new(PdfiumRasterizer::new(config), GeminiRequester::new(config))
    }
}

impl<R, C> Screener<R, C>
where
    R: Rasterizer,
    C: CompletionRequester,
{
    pub fn new(rasterizer: R, requester: C) -> Self {
        Self {
            rasterizer,
            requester,
        }
    }

    /// Screen `document` against `job_text` using the instruction for `mode`.
    ///
    /// # Errors
    /// - [`ScreenerError::MissingInput`] when `document` is `None`; neither
    ///   capability is invoked.
    /// - Rasterizer errors (`Decode`, `NoPages`, …); the requester is not
    ///   invoked.
    /// - Requester errors (`Authentication`, `ServiceUnavailable`, …).
    pub async fn screen(
        &self,
        job_text: &str,
        document: Option<&[u8]>,
        mode: &Mode,
    ) -> Result<Analysis, ScreenerError> {
        let Some(document) = document else {
            warn!("Screening requested without a resume; nothing sent");
            return Err(ScreenerError::MissingInput);
        };

        let start = Instant::now();
        info!("Screening resume ({} bytes), mode '{}'", document.len(), mode.tag());

        let payload = self.rasterizer.rasterize_first_page(document).await?;
        let instruction = mode.instruction();
        let response = self
            .requester
            .request_completion(job_text, &payload, &instruction)
            .await?;

        info!(
            "Screening complete: {} chars in {}ms",
            response.len(),
            start.elapsed().as_millis()
        );

        Ok(Analysis {
            mode: mode.tag().to_string(),
            label: mode.label().to_string(),
            response,
        })
    }

    /// Synchronous wrapper around [`Screener::screen`].
    ///
    /// Creates a temporary tokio runtime internally; do not call from inside
    /// an async context.
    pub fn screen_sync(
        &self,
        job_text: &str,
        document: Option<&[u8]>,
        mode: &Mode,
    ) -> Result<Analysis, ScreenerError> {
        tokio::runtime::Runtime::new()
            .map_err(|e| ScreenerError::Internal(format!("Failed to create tokio runtime: {}", e)))?
            .block_on(self.screen(job_text, document, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::encode::{EncodedImagePayload, ImagePart, JPEG_MIME_TYPE};
    use crate::pipeline::render::check_pdf_header;
    use crate::prompts::{Preset, HR_SUMMARY};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Returns a fixed image; rejects input the way the real one does.
    #[derive(Default)]
    struct FakeRasterizer {
        calls: AtomicUsize,
    }

    impl Rasterizer for FakeRasterizer {
        async fn rasterize_first_page(
            &self,
            document: &[u8],
        ) -> Result<EncodedImagePayload, ScreenerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            check_pdf_header(document)?;
            Ok(EncodedImagePayload::single(ImagePart {
                mime_type: JPEG_MIME_TYPE.into(),
                data: "cGFnZS0x".into(),
            }))
        }
    }

    /// Records every request and answers with a fixed string or error.
    struct FakeRequester {
        calls: Mutex<Vec<(String, String, String)>>,
        fail_auth: bool,
    }

    impl FakeRequester {
        fn answering() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_auth: false,
            }
        }

        fn rejecting_key() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_auth: true,
            }
        }

        fn calls(&self) -> Vec<(String, String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CompletionRequester for FakeRequester {
        async fn request_completion(
            &self,
            context_text: &str,
            image_payload: &EncodedImagePayload,
            instruction_text: &str,
        ) -> Result<String, ScreenerError> {
            self.calls.lock().unwrap().push((
                context_text.to_string(),
                image_payload.first().data.clone(),
                instruction_text.to_string(),
            ));
            if self.fail_auth {
                return Err(ScreenerError::Authentication {
                    detail: "API key not valid".into(),
                });
            }
            Ok("Candidate is a strong fit.\n".into())
        }
    }

    const RESUME: &[u8] = b"%PDF-1.7 three page resume";

    #[tokio::test]
    async fn summary_mode_sends_job_image_and_hr_summary() {
        let screener = Screener::new(FakeRasterizer::default(), FakeRequester::answering());
        let analysis = screener
            .screen("Senior Rust engineer", Some(RESUME), &Mode::Preset(Preset::Summary))
            .await
            .unwrap();

        assert_eq!(analysis.label, "Resume Summary");
        assert_eq!(analysis.mode, "summary");
        assert_eq!(analysis.response, "Candidate is a strong fit.\n");

        let calls = screener.requester.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "Senior Rust engineer");
        assert_eq!(calls[0].1, "cGFnZS0x");
        assert_eq!(calls[0].2, HR_SUMMARY.instruction());
    }

    #[tokio::test]
    async fn every_preset_forwards_its_exact_instruction() {
        for preset in Preset::ALL {
            let screener = Screener::new(FakeRasterizer::default(), FakeRequester::answering());
            let analysis = screener
                .screen("jd", Some(RESUME), &Mode::from(preset))
                .await
                .unwrap();
            assert_eq!(analysis.label, preset.label());
            assert_eq!(screener.requester.calls()[0].2, preset.spec().instruction());
        }
    }

    #[tokio::test]
    async fn missing_document_makes_zero_calls() {
        let screener = Screener::new(FakeRasterizer::default(), FakeRequester::answering());
        let err = screener
            .screen("jd", None, &Mode::Preset(Preset::Fit))
            .await
            .unwrap_err();

        assert!(err.is_missing_input());
        assert_eq!(screener.rasterizer.calls.load(Ordering::SeqCst), 0);
        assert!(screener.requester.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_document_is_decode_error_and_never_reaches_requester() {
        let screener = Screener::new(FakeRasterizer::default(), FakeRequester::answering());
        let err = screener
            .screen("jd", Some(&[][..]), &Mode::Preset(Preset::Summary))
            .await
            .unwrap_err();

        assert!(matches!(err, ScreenerError::Decode { .. }), "got: {err:?}");
        assert_eq!(screener.rasterizer.calls.load(Ordering::SeqCst), 1);
        assert!(screener.requester.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_custom_prompt_and_job_text_are_still_sent() {
        let screener = Screener::new(FakeRasterizer::default(), FakeRequester::answering());
        let analysis = screener
            .screen("", Some(RESUME), &Mode::Custom(String::new()))
            .await
            .unwrap();

        assert_eq!(analysis.label, "Custom Analysis");
        let calls = screener.requester.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "");
        assert_eq!(calls[0].2, "");
    }

    #[tokio::test]
    async fn requester_errors_propagate_unmodified() {
        let screener = Screener::new(FakeRasterizer::default(), FakeRequester::rejecting_key());
        let err = screener
            .screen("jd", Some(RESUME), &Mode::Preset(Preset::Scoring))
            .await
            .unwrap_err();

        match err {
            ScreenerError::Authentication { detail } => assert_eq!(detail, "API key not valid"),
            other => panic!("expected Authentication, got {other:?}"),
        }
        assert_eq!(screener.requester.calls().len(), 1);
    }

    #[tokio::test]
    async fn repeated_submissions_rasterize_every_time() {
        let screener = Screener::new(FakeRasterizer::default(), FakeRequester::answering());
        let mode = Mode::Preset(Preset::Skills);
        screener.screen("jd", Some(RESUME), &mode).await.unwrap();
        screener.screen("jd", Some(RESUME), &mode).await.unwrap();

        assert_eq!(screener.rasterizer.calls.load(Ordering::SeqCst), 2);
        assert_eq!(screener.requester.calls().len(), 2);
    }

    #[test]
    fn screen_sync_runs_outside_a_runtime() {
        let screener = Screener::new(FakeRasterizer::default(), FakeRequester::answering());
        let analysis = screener
            .screen_sync("jd", Some(RESUME), &Mode::Preset(Preset::SkillsGap))
            .unwrap();
        assert_eq!(analysis.label, "Skills Gap");
    }
}
