//! Process-wide configuration for resume screening.
//!
//! Everything the two external capabilities need (the API credential, the
//! model identifier, and where the native pdfium renderer lives) is read
//! once at process entry into a [`ScreenerConfig`] and then passed by
//! reference. Nothing re-reads the environment after startup.
//!
//! The credential is deliberately *not* validated here: a missing or bad key
//! surfaces as [`ScreenerError::Authentication`] when the model is called.

use crate::error::ScreenerError;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Model identifier sent to the generative-text service.
pub const DEFAULT_MODEL: &str = "gemini-pro-latest";

/// Base URL of the Gemini REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Fallback location of the pdfium library when `PDFIUM_LIB_PATH` is unset.
pub const DEFAULT_RENDERER_PATH: &str = "/usr/local/lib";

/// Environment variables consulted by [`ScreenerConfig::from_env`], in
/// precedence order for the credential.
pub const API_KEY_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];
pub const RENDERER_PATH_VAR: &str = "PDFIUM_LIB_PATH";
pub const MODEL_VAR: &str = "SCREENER_MODEL";
pub const API_BASE_URL_VAR: &str = "SCREENER_API_BASE_URL";

/// Immutable configuration shared by the rasterizer and the requester.
///
/// # Example
/// ```rust
/// use resume_screener::ScreenerConfig;
///
/// let config = ScreenerConfig::builder()
///     .api_key("test-key")
///     .renderer_path("/opt/pdfium/lib")
///     .build()
///     .unwrap();
/// assert_eq!(config.model, "gemini-pro-latest");
/// ```
#[derive(Clone)]
pub struct ScreenerConfig {
    /// Credential for the generative-text service. `None` is allowed at load
    /// time and rejected at call time.
    pub api_key: Option<String>,

    /// Directory containing the platform pdfium library, or the library file
    /// itself. Default: [`DEFAULT_RENDERER_PATH`].
    pub renderer_path: PathBuf,

    /// Model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Service base URL without a trailing slash. Default: [`DEFAULT_API_BASE_URL`].
    pub api_base_url: String,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            renderer_path: PathBuf::from(DEFAULT_RENDERER_PATH),
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl fmt::Debug for ScreenerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("renderer_path", &self.renderer_path)
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl ScreenerConfig {
    /// Create a new builder for `ScreenerConfig`.
    pub fn builder() -> ScreenerConfigBuilder {
        ScreenerConfigBuilder {
            config: Self::default(),
        }
    }

    /// Reopen a resolved configuration for further overrides.
    pub fn into_builder(self) -> ScreenerConfigBuilder {
        ScreenerConfigBuilder { config: self }
    }

    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is applied first if present;
    /// variables already set in the environment win over the file.
    pub fn from_env() -> Result<Self, ScreenerError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ScreenerError::InvalidConfig(format!(
                    "could not read .env file: {e}"
                )))
            }
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ScreenerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut builder = Self::builder();
        if let Some(key) = API_KEY_VARS.iter().find_map(|var| get(var)) {
            builder = builder.api_key(key);
        }
        if let Some(path) = get(RENDERER_PATH_VAR) {
            builder = builder.renderer_path(path);
        }
        if let Some(model) = get(MODEL_VAR) {
            builder = builder.model(model);
        }
        if let Some(url) = get(API_BASE_URL_VAR) {
            builder = builder.api_base_url(url);
        }

        let config = builder.build()?;
        debug!(?config, "Configuration resolved");
        Ok(config)
    }
}

/// Builder for [`ScreenerConfig`].
#[derive(Debug)]
pub struct ScreenerConfigBuilder {
    config: ScreenerConfig,
}

impl ScreenerConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn renderer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.renderer_path = path.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ScreenerConfig, ScreenerError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(ScreenerError::InvalidConfig("model must not be empty".into()));
        }
        if !(c.api_base_url.starts_with("http://") || c.api_base_url.starts_with("https://")) {
            return Err(ScreenerError::InvalidConfig(format!(
                "API base URL must be http(s), got '{}'",
                c.api_base_url
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_any_variables() {
        let config = ScreenerConfig::from_vars(vars(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.renderer_path, PathBuf::from(DEFAULT_RENDERER_PATH));
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn google_key_takes_precedence_over_gemini_key() {
        let config = ScreenerConfig::from_vars(vars(&[
            ("GEMINI_API_KEY", "gemini"),
            ("GOOGLE_API_KEY", "google"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("google"));
    }

    #[test]
    fn gemini_key_used_when_google_key_blank() {
        let config = ScreenerConfig::from_vars(vars(&[
            ("GOOGLE_API_KEY", "  "),
            ("GEMINI_API_KEY", "gemini"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("gemini"));
    }

    #[test]
    fn renderer_path_and_model_overrides() {
        let config = ScreenerConfig::from_vars(vars(&[
            ("PDFIUM_LIB_PATH", "/opt/pdfium/lib"),
            ("SCREENER_MODEL", "gemini-2.5-flash"),
            ("SCREENER_API_BASE_URL", "http://127.0.0.1:9000/"),
        ]))
        .unwrap();
        assert_eq!(config.renderer_path, PathBuf::from("/opt/pdfium/lib"));
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn overrides_through_builder_are_revalidated() {
        let config = ScreenerConfig::from_vars(vars(&[("GOOGLE_API_KEY", "k")])).unwrap();
        let err = config.clone().into_builder().model("").build().unwrap_err();
        assert!(matches!(err, ScreenerError::InvalidConfig(_)));

        let config = config.into_builder().model("gemini-2.5-flash").build().unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn build_rejects_empty_model() {
        let err = ScreenerConfig::builder().model(" ").build().unwrap_err();
        assert!(matches!(err, ScreenerError::InvalidConfig(_)));
    }

    #[test]
    fn build_rejects_non_http_base_url() {
        let err = ScreenerConfig::builder()
            .api_base_url("ftp://example.com")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("ftp://example.com"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ScreenerConfig::builder().api_key("sk-secret").build().unwrap();
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("sk-secret"), "got: {dbg}");
        assert!(dbg.contains("<redacted>"));
    }
}
