//! The value handed back to the presentation layer.

use serde::{Deserialize, Serialize};

/// Result of one screening: the model's text plus how to label it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Mode tag, e.g. `"summary"` or `"custom"`.
    pub mode: String,
    /// Human-readable heading, e.g. `"Resume Summary"`.
    pub label: String,
    /// Generated text, exactly as the model returned it.
    pub response: String,
}

impl Analysis {
    /// The response with newlines replaced by `<br>` for HTML display.
    ///
    /// `\r\n` counts as one break.
    pub fn response_as_html(&self) -> String {
        self.response.replace("\r\n", "\n").replace('\n', "<br>")
    }
}
