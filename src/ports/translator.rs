//! Translator port for the text translation service.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Source language for every prompt.
pub const SOURCE_LANG: &str = "hi";
/// Target language for every prompt.
pub const TARGET_LANG: &str = "en";

/// A translation request. Serializes directly to the Argos wire body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate.
    pub q: String,
    /// Source language tag.
    pub source: String,
    /// Target language tag.
    pub target: String,
    /// Payload format, always `"text"`.
    pub format: String,
}

impl TranslationRequest {
    /// Build a Hindi to English request for the given text.
    #[must_use]
    pub fn hindi_to_english(text: &str) -> Self {
        Self {
            q: text.to_string(),
            source: SOURCE_LANG.to_string(),
            target: TARGET_LANG.to_string(),
            format: "text".to_string(),
        }
    }
}

/// The translation service's reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResponse {
    /// Translated text, absent when the service returned none.
    #[serde(rename = "translatedText", default)]
    pub translated_text: Option<String>,
}

/// Boxed future type returned by [`Translator::translate`].
pub type TranslateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<TranslationResponse, AppError>> + Send + 'a>>;

/// Translates prompt text via an external API.
pub trait Translator: Send + Sync {
    /// Translate the given request.
    fn translate(&self, request: &TranslationRequest) -> TranslateFuture<'_>;
}
