//! Live adapter for the Argos Translate API.

use reqwest::Client;

use crate::error::AppError;
use crate::ports::translator::{
    TranslateFuture, TranslationRequest, TranslationResponse, Translator,
};

/// Live translator that calls an Argos Translate (LibreTranslate-compatible) endpoint.
pub struct ArgosTranslator {
    client: Client,
    url: String,
}

impl ArgosTranslator {
    /// Create a new translator posting to the given endpoint.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: Client::new(), url: url.into() }
    }
}

impl Translator for ArgosTranslator {
    fn translate(&self, request: &TranslationRequest) -> TranslateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            tracing::debug!(
                url = %self.url,
                from = %request.source,
                to = %request.target,
                "translating prompt"
            );

            // `.json()` sets `Content-Type: application/json`.
            let response = self.client.post(&self.url).json(&request).send().await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(AppError::Api { status: status.as_u16(), message: response_text });
            }

            serde_json::from_str::<TranslationResponse>(&response_text).map_err(|e| {
                AppError::Api { status: 200, message: format!("Failed to parse response: {e}") }
            })
        })
    }
}
