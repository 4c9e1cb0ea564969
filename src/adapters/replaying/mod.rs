//! Replaying adapter that serves recorded interactions from a cassette.

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::AppError;
use crate::ports::image_generator::{
    GenerateFuture, GeneratedImage, ImageGenerator, ImageRequest,
};
use crate::ports::translator::{
    TranslateFuture, TranslationRequest, TranslationResponse, Translator,
};

/// Serves both ports from one cassette, ignoring request contents.
pub struct Replaying {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl Replaying {
    /// Create a replaying adapter backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl Translator for Replaying {
    fn translate(&self, _request: &TranslationRequest) -> TranslateFuture<'_> {
        let output = next_output(&self.replayer, "translator", "translate");
        Box::pin(async move { replay_result::<TranslationResponse>(output) })
    }
}

impl ImageGenerator for Replaying {
    fn generate(&self, _request: &ImageRequest) -> GenerateFuture<'_> {
        let output = next_output(&self.replayer, "image_generator", "generate");
        Box::pin(async move { replay_result::<GeneratedImage>(output) })
    }
}

/// Retrieve the next recorded output for a given port and method.
///
/// An exhausted cassette is reported as a replayed error so the
/// submission fails the way a dead endpoint would.
fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    match guard.next_interaction(port, method) {
        Ok(interaction) => interaction.output.clone(),
        Err(message) => {
            tracing::error!(port, method, "{message}");
            serde_json::json!({ "Err": message })
        }
    }
}

/// Deserialize a replayed output as `Result<T, AppError>`.
///
/// Recorded errors come back as `AppError::Api` with status 0, since only
/// their message survives the cassette.
fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, AppError> {
    let replay_error = |message: String| AppError::Api { status: 0, message };

    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err_val.as_str().unwrap_or("replayed error").to_string();
        return Err(replay_error(msg));
    }
    let ok_val = output.get("Ok").or_else(|| output.get("ok")).cloned();
    let value = ok_val.unwrap_or(output);
    serde_json::from_value(value).map_err(|e| replay_error(format!("Bad cassette output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replays_ok_value() {
        let out: TranslationResponse =
            replay_result(json!({"Ok": {"translatedText": "sun"}})).unwrap();
        assert_eq!(out.translated_text.as_deref(), Some("sun"));
    }

    #[test]
    fn replays_err_message() {
        let err = replay_result::<TranslationResponse>(json!({"Err": "API error (503): busy"}))
            .unwrap_err();
        assert!(matches!(err, AppError::Api { status: 0, .. }));
        assert!(err.to_string().contains("busy"));
    }

    #[test]
    fn bare_value_without_wrapper() {
        let out: TranslationResponse = replay_result(json!({"translatedText": "moon"})).unwrap();
        assert_eq!(out.translated_text.as_deref(), Some("moon"));
    }
}
