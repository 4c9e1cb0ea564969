//! Recording adapters that capture port interactions to a shared cassette.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;
use crate::ports::image_generator::{GenerateFuture, ImageGenerator, ImageRequest};
use crate::ports::translator::{TranslateFuture, TranslationRequest, Translator};

/// Wraps a live port and records every call it serves.
pub struct Recording<P: ?Sized> {
    inner: Box<P>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl<P: ?Sized> Recording<P> {
    /// Wrap `inner`, appending its interactions to `recorder`.
    pub fn new(inner: Box<P>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl Translator for Recording<dyn Translator> {
    fn translate(&self, request: &TranslationRequest) -> TranslateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.translate(&request).await;
            record_result(&self.recorder, "translator", "translate", &request, &result);
            result
        })
    }
}

impl ImageGenerator for Recording<dyn ImageGenerator> {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.generate(&request).await;
            record_result(&self.recorder, "image_generator", "generate", &request, &result);
            result
        })
    }
}

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
///
/// Serialization failures are logged and the interaction is skipped.
fn record_result<T, E, I>(
    recorder: &Mutex<CassetteRecorder>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input_json = match serde_json::to_value(input) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(port, method, error = %e, "skipping recording: input not serializable");
            return;
        }
    };

    let output_json = match result {
        Ok(v) => match serde_json::to_value(v) {
            Ok(inner) => serde_json::json!({ "Ok": inner }),
            Err(e) => {
                tracing::warn!(port, method, error = %e, "skipping recording: output not serializable");
                return;
            }
        },
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}
