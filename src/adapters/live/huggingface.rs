//! Live adapter for the Hugging Face hosted inference API.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::error::AppError;
use crate::ports::image_generator::{GenerateFuture, GeneratedImage, ImageGenerator, ImageRequest};

/// MIME type assumed when the response carries no usable `Content-Type`.
const DEFAULT_MIME: &str = "image/jpeg";

/// Live image generator that calls a Hugging Face text-to-image model endpoint.
pub struct HuggingFaceGenerator {
    client: Client,
    url: String,
    api_key: String,
}

impl HuggingFaceGenerator {
    /// Create a new generator for the given model endpoint and bearer token.
    #[must_use]
    pub fn new(url: impl Into<String>, api_key: String) -> Self {
        Self { client: Client::new(), url: url.into(), api_key }
    }
}

impl ImageGenerator for HuggingFaceGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            tracing::debug!(url = %self.url, "requesting image");

            let response = self
                .client
                .post(&self.url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&request)
                .send()
                .await?;

            let status = response.status();
            let mime_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.split(';').next().unwrap_or_default().trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_MIME.to_string());

            if !status.is_success() {
                let message = response.text().await?;
                return Err(AppError::Api { status: status.as_u16(), message });
            }

            let data = response.bytes().await?.to_vec();
            check_image_body(&data, &mime_type)?;

            tracing::debug!(bytes = data.len(), mime = %mime_type, "image received");
            Ok(GeneratedImage { data, mime_type })
        })
    }
}

/// Reject success responses that carry no image, such as a JSON
/// "model is loading" notice.
fn check_image_body(data: &[u8], mime_type: &str) -> Result<(), AppError> {
    if data.is_empty() {
        return Err(AppError::Api { status: 200, message: "Empty image response".to_string() });
    }
    if mime_type == "application/json" || mime_type.starts_with("text/") {
        let body = String::from_utf8_lossy(data);
        let truncated: String = body.chars().take(500).collect();
        return Err(AppError::Api {
            status: 200,
            message: format!("Expected image, got {mime_type}. Body: {truncated}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_body_accepted() {
        assert!(check_image_body(&[0xFF, 0xD8], "image/jpeg").is_ok());
    }

    #[test]
    fn empty_body_rejected() {
        assert!(check_image_body(&[], "image/jpeg").is_err());
    }

    #[test]
    fn json_body_rejected() {
        let err = check_image_body(br#"{"error":"Model is currently loading"}"#, "application/json")
            .unwrap_err();
        assert!(err.to_string().contains("currently loading"));
    }
}
