//! Submission orchestration: validate, translate, generate, display.
//!
//! [`Orchestrator::submit`] drives one submission through
//! `Idle → Loading → Succeeded | Failed`. Every submission takes a fresh
//! token; a result that arrives after a newer submission has started is
//! dropped instead of overwriting the newer state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::display::{ImageHandle, ImageStore};
use crate::error::AppError;
use crate::ports::{
    GeneratedImage, ImageGenerator, ImageRequest, Presenter, TranslationRequest,
    TranslationResponse, Translator,
};

/// Alert shown when a prompt is empty.
pub const EMPTY_PROMPT_ALERT: &str = "Please enter a prompt";

/// Alert shown when image generation fails.
pub const GENERATION_FAILED_ALERT: &str = "Failed to generate image. Try again.";

/// What the presenter should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestStatus {
    /// Nothing submitted yet, or an in-flight submission was abandoned.
    Idle,
    /// Translation or generation in progress.
    Loading,
    /// The latest submission produced an image.
    Succeeded(ImageHandle),
    /// The latest submission failed; holds the user-facing message.
    Failed(String),
}

impl RequestStatus {
    /// Whether the busy indicator should be shown.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Result of a single [`Orchestrator::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty prompt; nothing was sent.
    Rejected,
    /// An image was generated and is now displayed.
    Succeeded {
        /// Handle to the displayed image.
        image: ImageHandle,
        /// The text actually sent to the image generator.
        prompt: String,
    },
    /// Image generation failed.
    Failed(String),
    /// A newer submission started before this one settled; its result was discarded.
    Superseded,
}

/// Translate a prompt from Hindi to English, falling back to the original
/// text on any failure.
pub async fn translate_prompt(translator: &dyn Translator, text: &str) -> String {
    let request = TranslationRequest::hindi_to_english(text);
    match translator.translate(&request).await {
        Ok(TranslationResponse { translated_text: Some(translated) })
            if !translated.trim().is_empty() =>
        {
            tracing::debug!(%translated, "prompt translated");
            translated
        }
        Ok(_) => {
            tracing::warn!("translation returned no text; using original prompt");
            text.to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "translation failed; using original prompt");
            text.to_string()
        }
    }
}

/// Check a prompt before anything is sent. Shows the empty-prompt alert and
/// returns `false` when there is nothing to submit.
pub fn accept_prompt(presenter: &dyn Presenter, prompt: &str) -> bool {
    if prompt.trim().is_empty() {
        presenter.alert(EMPTY_PROMPT_ALERT);
        return false;
    }
    true
}

struct Session {
    status: RequestStatus,
    latest: u64,
    images: ImageStore,
}

/// Sequences the translator and image generator and owns the display state.
pub struct Orchestrator {
    translator: Box<dyn Translator>,
    generator: Box<dyn ImageGenerator>,
    presenter: Box<dyn Presenter>,
    session: Mutex<Session>,
}

impl Orchestrator {
    /// Create an idle orchestrator.
    #[must_use]
    pub fn new(
        translator: Box<dyn Translator>,
        generator: Box<dyn ImageGenerator>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self {
            translator,
            generator,
            presenter,
            session: Mutex::new(Session {
                status: RequestStatus::Idle,
                latest: 0,
                images: ImageStore::default(),
            }),
        }
    }

    /// Current status.
    #[cfg(test)]
    pub fn status(&self) -> RequestStatus {
        self.lock().status.clone()
    }

    /// Number of images currently held for display.
    #[cfg(test)]
    pub fn live_images(&self) -> usize {
        self.lock().images.len()
    }

    /// A copy of the image behind a handle, if it has not been released.
    #[must_use]
    pub fn image(&self, handle: &ImageHandle) -> Option<GeneratedImage> {
        self.lock().images.get(handle).cloned()
    }

    /// Submit a prompt: translate it, generate an image and display the result.
    ///
    /// Image generation failures are reported through the presenter and the
    /// returned outcome; they are never propagated as errors.
    pub async fn submit(&self, prompt: &str) -> SubmitOutcome {
        if !accept_prompt(self.presenter.as_ref(), prompt) {
            return SubmitOutcome::Rejected;
        }

        let in_flight = self.begin();

        let text = translate_prompt(self.translator.as_ref(), prompt).await;
        let result = self.generator.generate(&ImageRequest { inputs: text.clone() }).await;

        in_flight.settle(result, text)
    }

    fn begin(&self) -> InFlight<'_> {
        let token = {
            let mut session = self.lock();
            session.latest += 1;
            let previous = std::mem::replace(&mut session.status, RequestStatus::Loading);
            if let RequestStatus::Succeeded(handle) = previous {
                session.images.revoke(&handle);
            }
            tracing::trace!(live_images = session.images.len(), "previous image released");
            session.latest
        };
        tracing::debug!(token, "submission started");
        self.presenter.status_changed(&RequestStatus::Loading);
        InFlight { orchestrator: self, token, settled: false }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // Session updates are single assignments, so a poisoned lock still
        // holds a consistent state.
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A submission between `begin` and `settle`. Dropping it unsettled puts a
/// still-current `Loading` status back to `Idle`.
struct InFlight<'a> {
    orchestrator: &'a Orchestrator,
    token: u64,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(
        mut self,
        result: Result<GeneratedImage, AppError>,
        prompt: String,
    ) -> SubmitOutcome {
        self.settled = true;
        let orchestrator = self.orchestrator;

        let (outcome, status) = {
            let mut session = orchestrator.lock();
            if session.latest != self.token {
                tracing::debug!(
                    token = self.token,
                    latest = session.latest,
                    "discarding result of superseded submission"
                );
                return SubmitOutcome::Superseded;
            }

            match result {
                Ok(image) => {
                    let handle = session.images.create(image);
                    session.status = RequestStatus::Succeeded(handle.clone());
                    (SubmitOutcome::Succeeded { image: handle, prompt }, session.status.clone())
                }
                Err(e) => {
                    tracing::error!(error = %e, "image generation failed");
                    session.status = RequestStatus::Failed(GENERATION_FAILED_ALERT.to_string());
                    (SubmitOutcome::Failed(e.to_string()), session.status.clone())
                }
            }
        };

        if matches!(status, RequestStatus::Failed(_)) {
            orchestrator.presenter.alert(GENERATION_FAILED_ALERT);
        }
        orchestrator.presenter.status_changed(&status);
        outcome
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let reset = {
            let mut session = self.orchestrator.lock();
            let current = session.latest == self.token && session.status.is_loading();
            if current {
                session.status = RequestStatus::Idle;
            }
            current
        };
        if reset {
            tracing::debug!(token = self.token, "submission abandoned");
            self.orchestrator.presenter.status_changed(&RequestStatus::Idle);
        }
    }
}
