//! Terminal presenter: status and alerts on stderr.

use crate::pipeline::RequestStatus;
use crate::ports::Presenter;

/// Shows the busy indicator and alerts on stderr. Results are reported by
/// the caller once saved.
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn status_changed(&self, status: &RequestStatus) {
        match status {
            RequestStatus::Loading => eprintln!("Generating..."),
            RequestStatus::Succeeded(handle) => {
                tracing::debug!(%handle, mime = handle.mime_type(), "image ready");
            }
            RequestStatus::Failed(message) => tracing::debug!(%message, "submission failed"),
            RequestStatus::Idle => {}
        }
    }
}
