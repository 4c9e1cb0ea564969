//! Presenter port for the rendering surface.
//!
//! The orchestrator owns all state; a presenter only displays it and shows
//! blocking alerts to the user.

use crate::pipeline::RequestStatus;

/// Displays orchestrator state and user-facing alerts.
pub trait Presenter: Send + Sync {
    /// Show a user-visible alert.
    fn alert(&self, message: &str);

    /// Called after every status transition the orchestrator applies.
    fn status_changed(&self, _status: &RequestStatus) {}
}
