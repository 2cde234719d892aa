use serde::Serialize;

use shared_models::RescheduleStatus;

pub const CONFIRM_PROMPT: &str = "Are you sure you want to auto-reschedule this appointment?";
pub const FAILURE_PREFIX: &str = "An error occurred while auto-rescheduling: ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RescheduleOutcome {
    /// The clicked control is not an auto-reschedule button.
    NotBound,
    /// Disabled, or missing its appointment id.
    Ignored,
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    /// Server moved the appointment; the page was reloaded.
    Rescheduled { message: String },
    /// Server answered with a non-success status, e.g. no free slot.
    Declined { status: RescheduleStatus, message: String },
    Failed { error: String },
}
