use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RescheduleStatus {
    Success,
    Info,
    Warning,
    Error,
    #[serde(other)]
    Other,
}

/// Body of `POST /auto_reschedule/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleResponse {
    pub status: RescheduleStatus,
    #[serde(default)]
    pub message: String,
}

impl RescheduleResponse {
    pub fn is_success(&self) -> bool {
        self.status == RescheduleStatus::Success
    }
}

/// Appointment states after which no further action is allowed from the list page.
pub const TERMINAL_APPOINTMENT_STATUSES: [&str; 2] = ["attended", "closed"];

pub fn is_terminal_status(status: &str) -> bool {
    TERMINAL_APPOINTMENT_STATUSES.contains(&status)
}
