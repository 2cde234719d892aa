use serde::Serialize;

/// Placeholder texts a cascading select cycles through.
#[derive(Debug, Clone, Copy)]
pub struct FieldLabels {
    pub noun: &'static str,
    pub initial: &'static str,
    pub loading: &'static str,
    pub prompt: &'static str,
    pub empty: &'static str,
    pub error: &'static str,
}

pub const DEPARTMENT_LABELS: FieldLabels = FieldLabels {
    noun: "departments",
    initial: "Pick a hospital first",
    loading: "Loading departments...",
    prompt: "Select a department",
    empty: "No departments available",
    error: "Error loading departments",
};

pub const DOCTOR_LABELS: FieldLabels = FieldLabels {
    noun: "doctors",
    initial: "Pick a department first",
    loading: "Loading doctors...",
    prompt: "Select a doctor",
    empty: "No doctors available",
    error: "Error loading doctors",
};

pub const TIME_LABELS: FieldLabels = FieldLabels {
    noun: "slots",
    initial: "Select a date first",
    loading: "Loading available slots...",
    prompt: "Select a time",
    empty: "No available slots",
    error: "Error loading slots",
};

pub const SLOTS_ERROR_MESSAGE: &str = "Error loading available slots";
pub const CHECKING_MESSAGE: &str = "Checking final availability...";
pub const SLOT_AVAILABLE_MESSAGE: &str = "Slot is available";
pub const SLOT_UNAVAILABLE_MESSAGE: &str = "Slot is unavailable";
pub const CHECK_ERROR_MESSAGE: &str = "Error checking availability";
pub const SELECT_TIME_ALERT: &str = "Please select a time slot.";
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";
pub const SLOT_NOT_CONFIRMED: &str = "Please wait until the slot is confirmed available.";

/// Terminal state a change handler left its field in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum FieldOutcome {
    /// Options rendered and the field enabled.
    Populated(usize),
    /// Fetch succeeded with nothing to choose from.
    Empty,
    /// Fetch failed; the message is what was logged.
    Failed(String),
    Available,
    Unavailable(String),
    /// Input refused locally (out-of-window date, blank time).
    Rejected,
    /// Upstream selection missing, nothing requested.
    Skipped,
    /// A newer request for the same field replaced this one.
    Superseded,
}
