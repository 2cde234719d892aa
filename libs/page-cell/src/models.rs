use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const AUTO_RESCHEDULE_BUTTON_CLASS: &str = "auto-reschedule-btn";
pub const ACTION_BUTTON_CLASS: &str = "action-btn";
pub const DISABLED_BUTTON_CLASS: &str = "disabled-btn";

/// Elements of the booking form, keyed by their DOM id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementId {
    #[serde(rename = "hospital")]
    Hospital,
    #[serde(rename = "department")]
    Department,
    #[serde(rename = "doctor")]
    Doctor,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "slotAvailability")]
    SlotAvailability,
    #[serde(rename = "submitBtn")]
    SubmitBtn,
    #[serde(rename = "loadingSpinner")]
    LoadingSpinner,
}

impl ElementId {
    pub const BOOKING_FORM: [ElementId; 8] = [
        ElementId::Hospital,
        ElementId::Department,
        ElementId::Doctor,
        ElementId::Date,
        ElementId::Time,
        ElementId::SlotAvailability,
        ElementId::SubmitBtn,
        ElementId::LoadingSpinner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::Hospital => "hospital",
            ElementId::Department => "department",
            ElementId::Doctor => "doctor",
            ElementId::Date => "date",
            ElementId::Time => "time",
            ElementId::SlotAvailability => "slotAvailability",
            ElementId::SubmitBtn => "submitBtn",
            ElementId::LoadingSpinner => "loadingSpinner",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<option>` of a select. Placeholders carry an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new("", label)
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// CSS class on the slot-availability display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusClass {
    #[default]
    None,
    Available,
    Unavailable,
    Error,
}

impl StatusClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusClass::None => "",
            StatusClass::Available => "slot-available",
            StatusClass::Unavailable => "slot-unavailable",
            StatusClass::Error => "error-message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonHandle(pub usize);

/// A per-appointment button on the list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    pub handle: ButtonHandle,
    /// `data-appt-id`
    pub appt_id: Option<String>,
    /// `data-status`
    pub status: Option<String>,
    pub classes: Vec<String>,
    pub disabled: bool,
}

impl ActionButton {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlashHandle(pub usize);

/// A transient notification banner (`.alert`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub handle: FlashHandle,
    pub text: String,
    pub opacity: f32,
    pub transition: Option<Duration>,
}

/// User input routed to the page's controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Change(ElementId),
    Click(ButtonHandle),
}
