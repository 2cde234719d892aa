use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ids come back from the server either as JSON numbers or strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum EntityId {
    Number(i64),
    Text(String),
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        match id {
            EntityId::Number(n) => n.to_string(),
            EntityId::Text(s) => s,
        }
    }
}

/// Wire form of a listed entity: `[id, name]`.
#[derive(Debug, Clone, Deserialize)]
struct IdNamePair(EntityId, String);

macro_rules! named_entity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "IdNamePair")]
        pub struct $name {
            pub id: String,
            pub name: String,
        }

        impl $name {
            pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
                Self { id: id.into(), name: name.into() }
            }
        }

        impl From<IdNamePair> for $name {
            fn from(pair: IdNamePair) -> Self {
                Self { id: pair.0.into(), name: pair.1 }
            }
        }
    };
}

named_entity!(
    /// Rendered by the server into the hospital select.
    Hospital
);
named_entity!(
    /// Scoped to a hospital.
    Department
);
named_entity!(
    /// Scoped to a department.
    Doctor
);

/// A bookable time for a (doctor, date) pair, e.g. `"09:00 AM"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(pub String);

impl TimeSlot {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeSlot {
    fn from(value: &str) -> Self {
        TimeSlot(value.to_string())
    }
}

/// Body of `GET /get_available_slots`: either the slot list or `{error}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SlotsResponse {
    Slots(Vec<TimeSlot>),
    Failure { error: String },
}

/// Body of `GET /check_slot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub available: bool,
    #[serde(default, rename = "error", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AvailabilityResult {
    pub fn available() -> Self {
        Self { available: true, reason: None }
    }

    pub fn unavailable(reason: Option<String>) -> Self {
        Self { available: false, reason }
    }
}

/// The five values posted to `/book` once the slot is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSubmission {
    pub hospital: String,
    pub department: String,
    pub doctor: String,
    pub date: NaiveDate,
    pub time: TimeSlot,
}
