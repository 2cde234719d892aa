use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::{json, Value};

use shared_config::{AppConfig, DateWindowPolicy};

use crate::clock::FixedClock;

pub struct TestConfig {
    pub base_url: String,
    pub today: NaiveDate,
    pub date_window: DateWindowPolicy,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            today: NaiveDate::from_ymd_opt(2025, 5, 9).unwrap_or_default(),
            date_window: DateWindowPolicy::Rolling,
        }
    }
}

impl TestConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            backend_base_url: self.base_url.clone(),
            date_window: self.date_window,
            flash_dismiss_after: Duration::from_secs(8),
            flash_fade: Duration::from_millis(500),
        }
    }

    pub fn clock(&self) -> Arc<FixedClock> {
        Arc::new(FixedClock(self.today))
    }

    /// `today` shifted by a number of days, formatted the way a date input reports it.
    pub fn date_offset(&self, days: i64) -> String {
        (self.today + chrono::Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }
}

/// Canned bodies matching what the booking backend returns.
pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn departments_response() -> Value {
        json!([[1, "Cardiology"], [2, "Dermatology"], [3, "Pediatrics"]])
    }

    pub fn doctors_response() -> Value {
        json!([[11, "Dr. Adaeze Okafor"], [12, "Dr. Tunde Bakare"]])
    }

    pub fn slots_response() -> Value {
        json!(["08:00 AM", "09:00 AM", "02:00 PM"])
    }

    pub fn slot_error_response(message: &str) -> Value {
        json!({ "error": message })
    }

    pub fn slot_available_response() -> Value {
        json!({ "available": true })
    }

    pub fn slot_unavailable_response(reason: Option<&str>) -> Value {
        match reason {
            Some(reason) => json!({ "available": false, "error": reason }),
            None => json!({ "available": false }),
        }
    }

    pub fn reschedule_response(status: &str, message: &str) -> Value {
        json!({ "status": status, "message": message })
    }
}
