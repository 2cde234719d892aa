use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_models::{
    AppError, AvailabilityResult, BookingSubmission, Department, Doctor, RescheduleResponse,
    SlotsResponse, TimeSlot,
};

use crate::client::BackendClient;

/// The endpoints the booking and appointment-list pages consume.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn departments(&self, hospital_id: &str) -> Result<Vec<Department>, AppError>;

    async fn doctors(&self, department_id: &str) -> Result<Vec<Doctor>, AppError>;

    /// A `{error}` body comes back as [`AppError::Domain`].
    async fn available_slots(&self, doctor_id: &str, date: NaiveDate) -> Result<Vec<TimeSlot>, AppError>;

    async fn check_slot(
        &self,
        doctor_id: &str,
        date: NaiveDate,
        time: &TimeSlot,
    ) -> Result<AvailabilityResult, AppError>;

    async fn auto_reschedule(&self, appointment_id: &str) -> Result<RescheduleResponse, AppError>;

    async fn submit_booking(&self, submission: &BookingSubmission) -> Result<(), AppError>;
}

pub struct HttpBookingApi {
    backend: BackendClient,
}

impl HttpBookingApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn departments(&self, hospital_id: &str) -> Result<Vec<Department>, AppError> {
        self.backend
            .request(Method::GET, &["get_departments", hospital_id], &[], None)
            .await
    }

    async fn doctors(&self, department_id: &str) -> Result<Vec<Doctor>, AppError> {
        self.backend
            .request(Method::GET, &["get_doctors", department_id], &[], None)
            .await
    }

    async fn available_slots(&self, doctor_id: &str, date: NaiveDate) -> Result<Vec<TimeSlot>, AppError> {
        let date = date.format("%Y-%m-%d").to_string();
        let response: SlotsResponse = self
            .backend
            .request(
                Method::GET,
                &["get_available_slots"],
                &[("doctor_id", doctor_id), ("date", &date)],
                None,
            )
            .await?;

        match response {
            SlotsResponse::Slots(slots) => {
                debug!("{} slots for doctor {} on {}", slots.len(), doctor_id, date);
                Ok(slots)
            }
            SlotsResponse::Failure { error } => {
                warn!("Slot lookup for doctor {} on {} refused: {}", doctor_id, date, error);
                Err(AppError::Domain(error))
            }
        }
    }

    async fn check_slot(
        &self,
        doctor_id: &str,
        date: NaiveDate,
        time: &TimeSlot,
    ) -> Result<AvailabilityResult, AppError> {
        let date = date.format("%Y-%m-%d").to_string();
        self.backend
            .request(
                Method::GET,
                &["check_slot"],
                &[("doctor_id", doctor_id), ("date", &date), ("time", time.as_str())],
                None,
            )
            .await
    }

    async fn auto_reschedule(&self, appointment_id: &str) -> Result<RescheduleResponse, AppError> {
        self.backend
            .request(Method::POST, &["auto_reschedule", appointment_id], &[], None)
            .await
    }

    async fn submit_booking(&self, submission: &BookingSubmission) -> Result<(), AppError> {
        self.backend.submit_form(&["book"], submission).await
    }
}
