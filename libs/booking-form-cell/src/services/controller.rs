use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error, info, instrument, warn};

use page_cell::{Document, ElementId, SelectOption, SharedDocument, StatusClass};
use shared_backend::BookingApi;
use shared_config::{AppConfig, DateWindowPolicy};
use shared_models::{AppError, BookingSubmission, TimeSlot};
use shared_utils::Clock;

use crate::models::*;
use crate::services::date_window::DateWindow;
use crate::services::generation::{Field, RequestGenerations, Ticket};

/// Keeps the hospital → department → doctor → date → time cascade and the
/// submit button consistent with what the server reports.
///
/// The document lock is never held across a request; every response is
/// checked against its field's generation before it touches the page.
pub struct BookingFormController<D: Document> {
    document: SharedDocument<D>,
    api: Arc<dyn BookingApi>,
    date_policy: DateWindowPolicy,
    clock: Arc<dyn Clock>,
    generations: RequestGenerations,
}

impl<D: Document> std::fmt::Debug for BookingFormController<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingFormController")
            .field("date_policy", &self.date_policy)
            .field("generations", &self.generations)
            .finish_non_exhaustive()
    }
}

impl<D: Document> BookingFormController<D> {
    /// Binds to the booking form and puts every dependent control in its
    /// initial disabled state.
    pub async fn bind(
        document: SharedDocument<D>,
        api: Arc<dyn BookingApi>,
        config: &AppConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        {
            let mut doc = document.lock().await;
            let missing: Vec<&str> = ElementId::BOOKING_FORM
                .iter()
                .filter(|id| !doc.has_element(**id))
                .map(|id| id.as_str())
                .collect();
            if !missing.is_empty() {
                return Err(AppError::MissingElement(missing.join(", ")));
            }
            reset_dependents(&mut *doc);
        }

        debug!("Booking form bound with {:?} date window", config.date_window);

        Ok(Self {
            document,
            api,
            date_policy: config.date_window,
            clock,
            generations: RequestGenerations::new(),
        })
    }

    pub fn date_window(&self) -> DateWindow {
        DateWindow::for_policy(self.date_policy, self.clock.today())
    }

    #[instrument(skip(self))]
    pub async fn on_hospital_change(&self) -> FieldOutcome {
        let (hospital_id, ticket) = {
            let mut doc = self.document.lock().await;
            self.generations.invalidate(Field::Department);
            reset_dependents(&mut *doc);

            let hospital_id = doc.value(ElementId::Hospital);
            if hospital_id.is_empty() {
                return FieldOutcome::Skipped;
            }
            doc.show_placeholder(ElementId::Department, DEPARTMENT_LABELS.loading);
            (hospital_id, self.generations.issue(Field::Department))
        };

        let result = self
            .api
            .departments(&hospital_id)
            .await
            .map(|departments| departments.into_iter().map(|d| SelectOption::new(d.id, d.name)).collect());

        self.apply_listing(ticket, ElementId::Department, &DEPARTMENT_LABELS, result)
            .await
    }

    #[instrument(skip(self))]
    pub async fn on_department_change(&self) -> FieldOutcome {
        let (department_id, ticket) = {
            let mut doc = self.document.lock().await;
            self.generations.invalidate(Field::Doctor);
            reset_time(&mut *doc);

            let department_id = doc.value(ElementId::Department);
            if department_id.is_empty() {
                doc.show_placeholder(ElementId::Doctor, DOCTOR_LABELS.initial);
                return FieldOutcome::Skipped;
            }
            doc.show_placeholder(ElementId::Doctor, DOCTOR_LABELS.loading);
            (department_id, self.generations.issue(Field::Doctor))
        };

        let result = self
            .api
            .doctors(&department_id)
            .await
            .map(|doctors| doctors.into_iter().map(|d| SelectOption::new(d.id, d.name)).collect());

        self.apply_listing(ticket, ElementId::Doctor, &DOCTOR_LABELS, result)
            .await
    }

    #[instrument(skip(self))]
    pub async fn on_doctor_change(&self) -> FieldOutcome {
        self.load_available_slots().await
    }

    /// Validates the new date against the booking window before loading slots.
    #[instrument(skip(self))]
    pub async fn on_date_change(&self) -> FieldOutcome {
        let window = self.date_window();
        {
            let mut doc = self.document.lock().await;
            let raw = doc.value(ElementId::Date);

            if raw.is_empty() {
                self.generations.invalidate(Field::Time);
                reset_time(&mut *doc);
                return FieldOutcome::Skipped;
            }

            if let Err(err) = window.validate(&raw) {
                warn!("Rejected date '{}': outside {} ..= {}", raw, window.start, window.end);
                self.generations.invalidate(Field::Time);
                doc.alert(&err.to_string());
                doc.set_value(ElementId::Date, "");
                reset_time(&mut *doc);
                return FieldOutcome::Rejected;
            }
        }

        self.load_available_slots().await
    }

    #[instrument(skip(self))]
    pub async fn on_time_change(&self) -> FieldOutcome {
        let (doctor_id, date, time, ticket) = {
            let mut doc = self.document.lock().await;
            let time = doc.value(ElementId::Time);

            if time.is_empty() {
                self.generations.invalidate(Field::Availability);
                doc.alert(SELECT_TIME_ALERT);
                clear_availability(&mut *doc);
                doc.set_disabled(ElementId::SubmitBtn, true);
                return FieldOutcome::Rejected;
            }

            let ticket = self.generations.issue(Field::Availability);
            doc.set_disabled(ElementId::SubmitBtn, true);

            let doctor_id = doc.value(ElementId::Doctor);
            let date = parse_date(&doc.value(ElementId::Date));
            let date = match (doctor_id.is_empty(), date) {
                (false, Some(date)) => date,
                _ => {
                    clear_availability(&mut *doc);
                    return FieldOutcome::Skipped;
                }
            };

            doc.set_status(ElementId::SlotAvailability, CHECKING_MESSAGE, StatusClass::None);
            doc.set_visible(ElementId::LoadingSpinner, true);
            (doctor_id, date, TimeSlot(time), ticket)
        };

        let result = self.api.check_slot(&doctor_id, date, &time).await;

        let mut doc = self.document.lock().await;
        if !self.generations.is_current(ticket) {
            debug!("Discarding stale availability for {} at {}", date, time);
            return FieldOutcome::Superseded;
        }
        doc.set_visible(ElementId::LoadingSpinner, false);

        match result {
            Ok(availability) if availability.available => {
                info!("Slot {} on {} with doctor {} is available", time, date, doctor_id);
                doc.set_status(ElementId::SlotAvailability, SLOT_AVAILABLE_MESSAGE, StatusClass::Available);
                doc.set_disabled(ElementId::SubmitBtn, false);
                FieldOutcome::Available
            }
            Ok(availability) => {
                let reason = availability
                    .reason
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| SLOT_UNAVAILABLE_MESSAGE.to_string());
                info!("Slot {} on {} unavailable: {}", time, date, reason);
                doc.set_status(ElementId::SlotAvailability, &reason, StatusClass::Unavailable);
                doc.set_disabled(ElementId::SubmitBtn, true);
                FieldOutcome::Unavailable(reason)
            }
            Err(err) => {
                error!("Error checking slot availability: {}", err);
                doc.set_status(ElementId::SlotAvailability, CHECK_ERROR_MESSAGE, StatusClass::Error);
                doc.set_disabled(ElementId::SubmitBtn, true);
                FieldOutcome::Failed(err.to_string())
            }
        }
    }

    /// The five form values, once the slot has been confirmed.
    pub async fn submission(&self) -> Result<BookingSubmission, AppError> {
        let doc = self.document.lock().await;

        let hospital = doc.value(ElementId::Hospital);
        let department = doc.value(ElementId::Department);
        let doctor = doc.value(ElementId::Doctor);
        let date = doc.value(ElementId::Date);
        let time = doc.value(ElementId::Time);

        if [&hospital, &department, &doctor, &date, &time].iter().any(|v| v.is_empty()) {
            return Err(AppError::Validation(ALL_FIELDS_REQUIRED.to_string()));
        }

        let date = self.date_window().validate(&date)?;

        if doc.is_disabled(ElementId::SubmitBtn) {
            return Err(AppError::Validation(SLOT_NOT_CONFIRMED.to_string()));
        }

        Ok(BookingSubmission {
            hospital,
            department,
            doctor,
            date,
            time: TimeSlot(time),
        })
    }

    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<BookingSubmission, AppError> {
        let submission = self.submission().await?;
        self.api.submit_booking(&submission).await?;
        info!(
            "Booked doctor {} on {} at {}",
            submission.doctor, submission.date, submission.time
        );
        Ok(submission)
    }

    async fn load_available_slots(&self) -> FieldOutcome {
        let (doctor_id, date, ticket) = {
            let mut doc = self.document.lock().await;
            let ticket = self.generations.issue(Field::Time);

            let doctor_id = doc.value(ElementId::Doctor);
            let date = parse_date(&doc.value(ElementId::Date));
            let date = match (doctor_id.is_empty(), date) {
                (false, Some(date)) => date,
                _ => {
                    reset_time(&mut *doc);
                    return FieldOutcome::Skipped;
                }
            };

            doc.show_placeholder(ElementId::Time, TIME_LABELS.loading);
            clear_availability(&mut *doc);
            doc.set_disabled(ElementId::SubmitBtn, true);
            doc.set_visible(ElementId::LoadingSpinner, true);
            (doctor_id, date, ticket)
        };

        let result = self.api.available_slots(&doctor_id, date).await;

        let mut doc = self.document.lock().await;
        if !self.generations.is_current(ticket) {
            debug!("Discarding stale slots for doctor {} on {}", doctor_id, date);
            return FieldOutcome::Superseded;
        }
        doc.set_visible(ElementId::LoadingSpinner, false);

        match result {
            Ok(slots) if slots.is_empty() => {
                info!("No available slots for doctor {} on {}", doctor_id, date);
                doc.show_placeholder(ElementId::Time, TIME_LABELS.empty);
                FieldOutcome::Empty
            }
            Ok(slots) => {
                let count = slots.len();
                let mut options = vec![SelectOption::placeholder(TIME_LABELS.prompt)];
                options.extend(slots.into_iter().map(|s| SelectOption::new(s.0.clone(), s.0)));
                doc.set_options(ElementId::Time, options);
                doc.set_disabled(ElementId::Time, false);
                FieldOutcome::Populated(count)
            }
            Err(AppError::Domain(message)) => {
                warn!("Slot lookup refused for doctor {} on {}: {}", doctor_id, date, message);
                doc.show_placeholder(ElementId::Time, TIME_LABELS.error);
                doc.set_status(ElementId::SlotAvailability, &message, StatusClass::Error);
                FieldOutcome::Failed(message)
            }
            Err(err) => {
                error!("Error fetching available slots: {}", err);
                doc.show_placeholder(ElementId::Time, TIME_LABELS.error);
                doc.set_status(ElementId::SlotAvailability, SLOTS_ERROR_MESSAGE, StatusClass::Error);
                FieldOutcome::Failed(err.to_string())
            }
        }
    }

    async fn apply_listing(
        &self,
        ticket: Ticket,
        id: ElementId,
        labels: &FieldLabels,
        result: Result<Vec<SelectOption>, AppError>,
    ) -> FieldOutcome {
        let mut doc = self.document.lock().await;
        if !self.generations.is_current(ticket) {
            debug!("Discarding stale {} response", labels.noun);
            return FieldOutcome::Superseded;
        }

        match result {
            Ok(options) if options.is_empty() => {
                info!("No {} available", labels.noun);
                doc.show_placeholder(id, labels.empty);
                FieldOutcome::Empty
            }
            Ok(options) => {
                let count = options.len();
                let mut all = Vec::with_capacity(count + 1);
                all.push(SelectOption::placeholder(labels.prompt));
                all.extend(options);
                doc.set_options(id, all);
                doc.set_disabled(id, false);
                FieldOutcome::Populated(count)
            }
            Err(err) => {
                error!("Error fetching {}: {}", labels.noun, err);
                doc.show_placeholder(id, labels.error);
                FieldOutcome::Failed(err.to_string())
            }
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Blank availability display, spinner hidden.
fn clear_availability<D: Document + ?Sized>(doc: &mut D) {
    doc.set_status(ElementId::SlotAvailability, "", StatusClass::None);
    doc.set_visible(ElementId::LoadingSpinner, false);
}

/// Time back to "Select a date first", nothing confirmed, no request pending.
fn reset_time<D: Document + ?Sized>(doc: &mut D) {
    doc.show_placeholder(ElementId::Time, TIME_LABELS.initial);
    clear_availability(doc);
    doc.set_disabled(ElementId::SubmitBtn, true);
}

fn reset_dependents<D: Document + ?Sized>(doc: &mut D) {
    doc.show_placeholder(ElementId::Department, DEPARTMENT_LABELS.initial);
    doc.show_placeholder(ElementId::Doctor, DOCTOR_LABELS.initial);
    reset_time(doc);
}
