use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use page_cell::{
    ButtonHandle, Document, SharedDocument, ACTION_BUTTON_CLASS, AUTO_RESCHEDULE_BUTTON_CLASS,
    DISABLED_BUTTON_CLASS,
};
use shared_backend::BookingApi;
use shared_models::is_terminal_status;

use crate::models::{RescheduleOutcome, CONFIRM_PROMPT, FAILURE_PREFIX};

/// Per-appointment "auto-reschedule" buttons on the appointment list page.
pub struct AutoRescheduleAction<D: Document> {
    document: SharedDocument<D>,
    api: Arc<dyn BookingApi>,
}

impl<D: Document> AutoRescheduleAction<D> {
    /// Binds to the list page, disabling actions on attended or closed
    /// appointments. This is a UI guard only; the server still decides.
    pub async fn bind(document: SharedDocument<D>, api: Arc<dyn BookingApi>) -> Self {
        let disabled = {
            let mut doc = document.lock().await;
            let terminal: Vec<ButtonHandle> = doc
                .buttons(ACTION_BUTTON_CLASS)
                .into_iter()
                .filter(|b| b.status.as_deref().map(is_terminal_status).unwrap_or(false))
                .map(|b| b.handle)
                .collect();
            for handle in &terminal {
                doc.disable_button(*handle, DISABLED_BUTTON_CLASS);
            }
            terminal.len()
        };

        debug!("Disabled {} actions on finished appointments", disabled);

        Self { document, api }
    }

    /// Handles of every auto-reschedule button on the page.
    pub async fn buttons(&self) -> Vec<ButtonHandle> {
        self.document
            .lock()
            .await
            .buttons(AUTO_RESCHEDULE_BUTTON_CLASS)
            .into_iter()
            .map(|b| b.handle)
            .collect()
    }

    /// Click handler. Default navigation never happens; the only effects are
    /// the confirmation, at most one POST, and the resulting alert/reload.
    #[instrument(skip(self))]
    pub async fn on_click(&self, handle: ButtonHandle) -> RescheduleOutcome {
        let appointment_id = {
            let mut doc = self.document.lock().await;
            let button = match doc.button(handle) {
                Some(button) if button.has_class(AUTO_RESCHEDULE_BUTTON_CLASS) => button,
                _ => return RescheduleOutcome::NotBound,
            };

            if button.disabled {
                debug!("Ignoring click on disabled button {:?}", handle);
                return RescheduleOutcome::Ignored;
            }

            let appointment_id = match button.appt_id.filter(|id| !id.is_empty()) {
                Some(id) => id,
                None => {
                    warn!("Auto-reschedule button {:?} has no data-appt-id", handle);
                    return RescheduleOutcome::Ignored;
                }
            };

            if !doc.confirm(CONFIRM_PROMPT) {
                debug!("Auto-reschedule of appointment {} cancelled", appointment_id);
                return RescheduleOutcome::Cancelled;
            }
            appointment_id
        };

        info!("Requesting auto-reschedule of appointment {}", appointment_id);
        let result = self.api.auto_reschedule(&appointment_id).await;

        let mut doc = self.document.lock().await;
        match result {
            Ok(response) => {
                doc.alert(&response.message);
                if response.is_success() {
                    info!("Appointment {} rescheduled: {}", appointment_id, response.message);
                    doc.reload();
                    RescheduleOutcome::Rescheduled { message: response.message }
                } else {
                    info!(
                        "Appointment {} not rescheduled ({:?}): {}",
                        appointment_id, response.status, response.message
                    );
                    RescheduleOutcome::Declined {
                        status: response.status,
                        message: response.message,
                    }
                }
            }
            Err(err) => {
                error!("Error auto-rescheduling appointment {}: {}", appointment_id, err);
                doc.alert(&format!("{}{}", FAILURE_PREFIX, err));
                RescheduleOutcome::Failed { error: err.to_string() }
            }
        }
    }
}
