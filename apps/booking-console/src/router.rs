use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use booking_form_cell::{dispatch_change, BookingFormController, FieldOutcome};
use page_cell::{Document, FlashDismisser, PageEvent, SharedDocument};
use reschedule_cell::{AutoRescheduleAction, RescheduleOutcome};
use shared_backend::BookingApi;
use shared_config::AppConfig;
use shared_models::AppError;
use shared_utils::Clock;

#[derive(Debug, Clone, PartialEq)]
pub enum PageResponse {
    Field(FieldOutcome),
    Reschedule(RescheduleOutcome),
    Unhandled,
}

/// Everything bound on page load: the booking form when the page has one,
/// the auto-reschedule buttons, and the flash banner timer.
pub struct PageRouter<D: Document> {
    document: SharedDocument<D>,
    booking: Option<BookingFormController<D>>,
    reschedule: AutoRescheduleAction<D>,
    flash: JoinHandle<usize>,
}

impl<D: Document> PageRouter<D> {
    pub async fn load(
        document: SharedDocument<D>,
        api: Arc<dyn BookingApi>,
        config: &AppConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let flash = FlashDismisser::new(document.clone(), config).spawn();

        let booking = match BookingFormController::bind(document.clone(), api.clone(), config, clock).await {
            Ok(controller) => Some(controller),
            Err(AppError::MissingElement(missing)) => {
                debug!("No booking form on this page (missing {})", missing);
                None
            }
            Err(err) => {
                warn!("Booking form not bound: {}", err);
                None
            }
        };

        let reschedule = AutoRescheduleAction::bind(document.clone(), api).await;

        info!(
            "Page loaded against {} (booking form: {})",
            config.backend_base_url,
            booking.is_some()
        );

        Self {
            document,
            booking,
            reschedule,
            flash,
        }
    }

    pub fn document(&self) -> &SharedDocument<D> {
        &self.document
    }

    pub fn booking(&self) -> Option<&BookingFormController<D>> {
        self.booking.as_ref()
    }

    pub async fn dispatch(&self, event: PageEvent) -> PageResponse {
        match event {
            PageEvent::Change(element) => {
                let Some(controller) = &self.booking else {
                    return PageResponse::Unhandled;
                };
                dispatch_change(controller, element)
                    .await
                    .map(PageResponse::Field)
                    .unwrap_or(PageResponse::Unhandled)
            }
            PageEvent::Click(handle) => match self.reschedule.on_click(handle).await {
                RescheduleOutcome::NotBound => PageResponse::Unhandled,
                outcome => PageResponse::Reschedule(outcome),
            },
        }
    }

    /// Waits for the flash timer and returns how many banners it removed.
    pub async fn finish(self) -> usize {
        match self.flash.await {
            Ok(removed) => removed,
            Err(err) => {
                warn!("Flash dismissal task failed: {}", err);
                0
            }
        }
    }
}
