use page_cell::{Document, ElementId};

use crate::models::FieldOutcome;
use crate::services::BookingFormController;

/// Routes a `change` event on a form element to its handler. Elements
/// without a change handler yield `None`.
pub async fn dispatch_change<D: Document>(
    controller: &BookingFormController<D>,
    element: ElementId,
) -> Option<FieldOutcome> {
    let outcome = match element {
        ElementId::Hospital => controller.on_hospital_change().await,
        ElementId::Department => controller.on_department_change().await,
        ElementId::Doctor => controller.on_doctor_change().await,
        ElementId::Date => controller.on_date_change().await,
        ElementId::Time => controller.on_time_change().await,
        ElementId::SlotAvailability | ElementId::SubmitBtn | ElementId::LoadingSpinner => return None,
    };
    Some(outcome)
}
