use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::models::{ActionButton, ButtonHandle, ElementId, FlashHandle, SelectOption, StatusClass};

/// The page surface the controllers read from and mutate.
///
/// Implementations are expected to behave like a browser document: replacing
/// a select's options selects the first one, alerts block until dismissed and
/// `confirm` returns the user's answer.
pub trait Document: Send + 'static {
    fn has_element(&self, id: ElementId) -> bool;

    /// Current value of an input or select; empty when nothing is chosen.
    fn value(&self, id: ElementId) -> String;

    fn set_value(&mut self, id: ElementId, value: &str);

    fn set_options(&mut self, id: ElementId, options: Vec<SelectOption>);

    fn is_disabled(&self, id: ElementId) -> bool;

    fn set_disabled(&mut self, id: ElementId, disabled: bool);

    fn set_text(&mut self, id: ElementId, text: &str);

    fn set_class(&mut self, id: ElementId, class: StatusClass);

    fn set_visible(&mut self, id: ElementId, visible: bool);

    fn alert(&mut self, message: &str);

    fn confirm(&mut self, message: &str) -> bool;

    fn reload(&mut self);

    fn flash_messages(&self) -> Vec<FlashHandle>;

    /// Starts an opacity transition to fully transparent.
    fn fade_out(&mut self, flash: FlashHandle, transition: Duration);

    fn remove_flash(&mut self, flash: FlashHandle);

    /// Buttons carrying the given CSS class, in document order.
    fn buttons(&self, class: &str) -> Vec<ActionButton>;

    fn button(&self, handle: ButtonHandle) -> Option<ActionButton>;

    fn disable_button(&mut self, handle: ButtonHandle, class: &str);

    /// Replaces a select's contents with a single disabled placeholder.
    fn show_placeholder(&mut self, id: ElementId, label: &str) {
        self.set_options(id, vec![SelectOption::placeholder(label)]);
        self.set_disabled(id, true);
    }

    fn set_status(&mut self, id: ElementId, text: &str, class: StatusClass) {
        self.set_text(id, text);
        self.set_class(id, class);
    }
}

pub type SharedDocument<D> = Arc<Mutex<D>>;

pub fn shared<D: Document>(document: D) -> SharedDocument<D> {
    Arc::new(Mutex::new(document))
}
