use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, trace};

use shared_models::Hospital;

use crate::document::Document;
use crate::models::{
    ActionButton, ButtonHandle, ElementId, FlashHandle, FlashMessage, SelectOption, StatusClass,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementState {
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    pub disabled: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    pub class: StatusClass,
    pub visible: bool,
}

/// In-memory page: what a browser would hold for the booking and
/// appointment-list templates, plus a record of every dialog shown.
#[derive(Debug, Default, Serialize)]
pub struct MemoryDocument {
    elements: BTreeMap<ElementId, ElementState>,
    flashes: Vec<FlashMessage>,
    buttons: Vec<ActionButton>,
    alerts: Vec<String>,
    confirmations: Vec<String>,
    #[serde(skip)]
    confirm_answers: VecDeque<bool>,
    #[serde(skip)]
    default_confirm: bool,
    reload_count: usize,
    next_flash: usize,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// The booking template: a hospital select rendered with `hospitals` and
    /// the dependent controls present but empty.
    pub fn booking_page(hospitals: &[Hospital]) -> Self {
        let mut document = Self::new();

        let mut hospital_options = vec![SelectOption::placeholder("Select a hospital")];
        hospital_options.extend(hospitals.iter().map(|h| SelectOption::new(h.id.clone(), h.name.clone())));

        document.elements.insert(ElementId::Hospital, ElementState {
            options: hospital_options,
            visible: true,
            ..ElementState::default()
        });

        for id in [ElementId::Department, ElementId::Doctor, ElementId::Time, ElementId::SubmitBtn] {
            document.elements.insert(id, ElementState {
                disabled: true,
                visible: true,
                ..ElementState::default()
            });
        }

        for id in [ElementId::Date, ElementId::SlotAvailability] {
            document.elements.insert(id, ElementState {
                visible: true,
                ..ElementState::default()
            });
        }

        document.elements.insert(ElementId::LoadingSpinner, ElementState::default());

        document
    }

    pub fn with_flash(mut self, text: impl Into<String>) -> Self {
        let handle = FlashHandle(self.next_flash);
        self.next_flash += 1;
        self.flashes.push(FlashMessage {
            handle,
            text: text.into(),
            opacity: 1.0,
            transition: None,
        });
        self
    }

    /// Adds a list-page button with the given `data-appt-id`, `data-status` and classes.
    pub fn with_button(mut self, appt_id: Option<&str>, status: Option<&str>, classes: &[&str]) -> Self {
        let handle = ButtonHandle(self.buttons.len());
        self.buttons.push(ActionButton {
            handle,
            appt_id: appt_id.map(str::to_string),
            status: status.map(str::to_string),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            disabled: false,
        });
        self
    }

    /// Answer returned by `confirm` once queued answers run out.
    pub fn confirm_by_default(mut self, answer: bool) -> Self {
        self.default_confirm = answer;
        self
    }

    pub fn queue_confirm_answer(&mut self, answer: bool) {
        self.confirm_answers.push_back(answer);
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    pub fn remove_element(&mut self, id: ElementId) {
        self.elements.remove(&id);
    }

    pub fn options(&self, id: ElementId) -> &[SelectOption] {
        self.elements.get(&id).map(|e| e.options.as_slice()).unwrap_or(&[])
    }

    /// Non-placeholder options of a select.
    pub fn choices(&self, id: ElementId) -> Vec<SelectOption> {
        self.options(id).iter().filter(|o| !o.is_placeholder()).cloned().collect()
    }

    /// Label of the currently selected option.
    pub fn selected_label(&self, id: ElementId) -> Option<&str> {
        let element = self.elements.get(&id)?;
        element
            .options
            .iter()
            .find(|o| o.value == element.value)
            .map(|o| o.label.as_str())
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.elements.get(&id).map(|e| e.visible).unwrap_or(false)
    }

    pub fn text(&self, id: ElementId) -> &str {
        self.elements.get(&id).map(|e| e.text.as_str()).unwrap_or("")
    }

    pub fn class(&self, id: ElementId) -> StatusClass {
        self.elements.get(&id).map(|e| e.class).unwrap_or_default()
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn confirmations(&self) -> &[String] {
        &self.confirmations
    }

    pub fn reload_count(&self) -> usize {
        self.reload_count
    }

    pub fn flashes(&self) -> &[FlashMessage] {
        &self.flashes
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut ElementState> {
        let element = self.elements.get_mut(&id);
        if element.is_none() {
            trace!("Ignoring update to missing element #{}", id);
        }
        element
    }
}

impl Document for MemoryDocument {
    fn has_element(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    fn value(&self, id: ElementId) -> String {
        self.elements.get(&id).map(|e| e.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, id: ElementId, value: &str) {
        if let Some(element) = self.element_mut(id) {
            element.value = value.to_string();
        }
    }

    fn set_options(&mut self, id: ElementId, options: Vec<SelectOption>) {
        if let Some(element) = self.element_mut(id) {
            element.value = options.first().map(|o| o.value.clone()).unwrap_or_default();
            element.options = options;
        }
    }

    fn is_disabled(&self, id: ElementId) -> bool {
        self.elements.get(&id).map(|e| e.disabled).unwrap_or(true)
    }

    fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if let Some(element) = self.element_mut(id) {
            element.disabled = disabled;
        }
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(element) = self.element_mut(id) {
            element.text = text.to_string();
        }
    }

    fn set_class(&mut self, id: ElementId, class: StatusClass) {
        if let Some(element) = self.element_mut(id) {
            element.class = class;
        }
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        if let Some(element) = self.element_mut(id) {
            element.visible = visible;
        }
    }

    fn alert(&mut self, message: &str) {
        info!("alert: {}", message);
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        let answer = self.confirm_answers.pop_front().unwrap_or(self.default_confirm);
        debug!("confirm '{}' answered {}", message, answer);
        answer
    }

    fn reload(&mut self) {
        info!("page reload requested");
        self.reload_count += 1;
    }

    fn flash_messages(&self) -> Vec<FlashHandle> {
        self.flashes.iter().map(|f| f.handle).collect()
    }

    fn fade_out(&mut self, flash: FlashHandle, transition: Duration) {
        if let Some(message) = self.flashes.iter_mut().find(|f| f.handle == flash) {
            message.transition = Some(transition);
            message.opacity = 0.0;
        }
    }

    fn remove_flash(&mut self, flash: FlashHandle) {
        self.flashes.retain(|f| f.handle != flash);
    }

    fn buttons(&self, class: &str) -> Vec<ActionButton> {
        self.buttons.iter().filter(|b| b.has_class(class)).cloned().collect()
    }

    fn button(&self, handle: ButtonHandle) -> Option<ActionButton> {
        self.buttons.iter().find(|b| b.handle == handle).cloned()
    }

    fn disable_button(&mut self, handle: ButtonHandle, class: &str) {
        if let Some(button) = self.buttons.iter_mut().find(|b| b.handle == handle) {
            button.disabled = true;
            if !button.has_class(class) {
                button.classes.push(class.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_page_has_every_form_element() {
        let document = MemoryDocument::booking_page(&[Hospital::new("1", "Lagos General")]);

        for id in ElementId::BOOKING_FORM {
            assert!(document.has_element(id), "missing #{}", id);
        }
        assert_eq!(document.choices(ElementId::Hospital), vec![SelectOption::new("1", "Lagos General")]);
        assert_eq!(document.value(ElementId::Hospital), "");
        assert!(!document.is_visible(ElementId::LoadingSpinner));
    }

    #[test]
    fn test_set_options_selects_first() {
        let mut document = MemoryDocument::booking_page(&[]);
        document.set_value(ElementId::Department, "3");
        document.show_placeholder(ElementId::Department, "Loading departments...");

        assert_eq!(document.value(ElementId::Department), "");
        assert_eq!(document.selected_label(ElementId::Department), Some("Loading departments..."));
        assert!(document.is_disabled(ElementId::Department));
    }

    #[test]
    fn test_confirm_answers_queue_then_default() {
        let mut document = MemoryDocument::new().confirm_by_default(true);
        document.queue_confirm_answer(false);

        assert!(!document.confirm("first?"));
        assert!(document.confirm("second?"));
        assert_eq!(document.confirmations().len(), 2);
    }

    #[test]
    fn test_updates_to_missing_elements_are_ignored() {
        let mut document = MemoryDocument::new();
        document.set_text(ElementId::SlotAvailability, "Slot is available");

        assert!(!document.has_element(ElementId::SlotAvailability));
        assert_eq!(document.text(ElementId::SlotAvailability), "");
    }

    #[test]
    fn test_disable_button_adds_class_once() {
        let mut document = MemoryDocument::new().with_button(Some("5"), Some("closed"), &["action-btn"]);
        document.disable_button(ButtonHandle(0), "disabled-btn");
        document.disable_button(ButtonHandle(0), "disabled-btn");

        let button = document.button(ButtonHandle(0)).unwrap();
        assert!(button.disabled);
        assert_eq!(button.classes, vec!["action-btn", "disabled-btn"]);
    }
}
