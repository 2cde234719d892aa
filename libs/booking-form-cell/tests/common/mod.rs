#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_form_cell::BookingFormController;
use page_cell::{shared, Document, ElementId, MemoryDocument, SharedDocument};
use shared_backend::HttpBookingApi;
use shared_models::Hospital;
use shared_utils::test_utils::TestConfig;

/// A headless booking page bound to a controller talking to a mock backend.
pub struct BookingTestPage {
    pub server: MockServer,
    pub config: TestConfig,
    pub document: SharedDocument<MemoryDocument>,
    pub controller: Arc<BookingFormController<MemoryDocument>>,
}

impl BookingTestPage {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = TestConfig::with_base_url(server.uri());
        let document = shared(MemoryDocument::booking_page(&[
            Hospital::new("1", "Lagos General"),
            Hospital::new("2", "Abuja Teaching Hospital"),
        ]));
        let api = Arc::new(HttpBookingApi::new(&config.to_app_config()));

        let controller = BookingFormController::bind(
            document.clone(),
            api,
            &config.to_app_config(),
            config.clock(),
        )
        .await
        .expect("booking page should bind");

        Self {
            server,
            config,
            document,
            controller: Arc::new(controller),
        }
    }

    pub async fn select(&self, id: ElementId, value: &str) {
        self.document.lock().await.set_value(id, value);
    }

    pub async fn mock_departments(&self, hospital_id: &str, body: Value, delay: Option<Duration>) {
        mount_get(&self.server, &format!("/get_departments/{}", hospital_id), 200, body, delay).await;
    }

    pub async fn mock_doctors(&self, department_id: &str, body: Value) {
        mount_get(&self.server, &format!("/get_doctors/{}", department_id), 200, body, None).await;
    }

    pub async fn mock_slots(&self, doctor_id: &str, date: &str, status: u16, body: Value, delay: Option<Duration>) {
        let mut response = ResponseTemplate::new(status).set_body_json(body);
        if let Some(delay) = delay {
            response = response.set_delay(delay);
        }
        Mock::given(method("GET"))
            .and(path("/get_available_slots"))
            .and(query_param("doctor_id", doctor_id))
            .and(query_param("date", date))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_check(&self, doctor_id: &str, date: &str, time: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path("/check_slot"))
            .and(query_param("doctor_id", doctor_id))
            .and(query_param("date", date))
            .and(query_param("time", time))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

pub async fn mount_get(server: &MockServer, route: &str, status: u16, body: Value, delay: Option<Duration>) {
    let mut response = ResponseTemplate::new(status).set_body_json(body);
    if let Some(delay) = delay {
        response = response.set_delay(delay);
    }
    Mock::given(method("GET"))
        .and(path(route.to_string()))
        .respond_with(response)
        .mount(server)
        .await;
}
