use assert_matches::assert_matches;
use chrono::NaiveDate;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_backend::{BookingApi, HttpBookingApi};
use shared_models::{AppError, BookingSubmission, Department, RescheduleStatus, TimeSlot};
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

async fn api_for(server: &MockServer) -> HttpBookingApi {
    HttpBookingApi::new(&TestConfig::with_base_url(server.uri()).to_app_config())
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

#[tokio::test]
async fn test_departments_are_decoded_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_departments/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::departments_response()))
        .expect(1)
        .mount(&server)
        .await;

    let departments = api_for(&server).await.departments("4").await.unwrap();

    assert_eq!(departments.len(), 3);
    assert_eq!(departments[0], Department::new("1", "Cardiology"));
    assert_eq!(departments[2], Department::new("3", "Pediatrics"));
}

#[tokio::test]
async fn test_non_success_status_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_doctors/9"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = api_for(&server).await.doctors("9").await;

    assert_matches!(result, Err(AppError::Network(ref msg)) if msg.contains("500"));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_doctors/9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = api_for(&server).await.doctors("9").await;

    assert_matches!(result, Err(AppError::Decode(_)));
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    let api = HttpBookingApi::new(&TestConfig::with_base_url("http://127.0.0.1:1").to_app_config());

    let result = api.departments("1").await;

    assert_matches!(result, Err(AppError::Network(_)));
}

#[tokio::test]
async fn test_available_slots_sends_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_available_slots"))
        .and(query_param("doctor_id", "11"))
        .and(query_param("date", "2025-06-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::slots_response()))
        .expect(1)
        .mount(&server)
        .await;

    let slots = api_for(&server).await.available_slots("11", date()).await.unwrap();

    assert_eq!(slots, vec![
        TimeSlot::from("08:00 AM"),
        TimeSlot::from("09:00 AM"),
        TimeSlot::from("02:00 PM"),
    ]);
}

#[tokio::test]
async fn test_available_slots_error_field_is_domain_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_available_slots"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockBackendResponses::slot_error_response("Missing required parameters")),
        )
        .mount(&server)
        .await;

    let result = api_for(&server).await.available_slots("11", date()).await;

    assert_matches!(result, Err(AppError::Domain(ref msg)) if msg == "Missing required parameters");
}

#[tokio::test]
async fn test_check_slot_encodes_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/check_slot"))
        .and(query_param("doctor_id", "11"))
        .and(query_param("date", "2025-06-02"))
        .and(query_param("time", "09:00 AM"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockBackendResponses::slot_unavailable_response(Some("Slot is fully booked"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = api_for(&server)
        .await
        .check_slot("11", date(), &TimeSlot::from("09:00 AM"))
        .await
        .unwrap();

    assert!(!result.available);
    assert_eq!(result.reason.as_deref(), Some("Slot is fully booked"));
}

#[tokio::test]
async fn test_auto_reschedule_posts_json_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auto_reschedule/42"))
        .and(header("content-type", "application/json"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockBackendResponses::reschedule_response("warning", "No available slots found for rescheduling."),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let response = api_for(&server).await.auto_reschedule("42").await.unwrap();

    assert_eq!(response.status, RescheduleStatus::Warning);
    assert_eq!(response.message, "No available slots found for rescheduling.");
}

#[tokio::test]
async fn test_submit_booking_is_form_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/book"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "hospital=1&department=2&doctor=11&date=2025-06-02&time=09%3A00+AM",
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let submission = BookingSubmission {
        hospital: "1".to_string(),
        department: "2".to_string(),
        doctor: "11".to_string(),
        date: date(),
        time: TimeSlot::from("09:00 AM"),
    };

    let result = api_for(&server).await.submit_booking(&submission).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_ids_are_encoded_as_single_segments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_departments/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::departments_response()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auto_reschedule/7%3Fx%23y"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockBackendResponses::reschedule_response("info", "queued")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server).await;

    assert_eq!(api.departments("a/b").await.unwrap().len(), 3);
    assert_eq!(api.auto_reschedule("7?x#y").await.unwrap().status, RescheduleStatus::Info);
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clinic/get_doctors/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::doctors_response()))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpBookingApi::new(&TestConfig::with_base_url(format!("{}/clinic", server.uri())).to_app_config());

    assert_eq!(api.doctors("2").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_unusable_base_url_is_configuration_error() {
    let api = HttpBookingApi::new(&TestConfig::with_base_url("mailto:desk@clinic.local").to_app_config());

    assert_matches!(api.doctors("2").await, Err(AppError::Configuration(_)));
}
