//! Integration tests for dit-api endpoints
//!
//! Requests go through the full router with `oneshot`; no socket is bound.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use dit_api::store::{DataStore, CAMPAIGNS_FILE};
use dit_api::{build_router, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

fn setup_app() -> axum::Router {
    build_router(AppState::new(DataStore::mock()))
}

fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Health and CORS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let response = setup_app().oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "dit-api");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_cors_preflight() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/donations")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = setup_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_wrong_method_is_405() {
    let response = setup_app()
        .oneshot(test_request("DELETE", "/api/donations"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Donations
// =============================================================================

#[tokio::test]
async fn test_list_donations_with_filters() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/donations?region=Europe"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["donorName"], "Jane Smith");
    assert_eq!(body[0]["location"]["region"], "Europe");

    let response = app
        .oneshot(test_request("GET", "/api/donations?campaign=lunch&startDate=2024-01-01"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], "don-001");
}

#[tokio::test]
async fn test_list_donations_invalid_date() {
    let response = setup_app()
        .oneshot(test_request("GET", "/api/donations?startDate=yesterday"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_donation_then_list() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/donations",
            json!({
                "donorId": "donor-009",
                "donorName": "<Sam>",
                "amount": 125,
                "campaign": "Library Books Drive",
                "region": "Asia"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = extract_json(response.into_body()).await;
    assert!(created["id"].as_str().unwrap().starts_with("don-"));
    assert_eq!(created["donorName"], "Sam");
    assert!(created["date"].is_string());

    let response = app
        .oneshot(test_request("GET", "/api/donations?donor=donor-009"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["campaign"], "Library Books Drive");
}

#[tokio::test]
async fn test_create_donation_validation() {
    let app = setup_app();

    let missing = app
        .clone()
        .oneshot(json_request("POST", "/api/donations", json!({"donorId": "d", "amount": 5})))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let negative = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/donations",
            json!({"donorId": "d", "amount": -5, "campaign": "c"}),
        ))
        .await
        .unwrap();
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(negative.into_body()).await;
    assert_eq!(body["error"], "Invalid amount: must be a positive number");

    let malformed = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/donations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Campaigns, locations, impact summary
// =============================================================================

#[tokio::test]
async fn test_campaigns_from_export_directory() {
    let temp = TempDir::new().unwrap();
    let campaigns = json!([{
        "id": "abc123def456",
        "name": "Acme Charitable Trust",
        "description": "Advancing education",
        "goal": 80000.0,
        "raised": 60000.0,
        "category": "Education",
        "location": {"country": "United States", "region": "CA", "coordinates": [-119.4, 36.7]},
        "startDate": "2023-01-01",
        "endDate": "2023-12-31",
        "status": "active",
        "beneficiaries": 150,
        "impactMetrics": {"peopleHelped": 150, "projectsCompleted": 4, "resourcesDistributed": 300}
    }]);
    std::fs::write(temp.path().join(CAMPAIGNS_FILE), campaigns.to_string()).unwrap();

    let app = build_router(AppState::new(DataStore::load(temp.path())));

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/campaigns?status=active&region=CA"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["impactMetrics"]["peopleHelped"], 150);

    // Impact locations were not exported, so the mock collection is served
    let response = app
        .oneshot(test_request("GET", "/api/impact-locations"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body[0]["name"], "North America");
}

#[tokio::test]
async fn test_impact_summary() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/impact-summary"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["totalDonations"], 2);
    assert_eq!(body["totalAmount"], 750.0);
    assert!(body["regionBreakdown"]["Europe"].is_object());

    let response = app
        .oneshot(test_request("GET", "/api/impact-summary?region=Europe"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["totalDonations"], 1);
    assert_eq!(body["totalAmount"], 250.0);
    assert_eq!(body["totalBeneficiaries"], 890);
}

// =============================================================================
// Donors
// =============================================================================

#[tokio::test]
async fn test_donor_lifecycle() {
    let app = setup_app();

    let response = app.clone().oneshot(test_request("GET", "/api/donors")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 6);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/donors",
            json!({"name": "Ada Lovelace", "email": "ada@example.org"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = extract_json(response.into_body()).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["totalDonated"], 0.0);
    assert_eq!(created["preferredCampaigns"], json!([]));

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/donors/{}", id),
            json!({"id": "other", "name": "Ada King"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = extract_json(response.into_body()).await;
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["name"], "Ada King");

    let response = app
        .clone()
        .oneshot(test_request("DELETE", &format!("/api/donors/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(test_request("GET", &format!("/api/donors/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Donor not found");
}

#[tokio::test]
async fn test_donor_errors() {
    let app = setup_app();

    let missing = app
        .clone()
        .oneshot(json_request("POST", "/api/donors", json!({"name": "No Email"})))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let duplicate = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/donors",
            json!({"name": "John Again", "email": "john.doe@email.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let update_missing = app
        .clone()
        .oneshot(json_request("PUT", "/api/donors/donor-999", json!({"name": "x"})))
        .await
        .unwrap();
    assert_eq!(update_missing.status(), StatusCode::NOT_FOUND);

    let delete_missing = app
        .oneshot(test_request("DELETE", "/api/donors/donor-999"))
        .await
        .unwrap();
    assert_eq!(delete_missing.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Feedback
// =============================================================================

#[tokio::test]
async fn test_feedback_submit_and_filter() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/feedback",
            json!({
                "beneficiaryName": "Maria",
                "campaign": "School Lunch Program",
                "region": "North America",
                "message": "Thank you!",
                "rating": 5,
                "status": "approved"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "Feedback submitted successfully");
    assert_eq!(body["feedback"]["status"], "pending");
    assert_eq!(body["feedback"]["rating"], 5);
    assert!(body["feedback"]["id"].as_str().unwrap().starts_with("fb-"));

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/feedback?status=pending&region=North%20America"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = app
        .oneshot(test_request("GET", "/api/feedback?campaign=Other"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_feedback_missing_fields() {
    let response = setup_app()
        .oneshot(json_request(
            "POST",
            "/api/feedback",
            json!({"beneficiaryName": "Maria", "campaign": "c", "region": "r"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Missing required fields");
}

// =============================================================================
// Notifications
// =============================================================================

#[tokio::test]
async fn test_notifications_require_donor_id() {
    let response = setup_app()
        .oneshot(test_request("GET", "/api/notifications"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "donorId is required");
}

#[tokio::test]
async fn test_list_notifications_newest_first() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/notifications?donorId=donor-001"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["notif-002", "notif-001"]);
    assert_eq!(body[0]["type"], "impact_update");
    assert_eq!(body[1]["priority"], "high");

    let response = app
        .oneshot(test_request("GET", "/api/notifications?donorId=donor-001&unread=true"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["read"], false);
}

#[tokio::test]
async fn test_send_notification_then_mark_read() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/notifications",
            json!({
                "donorId": "donor-002",
                "type": "milestone_reached",
                "title": "Goal reached",
                "message": "Scholarship Fund hit its goal",
                "sendEmail": true
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = extract_json(response.into_body()).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("notif-"));
    assert_eq!(created["read"], false);
    assert_eq!(created["priority"], "medium");

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/notifications/unread-count?donorId=donor-002"))
        .await
        .unwrap();
    assert_eq!(extract_json(response.into_body()).await["count"], 1);

    let response = app
        .clone()
        .oneshot(test_request("PUT", &format!("/api/notifications/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await["success"], true);

    let response = app
        .oneshot(test_request("GET", "/api/notifications/unread-count?donorId=donor-002"))
        .await
        .unwrap();
    assert_eq!(extract_json(response.into_body()).await["count"], 0);
}

#[tokio::test]
async fn test_send_notification_missing_fields() {
    let response = setup_app()
        .oneshot(json_request(
            "POST",
            "/api/notifications",
            json!({"donorId": "donor-002", "type": "thank_you", "title": "Thanks"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn test_send_notification_unknown_type() {
    let response = setup_app()
        .oneshot(json_request(
            "POST",
            "/api/notifications",
            json!({"donorId": "d", "type": "spam", "title": "t", "message": "m"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mark_unknown_notification_read() {
    let response = setup_app()
        .oneshot(test_request("PUT", "/api/notifications/notif-404"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Notification not found");
}

#[tokio::test]
async fn test_mark_all_notifications_read() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/notifications/read-all", json!({"donorId": "donor-001"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await["updated"], 1);

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/notifications/read-all", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(test_request("GET", "/api/notifications?donorId=donor-001&unread=true"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body.as_array().unwrap().is_empty());
}

// =============================================================================
// Testimonials
// =============================================================================

#[tokio::test]
async fn test_list_testimonials_with_filters() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/testimonials"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await.as_array().unwrap().len(), 3);

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/testimonials?region=Asia"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["beneficiaryName"], "Li Wei");
    assert_eq!(body[0]["impactType"], "scholarships_provided");

    let response = app
        .oneshot(test_request("GET", "/api/testimonials?verified=false"))
        .await
        .unwrap();
    assert!(extract_json(response.into_body()).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_testimonials_are_read_only() {
    let response = setup_app()
        .oneshot(json_request("POST", "/api/testimonials", json!({"message": "hi"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
