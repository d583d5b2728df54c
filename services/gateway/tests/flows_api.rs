//! Tracking, booking, and intro flow integration tests.

use serde_json::{json, Value};
use shipdeck_gateway::{api, state::AppState};
use tokio::net::TcpListener;

struct TestServer {
    base_url: String,
    client: reqwest::Client,
}

impl TestServer {
    async fn spawn() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info,shipdeck_gateway=debug".into()),
            )
            .with_test_writer()
            .try_init();

        let state = AppState::new(2);
        let app = api::create_router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

fn valid_booking() -> Value {
    json!({
        "sender": {
            "name": "Ada Lovelace",
            "street1": "1 Analytical Way",
            "city": "London",
            "state": "LDN",
            "zip": "EC1A",
            "phone": "+44 20 7946 0000",
            "email": "ada@example.com"
        },
        "receiver": {
            "name": "Grace Hopper",
            "street1": "2 Compiler Court",
            "city": "Arlington",
            "state": "VA",
            "zip": "22201",
            "phone": "+1 555 0100"
        },
        "parcel": {
            "length": 10.0,
            "width": 6.0,
            "height": 4.0,
            "weight": 2.0
        }
    })
}

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::spawn().await;

    let resp = server
        .client
        .get(format!("{}/healthz", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "gateway");

    let resp = server
        .client
        .get(format!("{}/readyz", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["components"]["board"]["status"], "ok");

    let resp = server
        .client
        .get(format!("{}/livez", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_tracking_lookup() {
    let server = TestServer::spawn().await;

    let resp = server
        .client
        .post(format!("{}/v1/tracking", server.base_url))
        .json(&json!({ "tracking_number": "SHIPPO123456" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["carrier"], "Shippo");
    assert_eq!(body["tracking_number"], "SHIPPO123456");
    assert_eq!(body["status"], "TRANSIT");

    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["status"], "TRANSIT");
    assert_eq!(history[1]["status"], "PRE_TRANSIT");
}

#[tokio::test]
async fn test_tracking_number_length_is_validated() {
    let server = TestServer::spawn().await;

    for bad in ["short", "this-tracking-number-is-way-too-long"] {
        let resp = server
            .client
            .post(format!("{}/v1/tracking", server.base_url))
            .json(&json!({ "tracking_number": bad }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        assert_eq!(
            resp.headers()["content-type"],
            "application/problem+json"
        );
        let problem: Value = resp.json().await.unwrap();
        assert_eq!(problem["code"], "invalid_tracking_number");
    }
}

#[tokio::test]
async fn test_booking_succeeds_with_full_form() {
    let server = TestServer::spawn().await;

    let resp = server
        .client
        .post(format!("{}/v1/shipments", server.base_url))
        .json(&valid_booking())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert!(body["shipment_id"].as_str().unwrap().starts_with("shp_"));
    assert_eq!(body["transaction_status"], "SUCCESS");
    assert_eq!(body["tracking_number"], "SHIP987654321");
    assert!(body["label_url"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn test_booking_reports_all_missing_fields() {
    let server = TestServer::spawn().await;

    let mut booking = valid_booking();
    booking["sender"]["email"] = json!("");
    booking["receiver"]["phone"] = json!("");
    booking["parcel"]["weight"] = json!(0);

    let resp = server
        .client
        .post(format!("{}/v1/shipments", server.base_url))
        .json(&booking)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let problem: Value = resp.json().await.unwrap();
    assert_eq!(problem["code"], "missing_required_fields");

    let fields: Vec<&str> = problem["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["sender.email", "receiver.phone", "parcel.weight"]);
}

#[tokio::test]
async fn test_receiver_email_is_optional() {
    let server = TestServer::spawn().await;

    // The booking form never asks for a receiver email.
    let booking = valid_booking();
    assert!(booking["receiver"].get("email").is_none());

    let resp = server
        .client
        .post(format!("{}/v1/shipments", server.base_url))
        .json(&booking)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
}

#[tokio::test]
async fn test_intro_acknowledgement_flow() {
    let server = TestServer::spawn().await;

    // First visit: a fresh session that has not acknowledged.
    let resp = server
        .client
        .get(format!("{}/v1/intro", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let session_id = body["session_id"].as_str().unwrap().to_string();
    assert!(session_id.starts_with("sess_"));
    assert_eq!(body["acknowledged"], false);

    // Acknowledge the disclaimer for this session.
    let resp = server
        .client
        .post(format!("{}/v1/intro/ack", server.base_url))
        .header("x-session-id", &session_id)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    // Returning with the same session skips the disclaimer.
    let resp = server
        .client
        .get(format!("{}/v1/intro", server.base_url))
        .header("x-session-id", &session_id)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["acknowledged"], true);
    assert_eq!(body["session_id"].as_str().unwrap(), session_id);

    // A different session still sees the disclaimer.
    let resp = server
        .client
        .get(format!("{}/v1/intro", server.base_url))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["acknowledged"], false);
}

#[tokio::test]
async fn test_intro_ack_requires_session_header() {
    let server = TestServer::spawn().await;

    let resp = server
        .client
        .post(format!("{}/v1/intro/ack", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let problem: Value = resp.json().await.unwrap();
    assert_eq!(problem["code"], "missing_session_id");
}
