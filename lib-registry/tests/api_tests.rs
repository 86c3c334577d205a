//! Router tests driven through `tower::ServiceExt::oneshot`

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use lib_compensation::GENESIS_ADDRESS;
use lib_registry::{router, MemoryRegistry};

const WALLET: &str = "0xAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAa";
const REFERRER: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

fn app() -> Router {
    router(Arc::new(MemoryRegistry::new(GENESIS_ADDRESS)))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn tx_hash(byte: &str) -> String {
    format!("0x{}", byte.repeat(32))
}

#[tokio::test]
async fn test_register_and_lookup_case_insensitive() {
    let app = app();

    let (status, body) = send(
        &app,
        post("/api/register", json!({ "walletAddress": WALLET, "referrerAddress": REFERRER })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["walletAddress"], WALLET.to_lowercase());
    assert_eq!(body["user"]["referrerAddress"], REFERRER);

    let (status, body) = send(&app, get(&format!("/api/users/{}", WALLET.to_lowercase()))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], true);

    let (_, body) = send(&app, get(&format!("/api/users/{}", REFERRER))).await;
    assert_eq!(body, json!({ "exists": false }));
}

#[tokio::test]
async fn test_register_rejections() {
    let app = app();

    let (status, body) = send(&app, post("/api/register", json!({ "walletAddress": WALLET }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing fields");

    let (status, body) = send(
        &app,
        post(
            "/api/register",
            json!({ "walletAddress": WALLET, "referrerAddress": WALLET.to_lowercase() }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot refer yourself");

    let register = json!({ "walletAddress": WALLET, "referrerAddress": REFERRER });
    send(&app, post("/api/register", register.clone())).await;
    let (status, body) = send(&app, post("/api/register", register)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already registered");
}

#[tokio::test]
async fn test_malformed_json_reports_error_body() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/register")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Malformed request body"));
}

#[tokio::test]
async fn test_referral_validation() {
    let app = app();

    let (_, body) = send(&app, get(&format!("/api/referral/{}", GENESIS_ADDRESS))).await;
    assert_eq!(body, json!({ "isValid": true, "isGenesis": true }));

    let (_, body) = send(&app, get(&format!("/api/referral/{}", REFERRER))).await;
    assert_eq!(body, json!({ "isValid": false }));

    send(
        &app,
        post("/api/register", json!({ "walletAddress": REFERRER, "referrerAddress": GENESIS_ADDRESS.to_string() })),
    )
    .await;
    let (_, body) = send(&app, get(&format!("/api/referral/{}", REFERRER.to_uppercase().replacen("0X", "0x", 1)))).await;
    assert_eq!(body, json!({ "isValid": true }));
}

#[tokio::test]
async fn test_invalid_path_address() {
    let app = app();
    let (status, body) = send(&app, get("/api/users/0x1234")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid wallet address: 0x1234");
}

#[tokio::test]
async fn test_invest_records_and_rejects_duplicates() {
    let app = app();
    let body = json!({
        "walletAddress": WALLET,
        "amount": 1100,
        "tokenType": "USDT",
        "txHash": tx_hash("ab"),
        "activationFee": 50,
        "roiEligible": "1050",
        "g4xReceived": 1000,
        "dailyRoi": 7.35
    });

    let (status, response) = send(&app, post("/api/invest", body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["success"], true);
    let investment = &response["investment"];
    assert_eq!(investment["walletAddress"], WALLET.to_lowercase());
    assert_eq!(investment["amount"], "1100.0");
    assert_eq!(investment["dailyRoi"], "7.35");
    assert_eq!(investment["referrerAddress"], Value::Null);

    let (status, response) = send(&app, post("/api/invest", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Transaction already recorded");

    let (status, response) = send(&app, get(&format!("/api/investments/{}", WALLET))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_invest_missing_fields() {
    let app = app();
    let (status, body) = send(
        &app,
        post("/api/invest", json!({ "walletAddress": WALLET, "amount": 0, "tokenType": "USDC", "txHash": tx_hash("cd") })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn test_health_counts() {
    let app = app();
    send(
        &app,
        post("/api/register", json!({ "walletAddress": WALLET, "referrerAddress": REFERRER })),
    )
    .await;
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "users": 1, "investments": 0 }));
}
