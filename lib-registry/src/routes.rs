//! REST routes
//!
//! | Route | Success |
//! |-------|---------|
//! | `GET /api/users/:address` | `200 { exists, user? }` |
//! | `GET /api/referral/:address` | `200 { isValid, isGenesis? }` |
//! | `POST /api/register` | `201 { success, user }` |
//! | `POST /api/invest` | `201 { success, investment }` |
//! | `GET /api/investments/:address` | `200 [investment]` |
//! | `GET /health` | `200 { status, users, investments }` |
//!
//! Failures return `{ error }` with the status from `RegistryError`.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use lib_types::{
    InvestRequest, InvestResponse, InvestmentRecord, ReferralValidation, RegisterRequest,
    RegisterResponse, UserLookup,
};

use crate::error::{RegistryError, RegistryResult};
use crate::requests::{investment_record, parse_address, Registration};
use crate::store::MemoryRegistry;

const MAX_REQUEST_BODY_SIZE: usize = 64 * 1024;
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub type RegistryState = Arc<MemoryRegistry>;

/// Build the registry router with CORS, tracing, timeout and body limits
pub fn router(registry: RegistryState) -> Router {
    let api = Router::new()
        .route("/users/:address", get(get_user))
        .route("/referral/:address", get(get_referral))
        .route("/register", post(post_register))
        .route("/invest", post(post_invest))
        .route("/investments/:address", get(get_investments));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .layer(axum::extract::DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE))
        .with_state(registry)
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> RegistryResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| RegistryError::MalformedBody(rejection.body_text()))
}

async fn health(State(registry): State<RegistryState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "users": registry.user_count().await,
        "investments": registry.investment_count().await,
    }))
}

async fn get_user(
    State(registry): State<RegistryState>,
    Path(address): Path<String>,
) -> RegistryResult<Json<UserLookup>> {
    let address = parse_address(&address)?;
    Ok(Json(registry.lookup_user(&address).await))
}

async fn get_referral(
    State(registry): State<RegistryState>,
    Path(address): Path<String>,
) -> RegistryResult<Json<ReferralValidation>> {
    let address = parse_address(&address)?;
    Ok(Json(registry.validate_referral(&address).await))
}

async fn post_register(
    State(registry): State<RegistryState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> RegistryResult<(StatusCode, Json<RegisterResponse>)> {
    let request = json_body(body)?;
    let registration = Registration::try_from(&request)?;
    let user = registry.register(registration, Utc::now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            user: Some(user),
        }),
    ))
}

async fn post_invest(
    State(registry): State<RegistryState>,
    body: Result<Json<InvestRequest>, JsonRejection>,
) -> RegistryResult<(StatusCode, Json<InvestResponse>)> {
    let request = json_body(body)?;
    let record = investment_record(&request, Utc::now())?;
    let investment = registry.record_investment(record).await?;
    Ok((
        StatusCode::CREATED,
        Json(InvestResponse {
            success: true,
            investment: Some(investment),
        }),
    ))
}

async fn get_investments(
    State(registry): State<RegistryState>,
    Path(address): Path<String>,
) -> RegistryResult<Json<Vec<InvestmentRecord>>> {
    let address = parse_address(&address)?;
    Ok(Json(registry.investments_by(&address).await))
}
