//! API service routes

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    error::ApiResult,
    models::{
        AccountKind, AccountResponse, CreateInterviewResultRequest, Customer, Farmer,
        LoginRequest, SignupRequest,
    },
    services::{AccountService, InterviewResultService},
    state::AppState,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/customers/signup", post(signup::<Customer>))
        .route("/api/customers/login", post(login::<Customer>))
        .route("/api/farmers/signup", post(signup::<Farmer>))
        .route("/api/farmers/login", post(login::<Farmer>))
        .route("/api/v1/interview/result", post(create_interview_result))
        .with_state(state)
}

/// Wrap the router with CORS and request tracing
pub fn with_layers(router: Router, cors_origins: &[String]) -> Result<Router> {
    Ok(router
        .layer(cors_layer(cors_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// CORS for the browser frontend. No configured origins means any origin.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60)))
}

/// Health check endpoint.
///
/// Answers 503 with `"status": "degraded"` when PostgreSQL is unreachable.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (storage, database_reachable) = match &state.db_pool {
        Some(pool) => ("postgres", common::database::health_check(pool).await),
        None => ("memory", true),
    };

    let (status, label) = if database_reachable {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(json!({
            "status": label,
            "service": "api-service",
            "storage": storage,
            "database": database_reachable,
        })),
    )
}

/// Account signup endpoint
pub async fn signup<K: AccountKind>(
    State(service): State<AccountService<K>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    info!("Signup request for {}: {}", K::LABEL, payload.email);

    let account = service.signup(payload).await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Account login endpoint
pub async fn login<K: AccountKind>(
    State(service): State<AccountService<K>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    info!("Login attempt for {}: {}", K::LABEL, payload.email);

    let account = service.login(payload).await?;

    Ok(Json(AccountResponse::from(account)))
}

/// Interview result creation endpoint
pub async fn create_interview_result(
    State(service): State<InterviewResultService>,
    payload: Result<Json<CreateInterviewResultRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    info!("Interview result submitted for: {}", payload.candidate_name);

    let result = service.create_result(payload).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_valid_origins() {
        assert!(cors_layer(&[]).is_ok());
        assert!(cors_layer(&["http://localhost:3000".to_string()]).is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_header_values() {
        assert!(cors_layer(&["http://bad\norigin".to_string()]).is_err());
    }
}
