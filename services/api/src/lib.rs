//! API service for customer and farmer accounts and interview results
//!
//! Each vertical is split into a repository (storage access), a service
//! (validation and orchestration) and route handlers (HTTP boundary).

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod password;
pub mod rate_limiter;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

use anyhow::Result;
use axum::Router;

pub use crate::{config::AppConfig, state::AppState};

/// Build the complete application: routes, CORS and request tracing
pub fn build_app(state: AppState, config: &AppConfig) -> Result<Router> {
    routes::with_layers(routes::create_router(state), &config.cors_origins)
}
