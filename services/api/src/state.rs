//! Application state shared across handlers

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    models::{Customer, Farmer},
    rate_limiter::{RateLimiter, RateLimiterConfig},
    repositories::{
        InMemoryAccountRepository, InMemoryInterviewResultRepository, PgAccountRepository,
        PgInterviewResultRepository,
    },
    services::{AccountService, InterviewResultService},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Present when running against PostgreSQL
    pub db_pool: Option<PgPool>,
    pub customers: AccountService<Customer>,
    pub farmers: AccountService<Farmer>,
    pub interview_results: InterviewResultService,
}

impl AppState {
    /// State backed by PostgreSQL
    pub fn postgres(pool: PgPool, rate_limiter_config: RateLimiterConfig) -> Self {
        Self {
            customers: AccountService::new(
                Arc::new(PgAccountRepository::<Customer>::new(pool.clone())),
                RateLimiter::new(rate_limiter_config.clone()),
            ),
            farmers: AccountService::new(
                Arc::new(PgAccountRepository::<Farmer>::new(pool.clone())),
                RateLimiter::new(rate_limiter_config),
            ),
            interview_results: InterviewResultService::new(Arc::new(
                PgInterviewResultRepository::new(pool.clone()),
            )),
            db_pool: Some(pool),
        }
    }

    /// State backed by process-local storage
    pub fn in_memory(rate_limiter_config: RateLimiterConfig) -> Self {
        Self {
            customers: AccountService::new(
                Arc::new(InMemoryAccountRepository::<Customer>::new()),
                RateLimiter::new(rate_limiter_config.clone()),
            ),
            farmers: AccountService::new(
                Arc::new(InMemoryAccountRepository::<Farmer>::new()),
                RateLimiter::new(rate_limiter_config),
            ),
            interview_results: InterviewResultService::new(Arc::new(
                InMemoryInterviewResultRepository::new(),
            )),
            db_pool: None,
        }
    }
}

impl FromRef<AppState> for AccountService<Customer> {
    fn from_ref(state: &AppState) -> Self {
        state.customers.clone()
    }
}

impl FromRef<AppState> for AccountService<Farmer> {
    fn from_ref(state: &AppState) -> Self {
        state.farmers.clone()
    }
}

impl FromRef<AppState> for InterviewResultService {
    fn from_ref(state: &AppState) -> Self {
        state.interview_results.clone()
    }
}
