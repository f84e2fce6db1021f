//! Signup and login for credentialed accounts
//!
//! One implementation serves every [`AccountKind`]; customers and farmers
//! only differ by their repository and their throttling keys.

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{Account, AccountKind, LoginRequest, NewAccount, SignupRequest},
    password,
    rate_limiter::RateLimiter,
    repositories::AccountRepository,
    validation,
};

/// Account service for one account kind
#[derive(Clone)]
pub struct AccountService<K: AccountKind> {
    repository: Arc<dyn AccountRepository<K>>,
    rate_limiter: RateLimiter,
}

impl<K: AccountKind> AccountService<K> {
    /// Create a new account service
    pub fn new(repository: Arc<dyn AccountRepository<K>>, rate_limiter: RateLimiter) -> Self {
        Self {
            repository,
            rate_limiter,
        }
    }

    /// Register a new account.
    ///
    /// Fails with `DuplicateEmail` without writing when the email is taken.
    pub async fn signup(&self, request: SignupRequest) -> ApiResult<Account<K>> {
        validation::validate_email(&request.email).map_err(ApiError::Validation)?;
        validation::validate_password(&request.password).map_err(ApiError::Validation)?;
        validation::validate_name(request.name.as_deref()).map_err(ApiError::Validation)?;
        validation::validate_phone(request.phone.as_deref()).map_err(ApiError::Validation)?;

        if self.repository.exists_by_email(&request.email).await? {
            warn!("Rejected {} signup, email already exists", K::LABEL);
            return Err(ApiError::DuplicateEmail);
        }

        let new_account = NewAccount {
            name: request.name,
            email: request.email,
            phone: request.phone,
            password_hash: password::hash_password(&request.password).await?,
        };

        match self.repository.create(&new_account).await {
            Ok(account) => {
                info!("Registered {} {}", K::LABEL, account.id);
                Ok(account)
            }
            // Lost a race against a concurrent signup
            Err(e) if e.is_unique_violation() => Err(ApiError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    /// Check credentials and return the stored account
    pub async fn login(&self, request: LoginRequest) -> ApiResult<Account<K>> {
        let throttle_key = format!("{}:{}", K::LABEL, request.email);

        if !self.rate_limiter.is_allowed(&throttle_key).await {
            warn!("Throttled {} login for {}", K::LABEL, request.email);
            return Err(ApiError::TooManyAttempts);
        }

        let account = self.repository.find_by_email(&request.email).await?;

        let verified = match &account {
            Some(account) => {
                password::verify_password(&request.password, &account.password_hash).await?
            }
            None => {
                password::burn_verification(&request.password).await;
                false
            }
        };

        match account {
            Some(account) if verified => {
                self.rate_limiter.reset(&throttle_key).await;
                info!("{} {} logged in", K::LABEL, account.id);
                Ok(account)
            }
            _ => {
                self.rate_limiter.record_failure(&throttle_key).await;
                warn!("Failed {} login for {}", K::LABEL, request.email);
                Err(ApiError::InvalidCredentials)
            }
        }
    }
}
