//! Credentialed account models shared by customers and farmers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, marker::PhantomData};

/// Marker for a kind of credentialed account.
///
/// Each kind owns its own table and its own email uniqueness domain, so a
/// customer and a farmer may register with the same address.
pub trait AccountKind: Debug + Clone + Copy + Send + Sync + 'static {
    /// Table holding accounts of this kind
    const TABLE: &'static str;
    /// Singular label used in logs and throttling keys
    const LABEL: &'static str;
}

/// Customer account kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customer;

impl AccountKind for Customer {
    const TABLE: &'static str = "customers";
    const LABEL: &'static str = "customer";
}

/// Farmer account kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Farmer;

impl AccountKind for Farmer {
    const TABLE: &'static str = "farmers";
    const LABEL: &'static str = "farmer";
}

/// Stored account entity
#[derive(Debug, Clone)]
pub struct Account<K: AccountKind> {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    kind: PhantomData<K>,
}

impl<K: AccountKind> Account<K> {
    pub fn new(
        id: i64,
        name: Option<String>,
        email: String,
        phone: Option<String>,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            phone,
            password_hash,
            created_at,
            kind: PhantomData,
        }
    }
}

/// Account insertion payload, with the password already hashed
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
}

/// Request for account signup
#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Request for account login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for account operations. Never carries the credential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountResponse {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl<K: AccountKind> From<Account<K>> for AccountResponse {
    fn from(account: Account<K>) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            phone: account.phone,
            created_at: account.created_at,
        }
    }
}
