//! Account repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use std::marker::PhantomData;
use tracing::info;

use crate::models::{Account, AccountKind, NewAccount};

/// Storage access for one kind of credentialed account
#[async_trait]
pub trait AccountRepository<K: AccountKind>: Send + Sync {
    /// Check whether an account with this email exists
    async fn exists_by_email(&self, email: &str) -> DatabaseResult<bool>;

    /// Find an account by email
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Account<K>>>;

    /// Persist a new account and return it with its assigned id.
    ///
    /// Fails with `DatabaseError::UniqueViolation` when the email is taken.
    async fn create(&self, new_account: &NewAccount) -> DatabaseResult<Account<K>>;
}

/// PostgreSQL account repository
#[derive(Debug, Clone)]
pub struct PgAccountRepository<K: AccountKind> {
    pool: PgPool,
    kind: PhantomData<K>,
}

impl<K: AccountKind> PgAccountRepository<K> {
    /// Create a new account repository
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            kind: PhantomData,
        }
    }
}

fn account_from_row<K: AccountKind>(row: &PgRow) -> Account<K> {
    Account::new(
        row.get("id"),
        row.get("name"),
        row.get("email"),
        row.get("phone"),
        row.get("password_hash"),
        row.get("created_at"),
    )
}

#[async_trait]
impl<K: AccountKind> AccountRepository<K> for PgAccountRepository<K> {
    async fn exists_by_email(&self, email: &str) -> DatabaseResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE email = $1)",
            K::TABLE
        );

        let exists: bool = sqlx::query_scalar(&sql)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(exists)
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Account<K>>> {
        info!("Finding {} by email: {}", K::LABEL, email);

        let sql = format!(
            r#"
            SELECT id, name, email, phone, password_hash, created_at
            FROM {}
            WHERE email = $1
            "#,
            K::TABLE
        );

        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(account_from_row))
    }

    async fn create(&self, new_account: &NewAccount) -> DatabaseResult<Account<K>> {
        info!("Creating new {}: {}", K::LABEL, new_account.email);

        let sql = format!(
            r#"
            INSERT INTO {} (name, email, phone, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, password_hash, created_at
            "#,
            K::TABLE
        );

        let row = sqlx::query(&sql)
            .bind(&new_account.name)
            .bind(&new_account.email)
            .bind(&new_account.phone)
            .bind(&new_account.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        Ok(account_from_row(&row))
    }
}
