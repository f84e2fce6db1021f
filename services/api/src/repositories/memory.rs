//! In-memory repositories
//!
//! Used for local development without PostgreSQL and by the test-suite.
//! Uniqueness is enforced under the write lock, mirroring the database
//! constraints.

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use crate::{
    models::{Account, AccountKind, InterviewResult, NewAccount, NewInterviewResult},
    repositories::{AccountRepository, InterviewResultRepository},
};

#[derive(Debug)]
struct AccountTable<K: AccountKind> {
    next_id: i64,
    by_email: HashMap<String, Account<K>>,
}

/// In-memory account repository
#[derive(Debug, Clone)]
pub struct InMemoryAccountRepository<K: AccountKind> {
    table: Arc<RwLock<AccountTable<K>>>,
}

impl<K: AccountKind> InMemoryAccountRepository<K> {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(AccountTable {
                next_id: 1,
                by_email: HashMap::new(),
            })),
        }
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.table.read().await.by_email.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<K: AccountKind> Default for InMemoryAccountRepository<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K: AccountKind> AccountRepository<K> for InMemoryAccountRepository<K> {
    async fn exists_by_email(&self, email: &str) -> DatabaseResult<bool> {
        Ok(self.table.read().await.by_email.contains_key(email))
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Account<K>>> {
        Ok(self.table.read().await.by_email.get(email).cloned())
    }

    async fn create(&self, new_account: &NewAccount) -> DatabaseResult<Account<K>> {
        let mut table = self.table.write().await;

        if table.by_email.contains_key(&new_account.email) {
            return Err(DatabaseError::UniqueViolation(format!(
                "{}_email_key",
                K::TABLE
            )));
        }

        let account = Account::new(
            table.next_id,
            new_account.name.clone(),
            new_account.email.clone(),
            new_account.phone.clone(),
            new_account.password_hash.clone(),
            Utc::now(),
        );
        table.next_id += 1;
        table
            .by_email
            .insert(account.email.clone(), account.clone());

        Ok(account)
    }
}

/// In-memory interview result repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryInterviewResultRepository {
    results: Arc<RwLock<HashMap<String, InterviewResult>>>,
}

impl InMemoryInterviewResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored result
    pub async fn get(&self, candidate_name: &str) -> Option<InterviewResult> {
        self.results.read().await.get(candidate_name).cloned()
    }

    /// Number of stored results
    pub async fn len(&self) -> usize {
        self.results.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl InterviewResultRepository for InMemoryInterviewResultRepository {
    async fn exists_by_candidate_name(&self, candidate_name: &str) -> DatabaseResult<bool> {
        Ok(self.results.read().await.contains_key(candidate_name))
    }

    async fn create(&self, result: &NewInterviewResult) -> DatabaseResult<InterviewResult> {
        let mut results = self.results.write().await;

        if results.contains_key(&result.candidate_name) {
            return Err(DatabaseError::UniqueViolation(
                "interview_results_pkey".to_string(),
            ));
        }

        let stored = InterviewResult {
            candidate_name: result.candidate_name.clone(),
            candidate_score: result.candidate_score,
            is_successful: result.is_successful,
            created_at: Utc::now(),
        };
        results.insert(stored.candidate_name.clone(), stored.clone());

        Ok(stored)
    }
}
