//! Interview result repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{InterviewResult, NewInterviewResult, Score};

/// Storage access for interview results
#[async_trait]
pub trait InterviewResultRepository: Send + Sync {
    /// Check whether a result is already stored under this candidate name
    async fn exists_by_candidate_name(&self, candidate_name: &str) -> DatabaseResult<bool>;

    /// Persist a new result.
    ///
    /// Fails with `DatabaseError::UniqueViolation` when the name is taken.
    async fn create(&self, result: &NewInterviewResult) -> DatabaseResult<InterviewResult>;
}

/// PostgreSQL interview result repository
#[derive(Debug, Clone)]
pub struct PgInterviewResultRepository {
    pool: PgPool,
}

impl PgInterviewResultRepository {
    /// Create a new interview result repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewResultRepository for PgInterviewResultRepository {
    async fn exists_by_candidate_name(&self, candidate_name: &str) -> DatabaseResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM interview_results WHERE candidate_name = $1)",
        )
        .bind(candidate_name)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(exists)
    }

    async fn create(&self, result: &NewInterviewResult) -> DatabaseResult<InterviewResult> {
        info!("Saving interview result for: {}", result.candidate_name);

        let row = sqlx::query(
            r#"
            INSERT INTO interview_results (candidate_name, candidate_score, is_successful)
            VALUES ($1, $2, $3)
            RETURNING candidate_name, candidate_score, is_successful, created_at
            "#,
        )
        .bind(&result.candidate_name)
        .bind(result.candidate_score.value())
        .bind(result.is_successful)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        let candidate_score = Score::new(row.get("candidate_score"))
            .map_err(|e| DatabaseError::Query(sqlx::Error::Decode(Box::new(e))))?;

        Ok(InterviewResult {
            candidate_name: row.get("candidate_name"),
            candidate_score,
            is_successful: row.get("is_successful"),
            created_at: row.get("created_at"),
        })
    }
}
