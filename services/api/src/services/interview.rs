//! Interview result creation

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{CreateInterviewResultRequest, InterviewResult, NewInterviewResult, Score},
    repositories::InterviewResultRepository,
    validation,
};

/// Interview result service
#[derive(Clone)]
pub struct InterviewResultService {
    repository: Arc<dyn InterviewResultRepository>,
}

impl InterviewResultService {
    /// Create a new interview result service
    pub fn new(repository: Arc<dyn InterviewResultRepository>) -> Self {
        Self { repository }
    }

    /// Store a new interview result.
    ///
    /// Checks run in order and the first failure wins: malformed name,
    /// duplicate candidate, then score range. The name is stored verbatim.
    pub async fn create_result(
        &self,
        request: CreateInterviewResultRequest,
    ) -> ApiResult<InterviewResult> {
        let candidate_name = request.candidate_name;
        validation::validate_candidate_name(&candidate_name).map_err(ApiError::Validation)?;

        if self
            .repository
            .exists_by_candidate_name(&candidate_name)
            .await?
        {
            warn!("Rejected interview result, {} already exists", candidate_name);
            return Err(ApiError::DuplicateCandidate(candidate_name));
        }

        let new_result = NewInterviewResult {
            candidate_score: Score::new(request.candidate_score)?,
            candidate_name,
            is_successful: request.is_successful,
        };

        match self.repository.create(&new_result).await {
            Ok(result) => {
                info!("Stored interview result for {}", result.candidate_name);
                Ok(result)
            }
            Err(e) if e.is_unique_violation() => {
                Err(ApiError::DuplicateCandidate(new_result.candidate_name))
            }
            Err(e) => Err(e.into()),
        }
    }
}
