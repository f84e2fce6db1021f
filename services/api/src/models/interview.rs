//! Interview result models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Candidate score, bounded to `[Score::MIN, Score::MAX]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

/// Rejected score value
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("Candidate score {0} is out of range, it must be between 0 and 100")]
pub struct ScoreOutOfRange(pub f64);

impl Score {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    /// Build a score, rejecting NaN, infinities and anything outside the bounds
    pub fn new(value: f64) -> Result<Self, ScoreOutOfRange> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreOutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = ScoreOutOfRange;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored interview result, keyed by candidate name
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InterviewResult {
    pub candidate_name: String,
    pub candidate_score: Score,
    pub is_successful: bool,
    pub created_at: DateTime<Utc>,
}

/// Validated interview result insertion payload
#[derive(Debug, Clone)]
pub struct NewInterviewResult {
    pub candidate_name: String,
    pub candidate_score: Score,
    pub is_successful: bool,
}

/// Request for interview result creation
///
/// The score stays unchecked here: a duplicate candidate name must be
/// reported before an out-of-range score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInterviewResultRequest {
    pub candidate_name: String,
    pub candidate_score: f64,
    pub is_successful: bool,
}
