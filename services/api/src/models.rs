//! API models for entities, request and response payloads

pub mod account;
pub mod interview;

// Re-export for convenience
pub use account::{
    Account, AccountKind, AccountResponse, Customer, Farmer, LoginRequest, NewAccount,
    SignupRequest,
};
pub use interview::{
    CreateInterviewResultRequest, InterviewResult, NewInterviewResult, Score, ScoreOutOfRange,
};
