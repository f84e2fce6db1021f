//! Repositories for database operations
//!
//! Each vertical talks to storage through a trait so the PostgreSQL
//! implementation can be swapped for the in-memory one.

pub mod account;
pub mod interview;
pub mod memory;

pub use account::{AccountRepository, PgAccountRepository};
pub use interview::{InterviewResultRepository, PgInterviewResultRepository};
pub use memory::{InMemoryAccountRepository, InMemoryInterviewResultRepository};
