//! Business logic sitting between the routes and the repositories

pub mod account;
pub mod interview;

pub use account::AccountService;
pub use interview::InterviewResultService;
