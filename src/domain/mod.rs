/// Domain module containing core business logic and data types
///
/// This module defines the core entities (User, Profile, PhysicalEntry,
/// MentalEntry, Goal) and their validation rules. These types represent the
/// fundamental concepts in our health tracking system.

pub mod user;
pub mod physical;
pub mod mental;
pub mod goal;
pub mod types;

// Re-export public types for easy access
pub use user::*;
pub use physical::*;
pub use mental::*;
pub use goal::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid metric: {0}")]
    InvalidMetric(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
