//! Unified error types for the domain layer
//!
//! Invalid input is reported through `DomainError`. Rejected shortlist
//! mutations are not errors; they come back as outcome enums from
//! [`crate::events`].

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Container is at capacity
    #[error("Container full: {current}/{max} items")]
    ContainerFull { current: usize, max: usize },
}

impl DomainError {
    /// Creates a validation error for malformed values.
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Country name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Create a container full error
    pub fn container_full(current: usize, max: usize) -> Self {
        Self::ContainerFull { current, max }
    }
}
