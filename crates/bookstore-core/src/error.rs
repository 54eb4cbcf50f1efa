//! # Error Types
//!
//! Domain-specific error types for bookstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookstore-core errors (this file)                                     │
//! │  ├── CoreError        - Domain lookups on the local projection         │
//! │  └── ValidationError  - Form/input validation failures                 │
//! │                                                                         │
//! │  bookstore-client errors (separate crate)                              │
//! │  └── ClientError      - Auth, transport, HTTP status, config           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → presentation        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised against the local projection of server state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cart line is not in the current cart projection.
    ///
    /// ## When This Occurs
    /// - The line was removed by another client and the projection is fresh
    /// - The caller holds a stale line id from before a refetch
    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Rejected form input. Raised before any request leaves the client.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Longer than the form allows.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Outside an inclusive range, e.g. a quantity above 999.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Zero or negative where at least one is needed.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Unparseable price or cover URL.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Not one of the accepted values (order statuses).
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Two fields that must agree do not (password confirmation).
    #[error("{field} does not match {other}")]
    Mismatch { field: String, other: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
