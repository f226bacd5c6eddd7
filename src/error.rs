//! # Error Types
//!
//! This module defines custom error types for the ant colony optimization
//! library. It provides specific error variants for the failure scenarios
//! that may occur during graph construction and colony runs.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use antpack::error::{AcoError, Result};
//!
//! fn some_function() -> Result<()> {
//!     // Function implementation
//!     Ok(())
//! }
//!
//! fn caller() {
//!     match some_function() {
//!         Ok(_) => println!("Success!"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur in the ant colony optimization library.
///
/// This enum provides specific error variants for different failure scenarios
/// that may occur while building the construction graph or running a colony.
#[derive(Error, Debug)]
pub enum AcoError {
    /// Error that occurs when invalid problem or colony parameters are provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when a weighted selection is attempted over an
    /// empty candidate set.
    #[error("Selection error: cannot select from an empty set of weights")]
    EmptySelection,

    /// Error that occurs when NaN, infinity or negative values are
    /// encountered where non-negative finite values are required.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// Error that occurs when a path refers to an edge that does not exist
    /// in the construction graph.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Error that occurs when the construction graph is malformed.
    #[error("Graph error: {0}")]
    Graph(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for ant colony optimization operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the
/// error type fixed to `AcoError`.
///
/// ## Examples
///
/// ```rust
/// use antpack::error::{AcoError, Result};
///
/// fn may_fail() -> Result<u64> {
///     // Some operation that might fail
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, AcoError>;
