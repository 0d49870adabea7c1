#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the engine.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// The three reference/schema variants are the fatal error classes: any one
/// of them aborts the whole generation run.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A `$ref` pointer whose syntax is not `#/components/<partition>/<name>`.
    #[from(ignore)]
    #[display("Invalid reference: {_0}")]
    InvalidReference(String),

    /// A well-formed pointer whose target partition or entry does not exist.
    #[from(ignore)]
    #[display("Unresolved reference: {_0}")]
    UnresolvedReference(String),

    /// A schema `type` value the engine cannot reason about.
    #[from(ignore)]
    #[display("Unknown schema type: {_0}")]
    UnknownSchemaType(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// Implemented manually (instead of `derive(Error)`) because every variant
/// carries a plain `String`, which does not implement `std::error::Error`.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
