//! # AppError
//!
//! Centralized error handling for the Hell's Hub ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all hh-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., User, Post, Episode)
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    /// Validation failure (e.g., empty community name, rating out of range)
    #[error("validation error: {0}")]
    Validation(String),

    /// Session-scoped action attempted with no active session, or an action
    /// the session user is not allowed to perform
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists or rule already consumed (e.g., duplicate
    /// community name, second poll vote)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure surfaced by a state store adapter
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// A specialized Result type for Hell's Hub logic.
pub type Result<T> = std::result::Result<T, AppError>;
