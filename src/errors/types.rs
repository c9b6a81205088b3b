//! Error type definitions for the canto-bridge application

use thiserror::Error;

/// Top-level application error type
///
/// This enum represents all possible errors that can occur in the
/// application. It uses `thiserror` to provide automatic error trait
/// implementations and proper error chaining.
#[derive(Error, Debug)]
pub enum AppError {
    /// Upstream DAM errors
    #[error("Canto error: {0}")]
    Canto(#[from] CantoError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the Canto API client
///
/// Every variant is terminal for the call that produced it: the client
/// never retries, the caller decides whether another endpoint variant is
/// worth probing.
#[derive(Error, Debug)]
pub enum CantoError {
    /// Domain or token missing; a configuration problem, not a transient fault
    #[error("Canto API not configured: {0}")]
    NotConfigured(String),

    /// No asset matched the id or filename; distinct from an error
    #[error("asset not found: {0}")]
    NotFound(String),

    /// Network-level failure (connect, DNS, timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-200 status
    #[error("API request failed with HTTP code: {status}")]
    Http { status: u16 },

    /// Empty body or undecodable JSON
    #[error("invalid response from Canto API: {0}")]
    InvalidResponse(String),

    /// The JSON body carried an explicit `error` field
    #[error("error from Canto API: {0}")]
    Upstream(String),
}

impl CantoError {
    /// Map a reqwest failure onto the transport variant
    pub fn transport(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }

    /// Whether this error means "no such asset" rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, CantoError::NotFound(_))
    }
}
