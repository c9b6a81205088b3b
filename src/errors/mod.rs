//! Centralized error handling for the canto-bridge application
//!
//! Two layers: `CantoError` carries the upstream DAM taxonomy (transport,
//! HTTP status, undecodable body, explicit API error, not-found,
//! not-configured), and `AppError` is the application-level wrapper the
//! web layer maps onto HTTP responses.

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for DAM client Results
pub type CantoResult<T> = Result<T, CantoError>;
