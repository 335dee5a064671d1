//! Convenience result type alias for flightmod.

use crate::error::AppError;

/// A specialized `Result` type for flightmod operations.
pub type AppResult<T> = Result<T, AppError>;
