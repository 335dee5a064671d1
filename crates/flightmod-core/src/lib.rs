//! # flightmod-core
//!
//! Core crate for flightmod. Contains the configuration schema and loader,
//! logging initialisation, and the unified error system.
//!
//! This crate has **no** internal dependencies on other flightmod crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
