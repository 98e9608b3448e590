//! # curricula-core
//!
//! Core crate for the Curricula admin error pipeline. Contains the structured
//! [`AppError`] value, configuration schemas, the diagnostic sink and
//! reporter traits, and the payload types shared between the front-end
//! reporting code and the server.
//!
//! This crate has **no** internal dependencies on other Curricula crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorDetails, ErrorKind, ErrorLevel};
pub use result::AppResult;
