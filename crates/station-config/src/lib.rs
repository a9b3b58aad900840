//! # Station Config
//!
//! Configuration for the Station E2E driver: browser endpoint, timeouts,
//! retry policy and the wallet fixtures the scenarios use.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
