//! Application layer: services and use cases
//!
//! This layer applies settings to the domain parser and offers path queries.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
