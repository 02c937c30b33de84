//! # revrank-core
//! Foundation types and traits for review scoring.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
