//! Integration tests across the revrank crates.
//!
//! Exercises both scoring components against shared review tables and checks
//! the ordering, selection, and aggregation properties end to end.

pub mod helpers;
