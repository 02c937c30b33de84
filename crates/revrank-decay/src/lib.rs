//! # revrank-decay — Recency-weighted rating aggregation.
//!
//! Reviews are split into fixed age buckets. Each bucket's mean rating is
//! scaled by its weight (in percent) and the scaled means are summed:
//!
//! ```text
//! weighted = Σ mean(bucket_i) * weight_i / 100
//! ```
//!
//! - **Step weighting**: decay is a step function over the configured
//!   [`BucketWeights`](revrank_core::types::BucketWeights), not a continuous curve.
//! - **Empty buckets**: governed by
//!   [`EmptyBucketPolicy`](revrank_core::types::EmptyBucketPolicy); the default
//!   contributes 0 and logs a warning.
//! - **No normalization**: weights that do not sum to 100 are used as given.

pub mod bucket;
pub mod engine;

pub use bucket::{bucket_breakdown, BucketBreakdown, BucketContribution};
pub use engine::{simple_average_rating, weighted_average_rating, RatingSummary, TimeDecayAggregator};
