//! Aggregator implementing the [`RatingAggregator`] trait.
//!
//! Validates the whole table up front and only then sums, so a failing call
//! never yields a partial value.

use serde::Serialize;
use tracing::debug;

use revrank_core::error::AggregateError;
use revrank_core::traits::RatingAggregator;
use revrank_core::types::{BucketWeights, EmptyBucketPolicy, ReviewTable};

use crate::bucket::{bucket_breakdown, BucketBreakdown};

/// Simple and recency-weighted averages side by side.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RatingSummary {
    pub simple: f64,
    pub weighted: f64,
    /// `weighted - simple`; positive when recent reviews rate higher.
    pub delta: f64,
}

/// Step-function time-decay aggregator.
#[derive(Debug, Clone, Default)]
pub struct TimeDecayAggregator {
    weights: BucketWeights,
    policy: EmptyBucketPolicy,
}

impl TimeDecayAggregator {
    pub fn new(weights: BucketWeights, policy: EmptyBucketPolicy) -> Self {
        Self { weights, policy }
    }

    pub fn weights(&self) -> &BucketWeights {
        &self.weights
    }

    pub fn policy(&self) -> EmptyBucketPolicy {
        self.policy
    }

    /// Per-bucket counts, means and contributions.
    pub fn breakdown(&self, table: &ReviewTable) -> Result<BucketBreakdown, AggregateError> {
        check_table(table)?;
        Ok(bucket_breakdown(table, &self.weights, self.policy))
    }

    /// Both averages plus their difference.
    pub fn summarize(&self, table: &ReviewTable) -> Result<RatingSummary, AggregateError> {
        let simple = self.simple_average(table)?;
        let weighted = self.weighted_average(table)?;
        Ok(RatingSummary {
            simple,
            weighted,
            delta: weighted - simple,
        })
    }
}

/// Rejects empty tables and non-finite ratings.
fn check_table(table: &ReviewTable) -> Result<(), AggregateError> {
    if table.is_empty() {
        return Err(AggregateError::EmptyTable);
    }
    for (row, review) in table.iter().enumerate() {
        if !review.rating_is_finite() {
            return Err(AggregateError::InvalidRating {
                row,
                value: review.rating,
            });
        }
    }
    Ok(())
}

impl RatingAggregator for TimeDecayAggregator {
    fn simple_average(&self, table: &ReviewTable) -> Result<f64, AggregateError> {
        check_table(table)?;
        let sum: f64 = table.iter().map(|r| r.rating).sum();
        Ok(sum / table.len() as f64)
    }

    fn weighted_average(&self, table: &ReviewTable) -> Result<f64, AggregateError> {
        let breakdown = self.breakdown(table)?;
        let total = breakdown.total();
        debug!(
            rows = table.len(),
            empty_buckets = breakdown.empty_buckets(),
            unbucketed = breakdown.unbucketed,
            total,
            "weighted average"
        );
        Ok(total)
    }
}

/// Recency-weighted average with empty buckets contributing 0.
pub fn weighted_average_rating(
    table: &ReviewTable,
    buckets: &BucketWeights,
) -> Result<f64, AggregateError> {
    TimeDecayAggregator::new(buckets.clone(), EmptyBucketPolicy::Zero).weighted_average(table)
}

/// Unweighted mean rating over the whole table.
pub fn simple_average_rating(table: &ReviewTable) -> Result<f64, AggregateError> {
    TimeDecayAggregator::default().simple_average(table)
}
