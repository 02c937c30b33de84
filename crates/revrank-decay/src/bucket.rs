//! Partitioning reviews into age buckets and scoring each bucket.

use serde::Serialize;
use tracing::{debug, warn};

use revrank_core::constants::WEIGHT_PERCENT_SCALE;
use revrank_core::types::{AgeBucket, BucketWeights, EmptyBucketPolicy, ReviewTable};

/// Statistics and weighted contribution of one bucket.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct BucketContribution {
    pub bucket: AgeBucket,
    /// Reviews whose age falls in the bucket.
    pub count: usize,
    /// Mean rating, `None` for an empty bucket.
    pub mean: Option<f64>,
    /// `mean * weight / 100`; 0 or NaN for an empty bucket depending on policy.
    pub contribution: f64,
}

/// All bucket contributions for a table.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct BucketBreakdown {
    pub buckets: Vec<BucketContribution>,
    /// Reviews older than the last bucket's upper bound.
    pub unbucketed: usize,
}

impl BucketBreakdown {
    /// Sum of all contributions: the weighted average rating.
    pub fn total(&self) -> f64 {
        self.buckets.iter().map(|b| b.contribution).sum()
    }

    /// Number of buckets with no reviews.
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|b| b.count == 0).count()
    }
}

/// Index of the bucket holding `age_days`, if any.
///
/// The first bucket is closed at its lower bound so the newest reviews
/// (age 0 under the default table) are not dropped.
fn bucket_index(weights: &BucketWeights, age_days: u32) -> Option<usize> {
    weights
        .iter()
        .enumerate()
        .position(|(i, b)| b.contains(age_days, i == 0))
}

/// Split `table` over `weights` and compute each bucket's contribution.
///
/// Ratings are assumed finite; the aggregator checks this before calling.
pub fn bucket_breakdown(
    table: &ReviewTable,
    weights: &BucketWeights,
    policy: EmptyBucketPolicy,
) -> BucketBreakdown {
    let mut sums = vec![0.0f64; weights.len()];
    let mut counts = vec![0usize; weights.len()];
    let mut unbucketed = 0usize;

    for review in table {
        match bucket_index(weights, review.age_days) {
            Some(i) => {
                sums[i] += review.rating;
                counts[i] += 1;
            }
            None => unbucketed += 1,
        }
    }

    if unbucketed > 0 {
        debug!(unbucketed, "reviews outside every age bucket");
    }

    let buckets = weights
        .iter()
        .zip(sums.iter().zip(counts.iter()))
        .map(|(bucket, (&sum, &count))| {
            let mean = (count > 0).then(|| sum / count as f64);
            let contribution = match (mean, policy) {
                (Some(m), _) => m * bucket.weight_percent / WEIGHT_PERCENT_SCALE,
                (None, EmptyBucketPolicy::Zero) => {
                    warn!(%bucket, "empty age bucket contributes 0");
                    0.0
                }
                (None, EmptyBucketPolicy::Propagate) => f64::NAN,
            };
            debug!(%bucket, count, ?mean, contribution, "bucket");
            BucketContribution {
                bucket: *bucket,
                count,
                mean,
                contribution,
            }
        })
        .collect();

    BucketBreakdown { buckets, unbucketed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revrank_core::types::Review;

    fn table(rows: &[(f64, u32)]) -> ReviewTable {
        rows.iter().map(|&(rating, age)| Review::new(rating, age, 0, 0)).collect()
    }

    #[test]
    fn counts_and_means_per_bucket() {
        let t = table(&[(5.0, 10), (3.0, 90), (4.0, 150), (2.0, 350)]);
        let b = bucket_breakdown(&t, &BucketWeights::default(), EmptyBucketPolicy::Zero);

        let counts: Vec<usize> = b.buckets.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![2, 1, 0, 1, 0]);
        assert_eq!(b.buckets[0].mean, Some(4.0));
        assert_eq!(b.buckets[1].mean, Some(4.0));
        assert_eq!(b.buckets[2].mean, None);
        assert_eq!(b.empty_buckets(), 2);
        assert_eq!(b.unbucketed, 0);
    }

    #[test]
    fn boundary_ages_land_in_lower_bucket() {
        let t = table(&[(1.0, 100), (2.0, 200), (3.0, 300), (4.0, 400), (5.0, 700)]);
        let b = bucket_breakdown(&t, &BucketWeights::default(), EmptyBucketPolicy::Zero);
        let means: Vec<Option<f64>> = b.buckets.iter().map(|c| c.mean).collect();
        assert_eq!(means, vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)]);
    }

    #[test]
    fn age_zero_counts_in_first_bucket() {
        let t = table(&[(5.0, 0)]);
        let b = bucket_breakdown(&t, &BucketWeights::default(), EmptyBucketPolicy::Zero);
        assert_eq!(b.buckets[0].count, 1);
        assert_eq!(b.unbucketed, 0);
    }

    #[test]
    fn ages_past_last_bucket_are_unbucketed() {
        let t = table(&[(5.0, 701), (1.0, 1500), (3.0, 50)]);
        let b = bucket_breakdown(&t, &BucketWeights::default(), EmptyBucketPolicy::Zero);
        assert_eq!(b.unbucketed, 2);
        assert_eq!(b.buckets[0].count, 1);
    }

    #[test]
    fn empty_bucket_zero_policy() {
        let t = table(&[(4.0, 10)]);
        let b = bucket_breakdown(&t, &BucketWeights::default(), EmptyBucketPolicy::Zero);
        assert_eq!(b.buckets[1].contribution, 0.0);
        assert!((b.total() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_bucket_propagate_policy_poisons_total() {
        let t = table(&[(4.0, 10)]);
        let b = bucket_breakdown(&t, &BucketWeights::default(), EmptyBucketPolicy::Propagate);
        assert!(b.buckets[1].contribution.is_nan());
        assert!(b.total().is_nan());
    }

    #[test]
    fn propagate_policy_matches_zero_when_all_buckets_filled() {
        let t = table(&[(5.0, 1), (4.0, 101), (3.0, 201), (2.0, 301), (1.0, 401)]);
        let w = BucketWeights::default();
        let zero = bucket_breakdown(&t, &w, EmptyBucketPolicy::Zero);
        let prop = bucket_breakdown(&t, &w, EmptyBucketPolicy::Propagate);
        assert_eq!(zero, prop);
    }

    #[test]
    fn contribution_scales_by_weight_percent() {
        let t = table(&[(4.0, 150)]);
        let b = bucket_breakdown(&t, &BucketWeights::default(), EmptyBucketPolicy::Zero);
        assert!((b.buckets[1].contribution - 1.2).abs() < 1e-12);
    }
}
