//! Review records, bucket configuration, and scored rows.
//!
//! A [`ReviewTable`] is handed over by whatever loaded the data and is never
//! mutated afterwards. Scoring produces fresh [`AnnotatedReview`] rows that
//! carry the untouched source record plus derived columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BUCKETS, DEFAULT_CONFIDENCE};
use crate::error::{AggregateError, RankingError};

/// One user review of the product.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Review {
    /// Star rating (1 to 5 in practice).
    #[serde(alias = "overall")]
    pub rating: f64,
    /// Days between posting and the dataset's reference date.
    #[serde(alias = "day_diff")]
    pub age_days: u32,
    /// Up-votes marking the review as helpful.
    pub helpful_yes: i64,
    /// All votes cast on the review, helpful or not.
    pub total_vote: i64,
}

impl Review {
    pub fn new(rating: f64, age_days: u32, helpful_yes: i64, total_vote: i64) -> Self {
        Self {
            rating,
            age_days,
            helpful_yes,
            total_vote,
        }
    }

    /// Down-votes, derived as `total_vote - helpful_yes`.
    ///
    /// `row` only labels the error. Negative counts and `total_vote < helpful_yes`
    /// are data-integrity violations and are reported, never clamped.
    pub fn helpful_no(&self, row: usize) -> Result<i64, RankingError> {
        if self.helpful_yes < 0 {
            return Err(RankingError::InvalidInput {
                row: Some(row),
                reason: format!("negative helpful_yes {}", self.helpful_yes),
            });
        }
        if self.total_vote < 0 {
            return Err(RankingError::InvalidInput {
                row: Some(row),
                reason: format!("negative total_vote {}", self.total_vote),
            });
        }
        if self.total_vote < self.helpful_yes {
            return Err(RankingError::InvalidInput {
                row: Some(row),
                reason: format!(
                    "total_vote {} < helpful_yes {}",
                    self.total_vote, self.helpful_yes
                ),
            });
        }
        Ok(self.total_vote - self.helpful_yes)
    }

    pub fn rating_is_finite(&self) -> bool {
        self.rating.is_finite()
    }

    /// Full integrity check for scoring: vote counts as in
    /// [`helpful_no`](Self::helpful_no) plus a finite rating.
    pub fn validate(&self, row: usize) -> Result<(), RankingError> {
        self.helpful_no(row)?;
        if !self.rating_is_finite() {
            return Err(RankingError::InvalidInput {
                row: Some(row),
                reason: format!("non-finite rating {}", self.rating),
            });
        }
        Ok(())
    }
}

/// Ordered, immutable sequence of reviews for a single product.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct ReviewTable {
    rows: Vec<Review>,
}

impl ReviewTable {
    pub fn new(rows: Vec<Review>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Review> {
        self.rows.get(row)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Review> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[Review] {
        &self.rows
    }
}

impl FromIterator<Review> for ReviewTable {
    fn from_iter<I: IntoIterator<Item = Review>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ReviewTable {
    type Item = &'a Review;
    type IntoIter = std::slice::Iter<'a, Review>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// A review together with its helpfulness scores.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnnotatedReview {
    /// Zero-based row index in the source table.
    pub position: usize,
    #[serde(flatten)]
    pub review: Review,
    pub helpful_no: i64,
    pub score_diff: i64,
    pub score_ratio: f64,
    pub score_wilson: f64,
}

/// Age window `(lower, upper]` with its blend weight in percent.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct AgeBucket {
    pub lower: u32,
    pub upper: u32,
    pub weight_percent: f64,
}

impl AgeBucket {
    pub const fn new(lower: u32, upper: u32, weight_percent: f64) -> Self {
        Self {
            lower,
            upper,
            weight_percent,
        }
    }

    /// Whether `age_days` falls in this bucket.
    ///
    /// The lower bound is exclusive unless `closed_lower` is set, which the
    /// aggregator does for the first bucket of a table.
    pub fn contains(&self, age_days: u32, closed_lower: bool) -> bool {
        let above = if closed_lower {
            age_days >= self.lower
        } else {
            age_days > self.lower
        };
        above && age_days <= self.upper
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}] @ {}%", self.lower, self.upper, self.weight_percent)
    }
}

/// Validated, contiguous list of [`AgeBucket`]s.
///
/// Weights are taken as given. They are not required to sum to 100 and are
/// never normalized.
///
/// # Examples
///
/// ```
/// use revrank_core::types::{AgeBucket, BucketWeights};
/// let weights = BucketWeights::new(vec![
///     AgeBucket::new(0, 30, 70.0),
///     AgeBucket::new(30, 365, 30.0),
/// ]).unwrap();
/// assert_eq!(weights.len(), 2);
/// assert!(BucketWeights::new(vec![AgeBucket::new(0, 30, 70.0), AgeBucket::new(40, 90, 30.0)]).is_err());
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "Vec<AgeBucket>", into = "Vec<AgeBucket>")]
pub struct BucketWeights {
    buckets: Vec<AgeBucket>,
}

impl BucketWeights {
    pub fn new(buckets: Vec<AgeBucket>) -> Result<Self, AggregateError> {
        if buckets.is_empty() {
            return Err(AggregateError::InvalidBucket {
                index: 0,
                reason: "at least one bucket is required".to_string(),
            });
        }

        for (index, bucket) in buckets.iter().enumerate() {
            if bucket.lower >= bucket.upper {
                return Err(AggregateError::InvalidBucket {
                    index,
                    reason: format!("lower {} must be below upper {}", bucket.lower, bucket.upper),
                });
            }
            if !bucket.weight_percent.is_finite() || bucket.weight_percent < 0.0 {
                return Err(AggregateError::InvalidBucket {
                    index,
                    reason: format!("weight {} must be finite and non-negative", bucket.weight_percent),
                });
            }
            if index > 0 && buckets[index - 1].upper != bucket.lower {
                return Err(AggregateError::InvalidBucket {
                    index,
                    reason: format!(
                        "lower {} does not continue previous upper {}",
                        bucket.lower,
                        buckets[index - 1].upper
                    ),
                });
            }
        }

        Ok(Self { buckets })
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Always false for a validated table; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AgeBucket> {
        self.buckets.iter()
    }

    pub fn as_slice(&self) -> &[AgeBucket] {
        &self.buckets
    }

    pub fn total_weight_percent(&self) -> f64 {
        self.buckets.iter().map(|b| b.weight_percent).sum()
    }
}

impl Default for BucketWeights {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS
                .iter()
                .map(|&(lower, upper, weight)| AgeBucket::new(lower, upper, weight))
                .collect(),
        }
    }
}

impl TryFrom<Vec<AgeBucket>> for BucketWeights {
    type Error = AggregateError;

    fn try_from(buckets: Vec<AgeBucket>) -> Result<Self, Self::Error> {
        Self::new(buckets)
    }
}

impl From<BucketWeights> for Vec<AgeBucket> {
    fn from(weights: BucketWeights) -> Self {
        weights.buckets
    }
}

/// How an empty bucket enters the weighted blend.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmptyBucketPolicy {
    /// The bucket contributes 0 and a warning is logged.
    #[default]
    Zero,
    /// The undefined mean propagates, making the whole blend NaN.
    Propagate,
}

/// Two-sided confidence level strictly between 0 and 1.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(level: f64) -> Result<Self, RankingError> {
        if level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(RankingError::InvalidConfidence(level))
        }
    }

    pub fn level(&self) -> f64 {
        self.0
    }

    /// Upper-tail probability `1 - (1 - c) / 2` whose normal quantile is `z`.
    pub fn quantile_probability(&self) -> f64 {
        1.0 - (1.0 - self.0) / 2.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(DEFAULT_CONFIDENCE)
    }
}

impl TryFrom<f64> for Confidence {
    type Error = RankingError;

    fn try_from(level: f64) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}
