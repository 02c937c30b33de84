//! Scoring defaults. Ages are in days, weights in percent.

/// Confidence level for the Wilson lower bound (two-sided).
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Number of reviews surfaced on a product page.
pub const DEFAULT_TOP_K: usize = 20;

/// Divisor applied to bucket weights before blending.
pub const WEIGHT_PERCENT_SCALE: f64 = 100.0;

/// Default recency buckets as `(lower, upper, weight_percent)`.
///
/// Recent reviews dominate: the newest 100 days carry half of the blend and
/// anything past 400 days carries a single percent. Reviews older than
/// 700 days fall outside every bucket.
///
/// # Examples
///
/// ```
/// use revrank_core::constants::DEFAULT_BUCKETS;
/// let total: f64 = DEFAULT_BUCKETS.iter().map(|b| b.2).sum();
/// assert_eq!(total, 100.0);
/// ```
pub const DEFAULT_BUCKETS: [(u32, u32, f64); 5] = [
    (0, 100, 50.0),
    (100, 200, 30.0),
    (200, 300, 15.0),
    (300, 400, 4.0),
    (400, 700, 1.0),
];
