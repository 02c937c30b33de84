//! Naive helpfulness scores.

/// Helpful minus unhelpful votes. Negative when the review is mostly disliked.
pub fn score_difference(up: i64, down: i64) -> i64 {
    up - down
}

/// Fraction of votes marked helpful; 0 when `total == 0`.
pub fn score_ratio(up: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    up as f64 / total as f64
}
