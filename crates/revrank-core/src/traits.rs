//! Trait interfaces between the revrank crates.
//!
//! - [`ReviewSource`]: supplies the review table (the CLI's file loader implements)
//! - [`RatingAggregator`]: rating averages (revrank-decay implements)
//! - [`HelpfulnessRanker`]: per-review scoring and selection (revrank-wilson implements)

use crate::error::{AggregateError, RankingError, SourceError};
use crate::types::{AnnotatedReview, ReviewTable};

/// Anything that can hand over a finite, in-memory review table.
pub trait ReviewSource {
    fn load(&self) -> Result<ReviewTable, SourceError>;
}

impl ReviewSource for ReviewTable {
    fn load(&self) -> Result<ReviewTable, SourceError> {
        Ok(self.clone())
    }
}

/// Scalar rating summaries over a whole table.
pub trait RatingAggregator {
    /// Unweighted mean of `rating`. Fails with `EmptyTable` on zero rows.
    fn simple_average(&self, table: &ReviewTable) -> Result<f64, AggregateError>;

    /// Recency-weighted blend of per-bucket means.
    fn weighted_average(&self, table: &ReviewTable) -> Result<f64, AggregateError>;
}

/// Per-review helpfulness scoring and top-k selection.
pub trait HelpfulnessRanker {
    /// Score every row, preserving input order and length.
    fn annotate(&self, table: &ReviewTable) -> Result<Vec<AnnotatedReview>, RankingError>;

    /// The `k` most helpful rows, best first, ties in input order.
    fn rank_and_select(
        &self,
        table: &ReviewTable,
        k: usize,
    ) -> Result<Vec<AnnotatedReview>, RankingError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Review;

    #[test]
    fn table_is_its_own_source() {
        let table = ReviewTable::new(vec![Review::new(4.0, 3, 1, 1)]);
        assert_eq!(table.load().unwrap(), table);
    }
}
