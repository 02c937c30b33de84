//! Ranking engine implementing the [`HelpfulnessRanker`] trait.
//!
//! Scoring is a per-row map that keeps table order and length. Selection is a
//! stable descending sort on one score followed by truncation to `k`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use revrank_core::constants::DEFAULT_TOP_K;
use revrank_core::error::RankingError;
use revrank_core::traits::HelpfulnessRanker;
use revrank_core::types::{AnnotatedReview, Confidence, Review, ReviewTable};

use crate::score::{score_difference, score_ratio};
use crate::wilson::{wilson_lower_bound_with_z, z_score};

/// Score column used to order reviews.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Wilson,
    Ratio,
    Difference,
}

impl SortKey {
    /// Descending order on this key. Equal keys compare `Equal` so a stable
    /// sort keeps input order.
    fn compare(&self, a: &AnnotatedReview, b: &AnnotatedReview) -> Ordering {
        match self {
            Self::Wilson => b.score_wilson.total_cmp(&a.score_wilson),
            Self::Ratio => b.score_ratio.total_cmp(&a.score_ratio),
            Self::Difference => b.score_diff.cmp(&a.score_diff),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Wilson => "wilson",
            Self::Ratio => "ratio",
            Self::Difference => "difference",
        };
        f.write_str(name)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wilson" => Ok(Self::Wilson),
            "ratio" => Ok(Self::Ratio),
            "difference" | "diff" => Ok(Self::Difference),
            other => Err(format!("unknown sort key '{other}' (expected wilson, ratio or difference)")),
        }
    }
}

/// Wilson-based helpfulness ranker at a fixed confidence level.
#[derive(Debug, Clone, Copy)]
pub struct RankingEngine {
    confidence: Confidence,
    z: f64,
}

impl RankingEngine {
    /// Build an engine, resolving the normal quantile once.
    pub fn new(confidence: Confidence) -> Result<Self, RankingError> {
        let z = z_score(confidence)?;
        debug!(confidence = confidence.level(), z, "ranking engine");
        Ok(Self { confidence, z })
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Scores for a single row. `position` is the row's index in its table.
    pub fn score_row(&self, position: usize, review: &Review) -> Result<AnnotatedReview, RankingError> {
        review.validate(position)?;
        // validate checked 0 <= helpful_yes <= total_vote and a finite rating.
        let helpful_no = review.total_vote - review.helpful_yes;
        let score_wilson =
            wilson_lower_bound_with_z(review.helpful_yes as u64, helpful_no as u64, self.z);

        Ok(AnnotatedReview {
            position,
            review: review.clone(),
            helpful_no,
            score_diff: score_difference(review.helpful_yes, helpful_no),
            score_ratio: score_ratio(review.helpful_yes, review.total_vote),
            score_wilson,
        })
    }

    /// The `k` best rows by `key`, ties in input order.
    pub fn rank_by(
        &self,
        table: &ReviewTable,
        key: SortKey,
        k: usize,
    ) -> Result<Vec<AnnotatedReview>, RankingError> {
        let mut rows = self.annotate(table)?;
        rows.sort_by(|a, b| key.compare(a, b));
        rows.truncate(k);
        debug!(rows = table.len(), selected = rows.len(), %key, "ranked");
        Ok(rows)
    }
}

impl HelpfulnessRanker for RankingEngine {
    fn annotate(&self, table: &ReviewTable) -> Result<Vec<AnnotatedReview>, RankingError> {
        table
            .iter()
            .enumerate()
            .map(|(position, review)| self.score_row(position, review))
            .collect()
    }

    fn rank_and_select(
        &self,
        table: &ReviewTable,
        k: usize,
    ) -> Result<Vec<AnnotatedReview>, RankingError> {
        self.rank_by(table, SortKey::Wilson, k)
    }
}

/// Annotate every row at `confidence`.
pub fn annotate(
    table: &ReviewTable,
    confidence: Confidence,
) -> Result<Vec<AnnotatedReview>, RankingError> {
    RankingEngine::new(confidence)?.annotate(table)
}

/// Top `k` rows by Wilson lower bound at the default confidence.
///
/// Pass [`DEFAULT_TOP_K`] for the product-page selection.
pub fn rank_and_select(table: &ReviewTable, k: usize) -> Result<Vec<AnnotatedReview>, RankingError> {
    RankingEngine::new(Confidence::default())?.rank_and_select(table, k)
}

/// Top [`DEFAULT_TOP_K`] rows by Wilson lower bound.
pub fn top_reviews(table: &ReviewTable) -> Result<Vec<AnnotatedReview>, RankingError> {
    rank_and_select(table, DEFAULT_TOP_K)
}
