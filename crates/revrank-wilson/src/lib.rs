//! # revrank-wilson — Helpfulness scoring and ranking.
//!
//! Each review gets three scores from its vote counts:
//! - **Difference**: `up - down`, blind to sample size.
//! - **Ratio**: `up / total`, 0 when nobody voted.
//! - **Wilson lower bound**: the lower end of the Wilson score interval for the
//!   helpful proportion, which discounts small samples (2 of 2 helpful scores
//!   well below 95 of 100).
//!
//! Ranking sorts by one score, highest first, with ties kept in input order.

pub mod engine;
pub mod score;
pub mod wilson;

pub use engine::{annotate, rank_and_select, top_reviews, RankingEngine, SortKey};
pub use score::{score_difference, score_ratio};
pub use wilson::{wilson_lower_bound, wilson_lower_bound_with_z, z_score};
