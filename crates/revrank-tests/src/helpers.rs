//! Shared test helpers for integration tests.

use revrank_core::types::{Review, ReviewTable};

/// Review with a fixed rating and age and the given votes.
pub fn voted(helpful_yes: i64, total_vote: i64) -> Review {
    Review::new(5.0, 30, helpful_yes, total_vote)
}

/// Review with no votes.
pub fn rated(rating: f64, age_days: u32) -> Review {
    Review::new(rating, age_days, 0, 0)
}

/// Small product table mixing recent and old reviews with varied votes.
///
/// Shaped like a real export: most reviews carry no votes, a few carry many.
pub fn product_table() -> ReviewTable {
    ReviewTable::new(vec![
        Review::new(5.0, 12, 0, 0),
        Review::new(4.0, 45, 1, 1),
        Review::new(5.0, 88, 10, 10),
        Review::new(1.0, 130, 3, 60),
        Review::new(5.0, 160, 100, 120),
        Review::new(4.0, 240, 2, 2),
        Review::new(3.0, 310, 0, 4),
        Review::new(5.0, 380, 952, 1005),
        Review::new(2.0, 520, 45, 49),
        Review::new(4.0, 690, 6, 7),
        Review::new(5.0, 1040, 0, 0),
    ])
}
