//! Property tests for ranking and aggregation invariants.

use proptest::prelude::*;

use revrank_core::types::{BucketWeights, Confidence, Review, ReviewTable};
use revrank_decay::weighted_average_rating;
use revrank_wilson::{rank_and_select, score_ratio, wilson_lower_bound};

fn review_strategy() -> impl Strategy<Value = Review> {
    (1u8..=5, 0u32..1200, 0i64..300, 0i64..300).prop_map(|(rating, age, yes, no)| {
        Review::new(rating as f64, age, yes, yes + no)
    })
}

fn table_strategy() -> impl Strategy<Value = ReviewTable> {
    prop::collection::vec(review_strategy(), 0..120).prop_map(ReviewTable::new)
}

proptest! {
    #[test]
    fn selection_length_is_min_k_n(table in table_strategy(), k in 0usize..150) {
        let top = rank_and_select(&table, k).unwrap();
        prop_assert_eq!(top.len(), k.min(table.len()));
    }

    #[test]
    fn selection_sorted_with_stable_ties(table in table_strategy(), k in 0usize..150) {
        let top = rank_and_select(&table, k).unwrap();
        for pair in top.windows(2) {
            prop_assert!(pair[0].score_wilson >= pair[1].score_wilson);
            if pair[0].score_wilson == pair[1].score_wilson {
                prop_assert!(pair[0].position < pair[1].position);
            }
        }
    }

    #[test]
    fn selection_is_unmodified_subset(table in table_strategy(), k in 0usize..150) {
        let top = rank_and_select(&table, k).unwrap();
        let mut seen = std::collections::HashSet::new();
        for row in &top {
            prop_assert!(seen.insert(row.position), "row {} selected twice", row.position);
            prop_assert_eq!(&row.review, table.get(row.position).unwrap());
            prop_assert_eq!(row.helpful_no, row.review.total_vote - row.review.helpful_yes);
        }
    }

    #[test]
    fn selected_rows_beat_unselected(table in table_strategy(), k in 1usize..40) {
        let all = rank_and_select(&table, table.len()).unwrap();
        let top = rank_and_select(&table, k).unwrap();
        if let Some(last) = top.last() {
            for rest in &all[top.len()..] {
                prop_assert!(rest.score_wilson <= last.score_wilson);
            }
        }
    }

    #[test]
    fn wilson_conservative(up in 0i64..10_000, down in 0i64..10_000, level in 0.5f64..0.999) {
        let s = wilson_lower_bound(up, down, Confidence::new(level).unwrap()).unwrap();
        prop_assert!(s <= score_ratio(up, up + down) + 1e-12);
    }

    #[test]
    fn weighted_average_order_independent(
        mut rows in prop::collection::vec(review_strategy(), 1..120),
    ) {
        let w = BucketWeights::default();
        let forward = weighted_average_rating(&ReviewTable::new(rows.clone()), &w).unwrap();
        rows.sort_by_key(|r| (r.age_days, r.total_vote));
        let sorted = weighted_average_rating(&ReviewTable::new(rows.clone()), &w).unwrap();
        rows.reverse();
        let reversed = weighted_average_rating(&ReviewTable::new(rows), &w).unwrap();
        prop_assert!((forward - sorted).abs() < 1e-9);
        prop_assert!((forward - reversed).abs() < 1e-9);
    }
}
