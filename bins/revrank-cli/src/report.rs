//! Text and JSON rendering of analysis results.

use std::fmt::Write as _;

use serde::Serialize;

use revrank_core::types::AnnotatedReview;
use revrank_decay::{BucketBreakdown, RatingSummary};
use revrank_wilson::SortKey;

/// Rating averages and the buckets behind the weighted one.
#[derive(Serialize, Debug, Clone)]
pub struct AverageReport {
    pub summary: RatingSummary,
    pub breakdown: BucketBreakdown,
}

/// Top reviews under one sort key.
#[derive(Serialize, Debug, Clone)]
pub struct RankReport {
    pub sort_key: SortKey,
    pub confidence: f64,
    pub reviews: Vec<AnnotatedReview>,
}

/// Everything the `report` command prints.
#[derive(Serialize, Debug, Clone)]
pub struct FullReport {
    pub rows: usize,
    pub average: AverageReport,
    pub ranking: RankReport,
}

pub fn average_text(report: &AverageReport, precision: usize) -> String {
    let mut out = String::new();
    let s = &report.summary;
    let _ = writeln!(out, "=== RATING AVERAGES ===");
    let _ = writeln!(out, "Simple average:   {:.precision$}", s.simple);
    let _ = writeln!(out, "Weighted average: {:.precision$}", s.weighted);
    let _ = writeln!(out, "Delta:            {:+.precision$}", s.delta);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<14} {:>7} {:>8} {:>12}", "bucket", "weight", "reviews", "contribution");
    for b in &report.breakdown.buckets {
        let window = format!("({}, {}]", b.bucket.lower, b.bucket.upper);
        let _ = writeln!(
            out,
            "{:<14} {:>6}% {:>8} {:>12.precision$}",
            window, b.bucket.weight_percent, b.count, b.contribution
        );
    }
    if report.breakdown.unbucketed > 0 {
        let _ = writeln!(out, "Outside all buckets: {}", report.breakdown.unbucketed);
    }
    out
}

pub fn rank_text(report: &RankReport, precision: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "=== TOP {} REVIEWS BY {} (confidence {}) ===",
        report.reviews.len(),
        report.sort_key.to_string().to_uppercase(),
        report.confidence
    );
    let _ = writeln!(
        out,
        "{:>4} {:>6} {:>6} {:>5} {:>5} {:>5} {:>6} {:>10} {:>10}",
        "rank", "row", "rating", "age", "yes", "no", "diff", "ratio", "wilson"
    );
    for (rank, r) in report.reviews.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4} {:>6} {:>6.1} {:>5} {:>5} {:>5} {:>6} {:>10.precision$} {:>10.precision$}",
            rank + 1,
            r.position,
            r.review.rating,
            r.review.age_days,
            r.review.helpful_yes,
            r.helpful_no,
            r.score_diff,
            r.score_ratio,
            r.score_wilson
        );
    }
    out
}

pub fn full_text(report: &FullReport, precision: usize) -> String {
    let mut out = format!("Reviews: {}\n\n", report.rows);
    out.push_str(&average_text(&report.average, precision));
    out.push('\n');
    out.push_str(&rank_text(&report.ranking, precision));
    out
}
