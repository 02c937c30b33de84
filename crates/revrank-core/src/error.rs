//! Error types for review scoring.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregateError {
    #[error("empty review table")] EmptyTable,
    #[error("invalid bucket {index}: {reason}")] InvalidBucket { index: usize, reason: String },
    #[error("non-finite rating {value} at row {row}")] InvalidRating { row: usize, value: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankingError {
    /// `row` is `None` when the offending values were passed directly rather than read from a table.
    #[error("invalid input{}: {reason}", at_row(.row))] InvalidInput { row: Option<usize>, reason: String },
    #[error("confidence must lie in (0, 1), got {0}")] InvalidConfidence(f64),
    #[error("normal distribution: {0}")] Distribution(String),
}

fn at_row(row: &Option<usize>) -> String {
    row.map(|r| format!(" at row {r}")).unwrap_or_default()
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("io: {0}")] Io(String),
    #[error("parse: {0}")] Parse(String),
}

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error(transparent)] Aggregate(#[from] AggregateError),
    #[error(transparent)] Ranking(#[from] RankingError),
    #[error(transparent)] Source(#[from] SourceError),
}
