//! Analysis configuration.
//!
//! Layers, lowest precedence first: built-in defaults, an optional TOML file,
//! `REVRANK_*` environment variables. Command-line flags are applied on top by
//! the caller.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use revrank_core::constants::DEFAULT_TOP_K;
use revrank_core::types::{BucketWeights, Confidence, EmptyBucketPolicy};
use revrank_wilson::SortKey;

/// Environment variable prefix, e.g. `REVRANK_TOP_K=10`.
pub const ENV_PREFIX: &str = "REVRANK";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Recency buckets for the weighted average.
    pub buckets: BucketWeights,
    /// Treatment of buckets with no reviews.
    pub empty_bucket_policy: EmptyBucketPolicy,
    /// Confidence level of the Wilson lower bound.
    pub confidence: Confidence,
    /// Reviews shown in the ranking.
    pub top_k: usize,
    /// Score used to order the ranking.
    pub sort_key: SortKey,
    /// Log level filter string (e.g. "info", "revrank_decay=debug").
    pub log_level: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            buckets: BucketWeights::default(),
            empty_bucket_policy: EmptyBucketPolicy::default(),
            confidence: Confidence::default(),
            top_k: DEFAULT_TOP_K,
            sort_key: SortKey::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load defaults, then `file` if given, then the environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = ::config::Config::try_from(&Self::default())
            .context("failed to serialize default configuration")?;

        let mut builder = ::config::Config::builder().add_source(defaults);
        if let Some(path) = file {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        builder = builder.add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let settings = builder
            .build()
            .context("failed to read configuration")?;
        settings
            .try_deserialize()
            .context("invalid configuration")
    }
}
