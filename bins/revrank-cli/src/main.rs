//! revrank — review ranking and recency-weighted rating reports.
//!
//! Loads a single product's reviews from a JSON file, then prints the simple
//! and time-weighted average ratings and/or the most helpful reviews ranked by
//! Wilson lower bound.

mod config;
mod report;
mod source;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use revrank_core::traits::{HelpfulnessRanker, ReviewSource};
use revrank_core::types::{Confidence, ReviewTable};
use revrank_decay::TimeDecayAggregator;
use revrank_wilson::{RankingEngine, SortKey};

use crate::config::AnalysisConfig;
use crate::report::{AverageReport, FullReport, RankReport};
use crate::source::JsonFileSource;

/// Rank product reviews by helpfulness and weigh ratings by recency.
#[derive(Parser)]
#[command(name = "revrank")]
#[command(version, about = "Rank reviews by Wilson lower bound and weigh ratings by recency.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simple and recency-weighted average ratings.
    Average(CommonArgs),
    /// Most helpful reviews.
    Rank(RankArgs),
    /// Averages and ranking together.
    Report(RankArgs),
}

/// Report output on stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Log line format on stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Args)]
struct CommonArgs {
    /// JSON array or JSON Lines file of reviews.
    #[arg(short, long)]
    input: PathBuf,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Decimal places for scores in text output.
    #[arg(long, default_value_t = 4)]
    precision: usize,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Args)]
struct RankArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of reviews to show.
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Score to sort by (wilson, ratio, difference).
    #[arg(long)]
    key: Option<SortKey>,

    /// Confidence level for the Wilson lower bound, in (0, 1).
    #[arg(long)]
    confidence: Option<f64>,
}

impl CommonArgs {
    /// Load configuration, apply the shared overrides, and start logging.
    fn setup(&self) -> Result<AnalysisConfig> {
        let mut cfg = AnalysisConfig::load(self.config.as_deref())?;
        if let Some(level) = &self.log_level {
            cfg.log_level = level.clone();
        }
        init_logging(&cfg.log_level, self.log_format);
        Ok(cfg)
    }

    fn load_table(&self) -> Result<ReviewTable> {
        let table = JsonFileSource::new(&self.input)
            .load()
            .with_context(|| format!("failed to load reviews from {}", self.input.display()))?;
        info!(rows = table.len(), input = %self.input.display(), "loaded reviews");
        Ok(table)
    }

    fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

impl RankArgs {
    fn apply(&self, cfg: &mut AnalysisConfig) -> Result<()> {
        if let Some(k) = self.top_k {
            cfg.top_k = k;
        }
        if let Some(key) = self.key {
            cfg.sort_key = key;
        }
        if let Some(level) = self.confidence {
            cfg.confidence = Confidence::new(level).context("invalid --confidence")?;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Average(args) => run_average(args),
        Commands::Rank(args) => run_rank(args),
        Commands::Report(args) => run_report(args),
    }
}

fn average_report(cfg: &AnalysisConfig, table: &ReviewTable) -> Result<AverageReport> {
    let agg = TimeDecayAggregator::new(cfg.buckets.clone(), cfg.empty_bucket_policy);
    let summary = agg.summarize(table).context("failed to compute averages")?;
    let breakdown = agg.breakdown(table).context("failed to compute bucket breakdown")?;
    Ok(AverageReport { summary, breakdown })
}

fn rank_report(cfg: &AnalysisConfig, table: &ReviewTable) -> Result<RankReport> {
    let engine = RankingEngine::new(cfg.confidence)?;
    let reviews = match cfg.sort_key {
        SortKey::Wilson => engine.rank_and_select(table, cfg.top_k),
        key => engine.rank_by(table, key, cfg.top_k),
    }
    .context("failed to rank reviews")?;
    Ok(RankReport {
        sort_key: cfg.sort_key,
        confidence: cfg.confidence.level(),
        reviews,
    })
}

fn run_average(args: CommonArgs) -> Result<()> {
    let cfg = args.setup()?;
    let table = args.load_table()?;
    let report = average_report(&cfg, &table)?;

    if args.json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::average_text(&report, args.precision));
    }
    Ok(())
}

fn run_rank(args: RankArgs) -> Result<()> {
    let mut cfg = args.common.setup()?;
    args.apply(&mut cfg)?;
    let table = args.common.load_table()?;
    let report = rank_report(&cfg, &table)?;

    if args.common.json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::rank_text(&report, args.common.precision));
    }
    Ok(())
}

fn run_report(args: RankArgs) -> Result<()> {
    let mut cfg = args.common.setup()?;
    args.apply(&mut cfg)?;
    let table = args.common.load_table()?;

    let report = FullReport {
        rows: table.len(),
        average: average_report(&cfg, &table)?,
        ranking: rank_report(&cfg, &table)?,
    };

    if args.common.json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::full_text(&report, args.common.precision));
    }
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// `RUST_LOG` takes precedence over `level_str`. Logs go to stderr so that
/// stdout carries only the report.
fn init_logging(level_str: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("revrank").chain(args.iter().copied()))
    }

    #[test]
    fn formats_default_to_text() {
        let cli = parse(&["average", "-i", "reviews.json"]).unwrap();
        let Commands::Average(args) = cli.command else {
            panic!("expected average");
        };
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.log_format, LogFormat::Text);
        assert!(!args.json());
    }

    #[test]
    fn json_formats_parse() {
        let cli = parse(&["rank", "-i", "r.json", "--format", "json", "--log-format", "json"]).unwrap();
        let Commands::Rank(args) = cli.command else {
            panic!("expected rank");
        };
        assert!(args.common.json());
        assert_eq!(args.common.log_format, LogFormat::Json);
    }

    #[test]
    fn unknown_formats_rejected() {
        let err = parse(&["average", "-i", "r.json", "--format", "jsn"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
        assert!(parse(&["report", "-i", "r.json", "--log-format", "yaml"]).is_err());
    }
}
