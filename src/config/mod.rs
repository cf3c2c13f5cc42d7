//! Run configuration: defaults, environment-variable overrides, and CLI
//! precedence.
//!
//! Resolution order for every setting is CLI flag, then environment variable,
//! then the built-in default. Unparsable environment values fall back to the
//! default silently; out-of-range values from any source are rejected before
//! scanning begins.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Result};
use chrono::Duration;

use crate::cli::Cli;

pub const DEFAULT_GAP_MINUTES: i64 = 60;
pub const DEFAULT_SIMILARITY: f64 = 0.8;
pub const DEFAULT_WORKERS: usize = 8;

/// Fully resolved, validated run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub src_dir: PathBuf,
    pub dst_dir: PathBuf,
    /// Maximum time gap between neighboring files of one batch.
    pub gap: Duration,
    /// Prompt similarity threshold in [0, 1].
    pub similarity_threshold: f64,
    /// Maximum cluster size; `None` means unlimited.
    pub cluster_size_limit: Option<usize>,
    /// Worker threads for concurrent file moves.
    pub workers: usize,
    /// When set, compute and report the plan without touching the filesystem.
    pub dry_run: bool,
}

/// Read and parse an environment variable, falling back to `None` when unset
/// or unparsable.
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|value| value.parse().ok())
}

impl Config {
    /// Resolve configuration from parsed CLI arguments plus the environment.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let src_dir = cli
            .src
            .clone()
            .or_else(|| env_parse::<PathBuf>("SRC_DIR"))
            .unwrap_or_else(|| PathBuf::from("."));
        let dst_dir = cli
            .dst
            .clone()
            .or_else(|| env_parse::<PathBuf>("DST_DIR"))
            .unwrap_or_else(|| PathBuf::from("./sessions"));

        let gap_minutes = cli
            .gap
            .or_else(|| env_parse("SESSION_GAP_MINUTES"))
            .unwrap_or(DEFAULT_GAP_MINUTES);
        let similarity_threshold = cli
            .sim
            .or_else(|| env_parse("PROMPT_SIMILARITY"))
            .unwrap_or(DEFAULT_SIMILARITY);
        // A zero (or absent) limit in the environment means unlimited
        let cluster_size_limit = match cli.limit {
            Some(limit) => Some(limit),
            None => env_parse::<usize>("SESSION_CLUSTER_LIMIT").filter(|limit| *limit > 0),
        };
        let workers = cli
            .workers
            .or_else(|| env_parse("SESSION_WORKERS"))
            .unwrap_or(DEFAULT_WORKERS);

        if gap_minutes <= 0 {
            bail!("gap must be a positive number of minutes, got {gap_minutes}");
        }
        if !(0.0..=1.0).contains(&similarity_threshold) {
            bail!("similarity threshold must be within 0-1, got {similarity_threshold}");
        }
        if cluster_size_limit == Some(0) {
            bail!("cluster size limit must be positive");
        }
        if workers == 0 {
            bail!("worker count must be positive");
        }

        Ok(Self {
            src_dir,
            dst_dir,
            gap: Duration::minutes(gap_minutes),
            similarity_threshold,
            cluster_size_limit,
            workers,
            dry_run: !cli.execute,
        })
    }
}
