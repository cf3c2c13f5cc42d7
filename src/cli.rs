//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Group prompt-named image files into session folders by time and prompt
/// similarity.
///
/// By default nothing is moved — run with `-x` to apply the plan.
#[derive(Debug, Default, Parser)]
#[command(name = "sessionize", version, about)]
pub struct Cli {
    /// Source image directory [env: SRC_DIR, default: current directory]
    pub src: Option<PathBuf>,

    /// Destination session directory [env: DST_DIR, default: ./sessions]
    pub dst: Option<PathBuf>,

    /// Max gap in minutes between files of one session batch
    /// [env: SESSION_GAP_MINUTES, default: 60]
    #[arg(long, value_name = "MIN")]
    pub gap: Option<i64>,

    /// Prompt similarity threshold, 0-1
    /// [env: PROMPT_SIMILARITY, default: 0.8]
    #[arg(long, value_name = "F")]
    pub sim: Option<f64>,

    /// Maximum files per session cluster
    /// [env: SESSION_CLUSTER_LIMIT, default: unlimited]
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Number of concurrent file moves
    /// [env: SESSION_WORKERS, default: 8]
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Actually move files (default is a dry run)
    #[arg(short = 'x', long = "execute")]
    pub execute: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}
