use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sessionize::cli::Cli;
use sessionize::config::Config;
use sessionize::pipeline::{self, OrganizeReport, SessionPlan};
use sessionize::scan;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_summary = cli.json;
    let config = Config::from_cli(&cli)?;

    anyhow::ensure!(
        config.src_dir.is_dir(),
        "Source dir '{}' not found",
        config.src_dir.display()
    );
    if !config.dry_run {
        fs::create_dir_all(&config.dst_dir).with_context(|| {
            format!(
                "Failed to create destination directory: {}",
                config.dst_dir.display()
            )
        })?;
    }

    let records = scan::scan_files(&config.src_dir)?;
    if records.is_empty() {
        println!("No image files found in {}", config.src_dir.display());
        return Ok(());
    }

    println!(
        "Organizing {} files (gap {} min, sim threshold {}, cluster limit {}, workers {}){}",
        records.len(),
        config.gap.num_minutes(),
        config.similarity_threshold,
        config
            .cluster_size_limit
            .map_or_else(|| "unlimited".to_string(), |limit| limit.to_string()),
        config.workers,
        if config.dry_run { " [dry run]" } else { "" },
    );

    let plans = pipeline::plan(records, &config);
    print_plan(&plans, config.dry_run);

    let report = pipeline::run(&plans, &config);
    for failure in &report.errors {
        eprintln!("ERROR: {}: {}", failure.path.display(), failure.error);
    }

    if json_summary {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, config.dry_run);
    }
    Ok(())
}

/// Print each planned session with its member moves.
fn print_plan(plans: &[SessionPlan], dry_run: bool) {
    let verb = if dry_run { "WOULD MOVE" } else { "MOVE" };
    for (index, plan) in plans.iter().enumerate() {
        println!("\nSession {}: {}", index + 1, plan.folder.display());
        for job in &plan.moves {
            println!("  {} {} -> {}", verb, job.src.display(), job.dst.display());
        }
    }
}

fn print_summary(report: &OrganizeReport, dry_run: bool) {
    println!("\n=== SUMMARY ===");
    println!("Total sessions: {}", report.sessions);
    println!(
        "Total files {}: {}",
        if dry_run { "to be moved" } else { "moved" },
        report.files
    );
    if !report.errors.is_empty() {
        println!("Total errors during file move: {}", report.errors.len());
    }
}
