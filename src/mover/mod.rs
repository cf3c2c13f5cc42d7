//! File placement: per-file move execution and the bounded worker pool.
//!
//! Moves are the only concurrent stage of the pipeline. Workers pull jobs from
//! a shared queue and report outcomes over a channel to a single collector, so
//! a stuck or failing move is isolated to its own job and never aborts the
//! rest of the run.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use thiserror::Error;

/// Why a single file move failed.
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("source file is missing: {0}")]
    SourceMissing(PathBuf),
    #[error("destination already exists: {0}")]
    DestinationExists(PathBuf),
    #[error("could not create session folder {folder}: {source}")]
    CreateFolder {
        folder: PathBuf,
        source: io::Error,
    },
    #[error("could not move {src} to {dst}: {source}")]
    Io {
        src: PathBuf,
        dst: PathBuf,
        source: io::Error,
    },
}

/// One planned file placement.
#[derive(Debug, Clone)]
pub struct MoveJob {
    pub src: PathBuf,
    pub dst: PathBuf,
    pub session_folder: PathBuf,
}

/// Result of attempting one job.
#[derive(Debug)]
pub struct MoveOutcome {
    pub job: MoveJob,
    pub result: Result<(), MoveError>,
}

/// Move a single file into its session folder.
///
/// Folder creation is idempotent, so concurrent workers targeting the same
/// session folder cannot race each other into an error. An occupied
/// destination is a failure — existing data is never overwritten. Renames
/// that fail (e.g. across filesystems) fall back to copy-then-remove.
pub fn move_file(job: &MoveJob) -> Result<(), MoveError> {
    if !job.src.exists() {
        return Err(MoveError::SourceMissing(job.src.clone()));
    }

    fs::create_dir_all(&job.session_folder).map_err(|source| MoveError::CreateFolder {
        folder: job.session_folder.clone(),
        source,
    })?;

    if job.dst.exists() {
        return Err(MoveError::DestinationExists(job.dst.clone()));
    }

    if fs::rename(&job.src, &job.dst).is_ok() {
        return Ok(());
    }

    fs::copy(&job.src, &job.dst).map_err(|source| MoveError::Io {
        src: job.src.clone(),
        dst: job.dst.clone(),
        source,
    })?;
    fs::remove_file(&job.src).map_err(|source| MoveError::Io {
        src: job.src.clone(),
        dst: job.dst.clone(),
        source,
    })?;
    Ok(())
}

/// Run all jobs, returning one outcome per job.
///
/// In dry-run mode nothing touches the filesystem and every job succeeds.
/// Otherwise jobs are distributed across at most `workers` threads; each file
/// gets a single attempt, and failures are reported rather than retried.
/// Outcomes arrive in completion order, not submission order.
pub fn run_moves(jobs: Vec<MoveJob>, workers: usize, dry_run: bool) -> Vec<MoveOutcome> {
    if dry_run {
        return jobs
            .into_iter()
            .map(|job| MoveOutcome {
                job,
                result: Ok(()),
            })
            .collect();
    }

    let worker_count = workers.max(1).min(jobs.len().max(1));
    let (job_tx, job_rx): (Sender<MoveJob>, Receiver<MoveJob>) = mpsc::channel();
    let job_rx = Arc::new(Mutex::new(job_rx));
    let (outcome_tx, outcome_rx) = mpsc::channel();

    let mut handles = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        let job_rx = Arc::clone(&job_rx);
        let outcome_tx = outcome_tx.clone();
        handles.push(thread::spawn(move || loop {
            let job = match job_rx.lock() {
                Ok(rx) => rx.recv(),
                // Lock poisoned by a panicking sibling — stop pulling work
                Err(_) => break,
            };
            let Ok(job) = job else { break };
            let result = move_file(&job);
            if let Err(ref err) = result {
                tracing::warn!(src = %job.src.display(), %err, "move failed");
            }
            if outcome_tx.send(MoveOutcome { job, result }).is_err() {
                break;
            }
        }));
    }
    drop(outcome_tx);

    for job in jobs {
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    let outcomes: Vec<MoveOutcome> = outcome_rx.iter().collect();
    for handle in handles {
        let _ = handle.join();
    }
    outcomes
}
