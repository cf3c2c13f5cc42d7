//! End-to-end orchestration: batching, clustering, naming, and file
//! placement.
//!
//! Planning is pure and fully computed before any move is issued, so a dry
//! run and a real run over the same input make identical decisions.

use std::path::PathBuf;

use serde::Serialize;

use crate::cluster::{cluster_by_prompt, group_by_time, session_folder_name, FileRecord, FolderNamer};
use crate::config::Config;
use crate::mover::{self, MoveJob};

/// A fully resolved session: its folder plus the moves into it.
#[derive(Debug, Clone)]
pub struct SessionPlan {
    pub folder_name: String,
    pub folder: PathBuf,
    pub moves: Vec<MoveJob>,
}

/// A single failed move, as reported to the caller.
#[derive(Debug, Serialize)]
pub struct MoveFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Aggregate result of a run.
#[derive(Debug, Default, Serialize)]
pub struct OrganizeReport {
    pub sessions: usize,
    pub files: usize,
    pub errors: Vec<MoveFailure>,
}

/// Compute the full session plan for a set of records.
///
/// Batches the records by time gap, clusters each batch by prompt similarity,
/// and assigns every cluster a unique session folder name. Each input record
/// appears in exactly one planned move.
pub fn plan(records: Vec<FileRecord>, config: &Config) -> Vec<SessionPlan> {
    let batches = group_by_time(records, config.gap);
    tracing::debug!(batches = batches.len(), "grouped records by time gap");

    let mut namer = FolderNamer::new(&config.dst_dir);
    let mut plans = Vec::new();

    for batch in batches {
        let clusters = cluster_by_prompt(batch, config.similarity_threshold, config.cluster_size_limit);
        for cluster in clusters {
            let folder_name = namer.reserve(&session_folder_name(&cluster));
            let folder = config.dst_dir.join(&folder_name);
            let moves = cluster
                .members()
                .iter()
                .map(|record| MoveJob {
                    src: record.path.clone(),
                    dst: folder.join(record.path.file_name().unwrap_or_default()),
                    session_folder: folder.clone(),
                })
                .collect();
            plans.push(SessionPlan {
                folder_name,
                folder,
                moves,
            });
        }
    }

    plans
}

/// Execute (or, in dry-run mode, simulate) a session plan.
///
/// Per-file failures are collected in the report; they never abort the
/// remaining moves.
pub fn run(plans: &[SessionPlan], config: &Config) -> OrganizeReport {
    let jobs: Vec<MoveJob> = plans
        .iter()
        .flat_map(|p| p.moves.iter().cloned())
        .collect();

    let mut report = OrganizeReport {
        sessions: plans.len(),
        files: jobs.len(),
        errors: Vec::new(),
    };

    for outcome in mover::run_moves(jobs, config.workers, config.dry_run) {
        if let Err(err) = outcome.result {
            report.errors.push(MoveFailure {
                path: outcome.job.src,
                error: err.to_string(),
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};
    use std::collections::BTreeSet;
    use std::fs::File;
    use std::path::Path;

    fn record(name: &str, hour: u32, minute: u32) -> FileRecord {
        FileRecord {
            path: PathBuf::from(format!("/imgs/{name}")),
            prompt: crate::cluster::extract_prompt(name),
            timestamp: Local.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap(),
        }
    }

    fn test_config(dst_dir: &Path) -> Config {
        Config {
            src_dir: PathBuf::from("/imgs"),
            dst_dir: dst_dir.to_path_buf(),
            gap: Duration::minutes(60),
            similarity_threshold: 0.8,
            cluster_size_limit: None,
            workers: 4,
            dry_run: true,
        }
    }

    #[test]
    fn plan_matches_documented_example() {
        // cat_1@10:00, cat_2@10:15, dog_1@10:20, cat_3@14:00 with a 60 minute
        // gap: one batch of three plus a lone late batch; the first batch
        // splits into a cat pair and a dog singleton.
        let temp = tempfile::tempdir().unwrap();
        let records = vec![
            record("cat_1.png", 10, 0),
            record("cat_2.png", 10, 15),
            record("dog_1.png", 10, 20),
            record("cat_3.png", 14, 0),
        ];

        let plans = plan(records, &test_config(temp.path()));
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].folder_name, "session_20240301_1000_cat");
        assert_eq!(plans[0].moves.len(), 2);
        assert_eq!(plans[1].folder_name, "session_20240301_1020_dog");
        assert_eq!(plans[1].moves.len(), 1);
        assert_eq!(plans[2].folder_name, "session_20240301_1400_cat");
        assert_eq!(plans[2].moves.len(), 1);
    }

    #[test]
    fn every_record_appears_in_exactly_one_move() {
        let temp = tempfile::tempdir().unwrap();
        let records = vec![
            record("cat_1.png", 10, 0),
            record("cat_2.png", 10, 1),
            record("dog_1.png", 10, 2),
            record("dog_2.png", 13, 0),
            record("42.png", 13, 1),
        ];
        let input: BTreeSet<_> = records.iter().map(|r| r.path.clone()).collect();

        let plans = plan(records, &test_config(temp.path()));
        let planned: Vec<_> = plans
            .iter()
            .flat_map(|p| p.moves.iter().map(|m| m.src.clone()))
            .collect();
        assert_eq!(planned.len(), input.len());
        assert_eq!(planned.into_iter().collect::<BTreeSet<_>>(), input);
    }

    #[test]
    fn cap_split_clusters_get_disambiguated_names() {
        let temp = tempfile::tempdir().unwrap();
        let mut config = test_config(temp.path());
        config.cluster_size_limit = Some(2);

        let records = vec![
            record("cat_1.png", 10, 0),
            record("cat_2.png", 10, 0),
            record("cat_3.png", 10, 0),
        ];
        let plans = plan(records, &config);
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].moves.len(), 2);
        assert_eq!(plans[1].moves.len(), 1);
        assert_eq!(plans[0].folder_name, "session_20240301_1000_cat");
        assert_eq!(plans[1].folder_name, "session_20240301_1000_cat_1");
    }

    #[test]
    fn plan_is_identical_across_dry_run_and_execute_config() {
        let temp = tempfile::tempdir().unwrap();
        let records = vec![
            record("cat_1.png", 10, 0),
            record("cat_2.png", 10, 5),
            record("dog_1.png", 10, 10),
        ];

        let dry = test_config(temp.path());
        let mut real = test_config(temp.path());
        real.dry_run = false;

        let dry_plans = plan(records.clone(), &dry);
        let real_plans = plan(records, &real);
        let dry_names: Vec<_> = dry_plans.iter().map(|p| p.folder_name.clone()).collect();
        let real_names: Vec<_> = real_plans.iter().map(|p| p.folder_name.clone()).collect();
        assert_eq!(dry_names, real_names);
        for (a, b) in dry_plans.iter().zip(&real_plans) {
            assert_eq!(a.moves.len(), b.moves.len());
        }
    }

    #[test]
    fn run_moves_files_and_reports_aggregates() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("sessions");
        std::fs::create_dir_all(&src).unwrap();
        for name in ["cat_1.png", "cat_2.png"] {
            File::create(src.join(name)).unwrap();
        }

        let now = Local::now();
        let records: Vec<FileRecord> = ["cat_1.png", "cat_2.png"]
            .iter()
            .map(|name| FileRecord {
                path: src.join(name),
                prompt: "cat".to_string(),
                timestamp: now,
            })
            .collect();

        let mut config = test_config(&dst);
        config.dry_run = false;

        let plans = plan(records, &config);
        assert_eq!(plans.len(), 1);
        let report = run(&plans, &config);
        assert_eq!(report.sessions, 1);
        assert_eq!(report.files, 2);
        assert!(report.errors.is_empty());
        for name in ["cat_1.png", "cat_2.png"] {
            assert!(dst.join(&plans[0].folder_name).join(name).exists());
            assert!(!src.join(name).exists());
        }
    }

    #[test]
    fn run_collects_failures_without_aborting() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("sessions");
        std::fs::create_dir_all(&src).unwrap();
        File::create(src.join("cat_1.png")).unwrap();

        let now = Local::now();
        let records: Vec<FileRecord> = ["cat_1.png", "cat_2.png"]
            .iter()
            .map(|name| FileRecord {
                path: src.join(name),
                prompt: "cat".to_string(),
                timestamp: now,
            })
            .collect();

        let mut config = test_config(&dst);
        config.dry_run = false;

        let plans = plan(records, &config);
        let report = run(&plans, &config);
        assert_eq!(report.files, 2);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].path.ends_with("cat_2.png"));
        // The good file still moved
        assert!(dst.join(&plans[0].folder_name).join("cat_1.png").exists());
    }
}
