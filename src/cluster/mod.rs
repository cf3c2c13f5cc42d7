//! Core clustering pipeline: time-gap batching, prompt-similarity clustering,
//! and session folder naming.
//!
//! Everything in this module is pure and deterministic — no I/O, no shared
//! mutable state. The same input always produces the same batches, clusters,
//! and names, which is what makes dry-run and execute mode agree.

pub mod naming;
pub mod prompt;
pub mod time;

pub use naming::{session_folder_name, FolderNamer};
pub use prompt::{cluster_by_prompt, extract_prompt, similarity};
pub use time::group_by_time;

use std::path::PathBuf;

use chrono::{DateTime, Local};

/// A single scanned image file: where it lives, the prompt extracted from its
/// filename, and its modification time.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub prompt: String,
    pub timestamp: DateTime<Local>,
}

/// A time-contiguous run of records, chronologically ordered.
pub type Batch = Vec<FileRecord>;

/// A group of records from one batch whose prompts are mutually similar.
///
/// The representative prompt is fixed at creation (the first member's prompt)
/// and never recomputed, so cluster membership decisions are reproducible.
#[derive(Debug, Clone)]
pub struct Cluster {
    representative: String,
    members: Vec<FileRecord>,
}

impl Cluster {
    /// Open a new cluster seeded with its first member.
    pub fn new(first: FileRecord) -> Self {
        Self {
            representative: first.prompt.clone(),
            members: vec![first],
        }
    }

    /// The prompt of the first member, used as the comparison anchor.
    pub fn representative(&self) -> &str {
        &self.representative
    }

    /// Members in original chronological order.
    pub fn members(&self) -> &[FileRecord] {
        &self.members
    }

    pub fn push(&mut self, record: FileRecord) {
        self.members.push(record);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
