//! Source directory scanning: discover image files and build records for the
//! clustering pipeline.

use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::cluster::{extract_prompt, FileRecord};

/// Image extensions the organizer recognizes (case-insensitive).
const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Check whether a path carries a recognized image extension.
fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Scan a source directory for image files.
///
/// Yields one record per matching file with its extracted prompt and
/// modification time; non-image entries and subdirectories are silently
/// skipped. The result is sorted by timestamp, with the filename as a
/// deterministic tiebreaker.
pub fn scan_files(src_dir: &Path) -> Result<Vec<FileRecord>> {
    let entries = fs::read_dir(src_dir)
        .with_context(|| format!("Failed to read source directory: {}", src_dir.display()))?;

    let mut records = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || !is_image(&path) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            tracing::debug!(path = %path.display(), "skipping non-UTF-8 filename");
            continue;
        };

        let timestamp = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .map_or_else(|_| DateTime::<Local>::from(UNIX_EPOCH), DateTime::from);

        records.push(FileRecord {
            prompt: extract_prompt(name),
            path,
            timestamp,
        });
    }

    records.sort_by(|a, b| (a.timestamp, &a.path).cmp(&(b.timestamp, &b.path)));
    tracing::debug!(count = records.len(), "scanned source directory");
    Ok(records)
}
