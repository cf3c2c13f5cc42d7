//! Session folder naming: sanitization, timestamp formatting, and collision
//! disambiguation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::cluster::Cluster;

/// Maximum length of the sanitized prompt slug inside a folder name.
const MAX_SLUG_LEN: usize = 30;

/// Placeholder slug when sanitization leaves nothing usable.
const FALLBACK_SLUG: &str = "untitled";

/// Sanitize a prompt for use inside a folder name.
///
/// Lowercases, collapses runs of whitespace, underscores, and punctuation to
/// single hyphens, trims leading/trailing hyphens, and caps the length. The
/// result contains only `[a-z0-9.-]` — no path separators, no reserved
/// characters.
pub fn sanitize_for_folder(name: &str) -> String {
    let mut out = String::with_capacity(name.len().min(MAX_SLUG_LEN));
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '.' {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    out.truncate(MAX_SLUG_LEN);
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Derive the base folder name for a cluster: `session_YYYYMMDD_HHMM_<slug>`.
///
/// The timestamp comes from the earliest (first) member; the slug from the
/// representative prompt, falling back to `untitled` when the prompt
/// sanitizes to nothing.
pub fn session_folder_name(cluster: &Cluster) -> String {
    let stamp = cluster
        .members()
        .first()
        .map(|r| r.timestamp.format("%Y%m%d_%H%M").to_string())
        .unwrap_or_default();

    let mut slug = sanitize_for_folder(cluster.representative());
    if slug.is_empty() {
        slug = FALLBACK_SLUG.to_string();
    }

    format!("session_{stamp}_{slug}")
}

/// Hands out unique session folder names within one run.
///
/// A name collides if it was already reserved this run or a directory with
/// that name exists under the destination; collisions get a `_N` suffix.
/// Reservation is in-memory only, so dry runs resolve names identically to
/// real runs.
pub struct FolderNamer {
    dst_dir: PathBuf,
    reserved: HashSet<String>,
}

impl FolderNamer {
    pub fn new(dst_dir: &Path) -> Self {
        Self {
            dst_dir: dst_dir.to_path_buf(),
            reserved: HashSet::new(),
        }
    }

    /// Reserve a unique variant of `base`, appending `_1`, `_2`, ... as needed.
    pub fn reserve(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        let mut counter = 1;
        while self.reserved.contains(&name) || self.dst_dir.join(&name).exists() {
            name = format!("{base}_{counter}");
            counter += 1;
        }
        self.reserved.insert(name.clone());
        name
    }
}
