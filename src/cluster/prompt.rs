//! Prompt extraction and greedy prompt-similarity clustering.

use similar::TextDiff;

use crate::cluster::{Batch, Cluster};

/// Extract the prompt from an image filename.
///
/// Strips the extension, then removes a single trailing `_<digits>` suffix —
/// the per-generation counter upstream tools append, not part of the prompt.
/// A stem that is entirely numeric after stripping yields the empty prompt,
/// which is valid: such files group strictly by time.
pub fn extract_prompt(filename: &str) -> String {
    let stem = std::path::Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    let stem = match stem.rfind('_') {
        Some(idx)
            if idx + 1 < stem.len() && stem[idx + 1..].bytes().all(|b| b.is_ascii_digit()) =>
        {
            &stem[..idx]
        }
        _ => stem,
    };

    if stem.bytes().all(|b| b.is_ascii_digit()) {
        // Purely numeric stems carry no prompt
        return String::new();
    }
    stem.to_string()
}

/// Normalized sequence-matching similarity between two prompts.
///
/// Character-level diff ratio: 1.0 for identical strings, 0.0 for disjoint
/// ones, symmetric and deterministic. Tolerant of small wording variations,
/// unlike strict equality or token overlap.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    f64::from(TextDiff::from_chars(a, b).ratio())
}

/// Greedily cluster a batch's records by prompt similarity.
///
/// Each record joins the open cluster whose representative prompt scores
/// highest, provided the score meets `threshold` and the cluster is below
/// `size_limit` (when set). Exact score ties go to the most recently created
/// cluster. Records that match nothing open a new cluster.
///
/// The concatenation of the returned clusters, in creation order, contains
/// every batch record exactly once.
pub fn cluster_by_prompt(batch: Batch, threshold: f64, size_limit: Option<usize>) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for record in batch {
        let mut best: Option<(usize, f64)> = None;
        for (idx, cluster) in clusters.iter().enumerate() {
            if size_limit.is_some_and(|limit| cluster.len() >= limit) {
                continue;
            }
            let score = similarity(&record.prompt, cluster.representative());
            if score < threshold {
                continue;
            }
            // `>=` on ascending creation index resolves ties toward the most
            // recently created cluster
            if best.is_none_or(|(_, best_score)| score >= best_score) {
                best = Some((idx, score));
            }
        }

        match best {
            Some((idx, _)) => clusters[idx].push(record),
            None => clusters.push(Cluster::new(record)),
        }
    }

    clusters
}
