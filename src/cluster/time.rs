//! Time-gap batching: split a chronologically sorted record list wherever the
//! gap between neighbors exceeds a threshold.

use chrono::{DateTime, Duration, Local};

use crate::cluster::{Batch, FileRecord};

/// Partition records into time-contiguous batches.
///
/// Records are stable-sorted by timestamp first, so the input does not need to
/// arrive sorted. A new batch starts whenever the gap to the previous record
/// strictly exceeds `max_gap`; records sharing a timestamp always stay
/// together, even with a zero gap.
pub fn group_by_time(mut records: Vec<FileRecord>, max_gap: Duration) -> Vec<Batch> {
    records.sort_by_key(|r| r.timestamp);

    let mut batches: Vec<Batch> = Vec::new();
    let mut current: Batch = Vec::new();
    let mut last_time: Option<DateTime<Local>> = None;

    for record in records {
        if let Some(prev) = last_time {
            if record.timestamp - prev > max_gap && !current.is_empty() {
                batches.push(std::mem::take(&mut current));
            }
        }
        last_time = Some(record.timestamp);
        current.push(record);
    }
    if !current.is_empty() {
        batches.push(current);
    }

    batches
}
