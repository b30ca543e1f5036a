use chrono::Utc;

use super::LatestValue;

/// Stamps an already normalized CPU-set with the current wall-clock time.
///
/// The timestamp is the observation time; when the CPU-set itself last changed is unknown.
pub fn resolve_affinity(cpuset: String) -> LatestValue {
    LatestValue {
        date: Utc::now(),
        value: cpuset,
    }
}
