use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Capture stamp of an event: wall-clock milliseconds plus sequence number.
///
/// The timestamp alone is coarse and may step backwards when the wall clock
/// is adjusted. The sequence number is drawn at the same moment and breaks
/// every tie within one process.
///
/// Ordering: `timestamp_ms` → `sequence_id` (total order).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stamp {
    /// Wall-clock milliseconds since UNIX epoch.
    pub timestamp_ms: u64,
    /// Process-unique sequence number.
    pub sequence_id: u64,
}

impl Stamp {
    /// Create a stamp with explicit values.
    pub const fn new(timestamp_ms: u64, sequence_id: u64) -> Self {
        Self {
            timestamp_ms,
            sequence_id,
        }
    }
}

impl PartialOrd for Stamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Stamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp_ms
            .cmp(&other.timestamp_ms)
            .then(self.sequence_id.cmp(&other.sequence_id))
    }
}

impl fmt::Debug for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stamp({}ms#{})", self.timestamp_ms, self.sequence_id)
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.timestamp_ms, self.sequence_id)
    }
}
