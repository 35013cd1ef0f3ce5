use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a network-client instance.
///
/// Every instance running in a process carries one. Events use it to break
/// ordering ties between instances and to compare owners structurally, so it
/// must stay fixed for the lifetime of the instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Create an id from its raw numeric value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceId({})", self.0)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bot:{}", self.0)
    }
}
