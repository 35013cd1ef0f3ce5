use std::cmp::Ordering;
use std::fmt;

use async_trait::async_trait;

use crate::envelope::Envelope;
use crate::error::Result;

/// Reply capability shared by every event.
///
/// Implementations delegate to the owning instance's send primitives with
/// whatever target fits the occurrence (the channel a message arrived on,
/// the user who sent a private message, ...). An event with nowhere to reply
/// returns [`EventError::InvalidResponse`](crate::EventError::InvalidResponse)
/// instead of doing nothing.
#[async_trait]
pub trait Respond: Send + Sync {
    async fn respond(&self, message: &str) -> Result<()>;
}

/// A concrete protocol occurrence carrying its [`Envelope`].
///
/// Listeners receive events as `Arc<dyn Event>` and may share them across
/// threads; implementations must stay immutable after construction.
pub trait Event: Respond + fmt::Debug {
    fn envelope(&self) -> &Envelope;

    /// Short name of the occurrence, used in logs and errors.
    fn kind(&self) -> &'static str;

    fn timestamp(&self) -> u64 {
        self.envelope().timestamp()
    }

    fn sequence_id(&self) -> u64 {
        self.envelope().sequence_id()
    }

    /// Total order over events of any kind: by envelope.
    fn compare(&self, other: &dyn Event) -> Ordering {
        self.envelope().cmp(other.envelope())
    }
}
