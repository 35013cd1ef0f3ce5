use std::any::type_name;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use hookline_types::{InstanceId, Stamp};

use crate::clock::{Clock, SystemClock};
use crate::error::{EventError, Result};
use crate::instance::{AsAny, Instance};
use crate::sequence::IdentityGenerator;

/// Immutable identity of one observed protocol occurrence.
///
/// Every concrete event embeds an `Envelope`. It carries the capture time,
/// the sequence number drawn at the same moment, and an optional handle to
/// the instance that observed the occurrence. Fields are private and have no
/// setters, so an envelope can be shared across dispatch threads freely.
///
/// # Ordering
///
/// `timestamp` → `sequence_id` → owner [`InstanceId`]. An ownerless envelope
/// sorts before an owned one when everything else ties. Equality compares the
/// same three fields, so `a == b` exactly when `a.cmp(&b)` is `Equal`.
#[derive(Clone)]
pub struct Envelope {
    timestamp: u64,
    sequence_id: u64,
    owner: Option<Arc<dyn Instance>>,
}

impl Envelope {
    /// Stamp a new envelope from the system clock and the process-wide
    /// generator.
    pub fn new(owner: Option<Arc<dyn Instance>>) -> Self {
        Self::stamped(&SystemClock, IdentityGenerator::global(), owner)
    }

    /// Stamp a new envelope from the given clock and generator.
    pub fn stamped<C>(clock: &C, generator: &IdentityGenerator, owner: Option<Arc<dyn Instance>>) -> Self
    where
        C: Clock + ?Sized,
    {
        let timestamp = clock.now_ms();
        let sequence_id = generator.next_id();
        let envelope = Self {
            timestamp,
            sequence_id,
            owner,
        };
        trace!(
            sequence_id,
            timestamp,
            owner = ?envelope.owner_id(),
            "event stamped"
        );
        envelope
    }

    /// Build an envelope from explicit values, bypassing clock and generator.
    pub fn from_parts(timestamp: u64, sequence_id: u64, owner: Option<Arc<dyn Instance>>) -> Self {
        Self {
            timestamp,
            sequence_id,
            owner,
        }
    }

    /// Capture time in milliseconds since the UNIX epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Sequence number drawn when the envelope was stamped.
    pub fn sequence_id(&self) -> u64 {
        self.sequence_id
    }

    /// Timestamp and sequence number as one ordered value.
    pub fn stamp(&self) -> Stamp {
        Stamp::new(self.timestamp, self.sequence_id)
    }

    /// The instance that observed the occurrence, if any.
    pub fn owner(&self) -> Option<&Arc<dyn Instance>> {
        self.owner.as_ref()
    }

    /// Identity of the owner, used for tie-breaking and equality.
    pub fn owner_id(&self) -> Option<InstanceId> {
        self.owner.as_ref().map(|owner| owner.instance_id())
    }

    /// The owner, or [`EventError::MissingOwner`] for a synthetic event.
    pub fn require_owner(&self) -> Result<&Arc<dyn Instance>> {
        self.owner.as_ref().ok_or(EventError::MissingOwner)
    }

    /// Narrow the owner to a concrete instance type.
    ///
    /// Fails with [`EventError::MissingOwner`] when there is no owner and
    /// [`EventError::CapabilityMismatch`] when the owner is some other type.
    pub fn owner_as<T: Instance>(&self) -> Result<Arc<T>> {
        let owner = self.require_owner()?;
        let instance = owner.instance_id();
        <dyn Instance as AsAny>::into_any(Arc::clone(owner))
            .downcast::<T>()
            .map_err(|_| EventError::CapabilityMismatch {
                expected: type_name::<T>(),
                instance,
            })
    }

    /// The owner if it can still carry a reply for an event of `kind`.
    ///
    /// A missing or disconnected owner is an invalid response target.
    pub fn reply_owner(&self, kind: &'static str) -> Result<&Arc<dyn Instance>> {
        let owner = self.owner.as_ref().ok_or_else(|| EventError::InvalidResponse {
            kind,
            reason: "event has no owning instance".to_string(),
        })?;
        if !owner.is_connected() {
            return Err(EventError::InvalidResponse {
                kind,
                reason: format!("owner {} is disconnected", owner.instance_id()),
            });
        }
        Ok(owner)
    }
}

impl PartialEq for Envelope {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
            && self.sequence_id == other.sequence_id
            && self.owner_id() == other.owner_id()
    }
}

impl Eq for Envelope {}

impl PartialOrd for Envelope {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Envelope {
    fn cmp(&self, other: &Self) -> Ordering {
        // `None < Some(_)`: ownerless sorts first on a full tie.
        self.timestamp
            .cmp(&other.timestamp)
            .then(self.sequence_id.cmp(&other.sequence_id))
            .then_with(|| self.owner_id().cmp(&other.owner_id()))
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("timestamp", &self.timestamp)
            .field("sequence_id", &self.sequence_id)
            .field("owner", &self.owner_id())
            .finish()
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evt#{}@{}", self.sequence_id, self.timestamp)?;
        if let Some(id) = self.owner_id() {
            write!(f, "/{id}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::memory::MemoryInstance;
    use std::collections::HashSet;
    use std::thread;

    fn bot(id: u64) -> Arc<dyn Instance> {
        Arc::new(MemoryInstance::new(id))
    }

    #[derive(Debug)]
    struct OtherInstance;

    #[async_trait::async_trait]
    impl Instance for OtherInstance {
        fn instance_id(&self) -> InstanceId {
            InstanceId::new(99)
        }

        fn is_connected(&self) -> bool {
            true
        }

        async fn send_message(&self, _: &str, _: &str) -> std::result::Result<(), crate::OutboundError> {
            Ok(())
        }

        async fn send_raw(&self, _: &str) -> std::result::Result<(), crate::OutboundError> {
            Ok(())
        }
    }

    #[test]
    fn stamped_reads_clock_and_generator() {
        let clock = ManualClock::new(1000);
        let gen = IdentityGenerator::starting_at(7);
        let env = Envelope::stamped(&clock, &gen, Some(bot(1)));
        assert_eq!(env.timestamp(), 1000);
        assert_eq!(env.sequence_id(), 7);
        assert_eq!(env.stamp(), Stamp::new(1000, 7));
        assert_eq!(env.owner_id(), Some(InstanceId::new(1)));
        assert_eq!(gen.peek(), 8);
    }

    #[test]
    fn new_uses_wall_clock_and_global_generator() {
        let a = Envelope::new(None);
        let b = Envelope::new(None);
        assert!(a.timestamp() > 1_577_836_800_000);
        assert!(a.sequence_id() < b.sequence_id());
        assert!(a < b || a.timestamp() > b.timestamp());
    }

    #[test]
    fn same_millisecond_breaks_tie_by_sequence() {
        let clock = ManualClock::new(1000);
        let gen = IdentityGenerator::new();
        let first = Envelope::stamped(&clock, &gen, Some(bot(1)));
        let second = Envelope::stamped(&clock, &gen, Some(bot(1)));
        assert_eq!(first.timestamp(), second.timestamp());
        assert!(first < second);
    }

    #[test]
    fn earlier_timestamp_wins_over_sequence() {
        let clock = ManualClock::new(1000);
        let gen = IdentityGenerator::new();
        let first = Envelope::stamped(&clock, &gen, None);
        clock.set(999);
        let stepped_back = Envelope::stamped(&clock, &gen, None);
        assert!(first.sequence_id() < stepped_back.sequence_id());
        assert!(stepped_back < first);
    }

    #[test]
    fn owner_breaks_full_tie() {
        let a = Envelope::from_parts(1000, 5, Some(bot(1)));
        let b = Envelope::from_parts(1000, 5, Some(bot(2)));
        assert!(a < b);
        assert_ne!(a, b);
    }

    #[test]
    fn ownerless_sorts_before_owned_on_full_tie() {
        let synthetic = Envelope::from_parts(1000, 5, None);
        let owned = Envelope::from_parts(1000, 5, Some(bot(1)));
        assert!(synthetic < owned);
        assert_eq!(
            Envelope::from_parts(1000, 5, None).cmp(&synthetic),
            Ordering::Equal
        );
    }

    #[test]
    fn structural_equality_not_identity() {
        let shared = bot(3);
        let a = Envelope::from_parts(1000, 5, Some(Arc::clone(&shared)));
        let b = Envelope::from_parts(1000, 5, Some(shared));
        assert_eq!(a, b);

        // Distinct instance objects with the same id are the same owner.
        let c = Envelope::from_parts(1000, 5, Some(bot(3)));
        assert_eq!(a, c);

        assert_ne!(a, Envelope::from_parts(1001, 5, Some(bot(3))));
        assert_ne!(a, Envelope::from_parts(1000, 6, Some(bot(3))));
        assert_ne!(a, Envelope::from_parts(1000, 5, None));
    }

    #[test]
    fn owner_as_narrows_to_concrete_type() {
        let env = Envelope::from_parts(1, 1, Some(bot(4)));
        let narrowed = env.owner_as::<MemoryInstance>().unwrap();
        assert_eq!(narrowed.instance_id(), InstanceId::new(4));
    }

    #[test]
    fn owner_as_wrong_type_is_capability_mismatch() {
        let env = Envelope::from_parts(1, 1, Some(bot(4)));
        let err = env.owner_as::<OtherInstance>().unwrap_err();
        match err {
            EventError::CapabilityMismatch { expected, instance } => {
                assert!(expected.ends_with("OtherInstance"));
                assert_eq!(instance, InstanceId::new(4));
            }
            other => panic!("expected capability mismatch, got {other:?}"),
        }
    }

    #[test]
    fn owner_accessors_on_synthetic_event() {
        let env = Envelope::from_parts(1, 1, None);
        assert!(env.owner().is_none());
        assert!(matches!(env.require_owner(), Err(EventError::MissingOwner)));
        assert!(matches!(
            env.owner_as::<MemoryInstance>(),
            Err(EventError::MissingOwner)
        ));
    }

    #[test]
    fn reply_owner_rejects_missing_and_disconnected() {
        let env = Envelope::from_parts(1, 1, None);
        assert!(matches!(
            env.reply_owner("test"),
            Err(EventError::InvalidResponse { kind: "test", .. })
        ));

        let instance = Arc::new(MemoryInstance::new(5));
        let env = Envelope::from_parts(1, 1, Some(Arc::clone(&instance) as Arc<dyn Instance>));
        let owner = env.reply_owner("test").map(|owner| owner.instance_id());
        assert!(matches!(owner, Ok(id) if id == InstanceId::new(5)));

        instance.set_connected(false);
        let Err(err) = env.reply_owner("test") else {
            panic!("disconnected owner must not accept a reply");
        };
        assert_eq!(
            err.to_string(),
            "cannot respond to test event: owner bot:5 is disconnected"
        );
    }

    #[test]
    fn display_and_debug() {
        let env = Envelope::from_parts(1000, 5, Some(bot(2)));
        assert_eq!(env.to_string(), "evt#5@1000/bot:2");
        assert_eq!(Envelope::from_parts(1000, 5, None).to_string(), "evt#5@1000");
        let debug = format!("{env:?}");
        assert!(debug.contains("sequence_id: 5"));
    }

    #[test]
    fn concurrent_construction_yields_unique_ids() {
        let gen = Arc::new(IdentityGenerator::new());
        let clock = Arc::new(ManualClock::new(1000));
        let mut handles = Vec::new();

        for i in 0..8u64 {
            let gen = Arc::clone(&gen);
            let clock = Arc::clone(&clock);
            handles.push(thread::spawn(move || {
                let owner: Arc<dyn Instance> = Arc::new(MemoryInstance::new(i));
                (0..250)
                    .map(|_| Envelope::stamped(clock.as_ref(), &gen, Some(Arc::clone(&owner))))
                    .collect::<Vec<_>>()
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            for env in handle.join().unwrap() {
                ids.insert(env.sequence_id());
            }
        }
        assert_eq!(ids.len(), 2000);
    }
}
