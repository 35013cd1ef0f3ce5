//! Event identity and ordering for hookline.
//!
//! Every protocol occurrence observed by a network-client instance becomes an
//! immutable event stamped with a wall-clock capture time and a process-wide
//! sequence number. The stamp gives a total order over events coming from
//! many instances in one process, which the ordered buffer and the listener
//! manager use to hand events to listeners in a deterministic sequence.

pub mod clock;
pub mod config;
pub mod envelope;
pub mod error;
pub mod event;
pub mod instance;
pub mod listener;
pub mod memory;
pub mod ordering;
pub mod sequence;
pub mod variants;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::DispatchConfig;
pub use envelope::Envelope;
pub use error::{EventError, OutboundError, Result};
pub use event::{Event, Respond};
pub use instance::{AsAny, Instance};
pub use listener::{DispatchReport, Listener, ListenerManager};
pub use memory::MemoryInstance;
pub use ordering::{merge_streams, OrderedBuffer};
pub use sequence::IdentityGenerator;
pub use variants::{ConnectEvent, DisconnectEvent, JoinEvent, MessageEvent, PrivateMessageEvent};

pub use hookline_types::{InstanceId, Stamp};
