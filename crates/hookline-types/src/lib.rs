//! Foundation types for hookline.
//!
//! Plain value types shared by every hookline crate. Nothing here owns a
//! connection or performs I/O.
//!
//! # Key Types
//!
//! - [`InstanceId`]: Stable identifier of a network-client instance
//! - [`Stamp`]: Capture timestamp plus sequence number of an event

pub mod instance;
pub mod stamp;

pub use instance::InstanceId;
pub use stamp::Stamp;
