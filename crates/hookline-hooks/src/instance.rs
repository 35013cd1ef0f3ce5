use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use hookline_types::InstanceId;

use crate::error::OutboundError;

/// Upcast to `Any` so a shared instance handle can be narrowed back to its
/// concrete type.
///
/// Implemented for every `Send + Sync + 'static` type; implementors of
/// [`Instance`] never write it by hand.
pub trait AsAny: Any + Send + Sync {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// The slice of a network-client instance that events depend on.
///
/// Connection handling and protocol parsing live behind this trait. Events
/// hold an `Arc<dyn Instance>` purely as a back-reference: they read its id
/// and call its send primitives but never drive its lifecycle.
#[async_trait]
pub trait Instance: AsAny {
    /// Stable identity, fixed for the lifetime of the instance.
    fn instance_id(&self) -> InstanceId;

    /// Whether the instance currently has a live server connection.
    fn is_connected(&self) -> bool;

    /// Send a chat message to a channel or user.
    async fn send_message(&self, target: &str, text: &str) -> Result<(), OutboundError>;

    /// Send a raw protocol line to the server.
    async fn send_raw(&self, line: &str) -> Result<(), OutboundError>;
}
