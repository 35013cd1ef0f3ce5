//! In-memory network-client instance for tests and local wiring.
//!
//! [`MemoryInstance`] records every outbound line instead of writing it to a
//! socket. Its connection flag and failure mode can be flipped at runtime to
//! exercise the error paths of `respond`.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use hookline_types::InstanceId;

use crate::error::OutboundError;
use crate::instance::Instance;

/// An [`Instance`] that keeps its outbound traffic in a `Vec`.
#[derive(Debug)]
pub struct MemoryInstance {
    id: InstanceId,
    connected: AtomicBool,
    failing: AtomicBool,
    sent: Mutex<Vec<String>>,
}

impl MemoryInstance {
    /// Create a connected instance with the given id.
    pub fn new(id: u64) -> Self {
        Self {
            id: InstanceId::new(id),
            connected: AtomicBool::new(true),
            failing: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// While set, every send fails with a broken-pipe I/O error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Lines sent so far, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, line: String) -> Result<(), OutboundError> {
        if !self.is_connected() {
            return Err(OutboundError::NotConnected);
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(OutboundError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "connection reset by peer",
            )));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line);
        Ok(())
    }
}

#[async_trait]
impl Instance for MemoryInstance {
    fn instance_id(&self) -> InstanceId {
        self.id
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn send_message(&self, target: &str, text: &str) -> Result<(), OutboundError> {
        self.record(format!("PRIVMSG {target} :{text}"))
    }

    async fn send_raw(&self, line: &str) -> Result<(), OutboundError> {
        self.record(line.to_string())
    }
}
