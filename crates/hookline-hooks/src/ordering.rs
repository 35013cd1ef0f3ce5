use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;

use tracing::{debug, warn};

use hookline_types::Stamp;

use crate::config::DispatchConfig;
use crate::event::Event;

/// Heap entry ordered by the event's envelope.
struct Pending(Arc<dyn Event>);

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.compare(other.0.as_ref())
    }
}

/// Reorder buffer for events arriving from several instances.
///
/// Events are held for a window after their capture time so that a slightly
/// late event from another instance can still be delivered in order. Once
/// the window has passed, or the buffer is over capacity, events leave in
/// envelope order.
pub struct OrderedBuffer {
    heap: BinaryHeap<Reverse<Pending>>,
    window_ms: u64,
    capacity: usize,
    last_released: Option<Stamp>,
}

impl OrderedBuffer {
    /// Create an empty buffer. A zero capacity is treated as one.
    pub fn new(window_ms: u64, capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            window_ms,
            capacity: capacity.max(1),
            last_released: None,
        }
    }

    /// Create an empty buffer sized from the dispatch configuration.
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(config.reorder_window_ms, config.buffer_capacity)
    }

    /// Buffer an event. Late arrivals are logged but still delivered.
    pub fn push(&mut self, event: Arc<dyn Event>) {
        let stamp = event.envelope().stamp();
        if self.last_released.is_some_and(|last| stamp < last) {
            warn!(%stamp, "event arrived after its successors were released");
        }
        self.heap.push(Reverse(Pending(event)));
    }

    /// Pop every event whose window has elapsed at `now_ms`, in order.
    ///
    /// Events beyond capacity are released early regardless of their window.
    pub fn release_ready(&mut self, now_ms: u64) -> Vec<Arc<dyn Event>> {
        let mut ready = Vec::new();
        while let Some(Reverse(Pending(head))) = self.heap.peek() {
            let due = head.timestamp().saturating_add(self.window_ms) <= now_ms;
            if !due && self.heap.len() <= self.capacity {
                break;
            }
            if !due {
                debug!(len = self.heap.len(), capacity = self.capacity, "buffer over capacity, forcing release");
            }
            if let Some(event) = self.pop() {
                ready.push(event);
            }
        }
        ready
    }

    /// Pop everything, in order.
    pub fn drain(&mut self) -> Vec<Arc<dyn Event>> {
        let mut all = Vec::with_capacity(self.heap.len());
        while let Some(event) = self.pop() {
            all.push(event);
        }
        all
    }

    /// Stamp of the next event to leave the buffer.
    pub fn peek_stamp(&self) -> Option<Stamp> {
        self.heap
            .peek()
            .map(|Reverse(Pending(event))| event.envelope().stamp())
    }

    /// Number of events waiting for release.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn pop(&mut self) -> Option<Arc<dyn Event>> {
        let Reverse(Pending(event)) = self.heap.pop()?;
        self.last_released = Some(event.envelope().stamp());
        Some(event)
    }
}

/// Merge event streams from several instances into one sequence in envelope
/// order. Streams need not be sorted.
pub fn merge_streams<I>(streams: I) -> Vec<Arc<dyn Event>>
where
    I: IntoIterator<Item = Vec<Arc<dyn Event>>>,
{
    let mut merged: Vec<Arc<dyn Event>> = streams.into_iter().flatten().collect();
    merged.sort_by(|a, b| a.compare(b.as_ref()));
    merged
}
