use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::DispatchConfig;
use crate::error::{EventError, Result};
use crate::event::Event;
use crate::ordering::merge_streams;

/// Handler for dispatched events.
#[async_trait]
pub trait Listener: Send + Sync {
    /// Name used in logs and in [`EventError::Listener`].
    fn name(&self) -> &str;

    async fn on_event(&self, event: Arc<dyn Event>) -> Result<()>;
}

/// Outcome of delivering one event to every listener.
#[derive(Debug)]
pub struct DispatchReport {
    pub sequence_id: u64,
    pub delivered: usize,
    pub failures: Vec<EventError>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Delivers events to registered listeners, one event at a time.
///
/// A failing listener never stops the pipeline: its error is logged and
/// collected in the [`DispatchReport`], and the next event is dispatched as
/// usual.
pub struct ListenerManager {
    listeners: RwLock<Vec<Arc<dyn Listener>>>,
    config: DispatchConfig,
}

impl ListenerManager {
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            config,
        }
    }

    pub fn add_listener(&self, listener: Arc<dyn Listener>) {
        debug!(listener = listener.name(), "listener added");
        self.listeners
            .write()
            .expect("listener lock poisoned")
            .push(listener);
    }

    /// Remove every listener with the given name. Returns `true` if any was
    /// removed.
    pub fn remove_listener(&self, name: &str) -> bool {
        let mut listeners = self.listeners.write().expect("listener lock poisoned");
        let before = listeners.len();
        listeners.retain(|l| l.name() != name);
        before != listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().expect("listener lock poisoned").len()
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Deliver one event to every listener in registration order.
    pub async fn dispatch(&self, event: Arc<dyn Event>) -> DispatchReport {
        // Snapshot so no lock is held across an await.
        let listeners: Vec<Arc<dyn Listener>> = self
            .listeners
            .read()
            .expect("listener lock poisoned")
            .clone();

        let mut report = DispatchReport {
            sequence_id: event.sequence_id(),
            delivered: 0,
            failures: Vec::new(),
        };

        for listener in listeners {
            match listener.on_event(Arc::clone(&event)).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(
                        listener = listener.name(),
                        kind = event.kind(),
                        envelope = %event.envelope(),
                        error = %e,
                        "listener failed"
                    );
                    report.failures.push(EventError::Listener {
                        listener: listener.name().to_string(),
                        source: Box::new(e),
                    });
                    if self.config.stop_on_listener_error {
                        break;
                    }
                }
            }
        }

        debug!(
            sequence_id = report.sequence_id,
            delivered = report.delivered,
            failed = report.failures.len(),
            "event dispatched"
        );
        report
    }

    /// Sort a batch by envelope order, then dispatch each event in turn.
    pub async fn dispatch_batch(&self, events: Vec<Arc<dyn Event>>) -> Vec<DispatchReport> {
        let mut reports = Vec::with_capacity(events.len());
        for event in merge_streams([events]) {
            reports.push(self.dispatch(event).await);
        }
        reports
    }
}

impl Default for ListenerManager {
    fn default() -> Self {
        Self::new(DispatchConfig::default())
    }
}
