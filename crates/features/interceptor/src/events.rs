use crate::error::InterceptorError;
use dynload_domain::navigation::NavigationEvent;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::trace;

/// Enough for a burst of clicks while a slow listener catches up.
const DEFAULT_CAPACITY: usize = 64;

/// Fan-out channel for [`NavigationEvent`]s.
///
/// Publishing never blocks and never fails: with no subscribers the event is dropped, and a
/// subscriber that falls behind observes `RecvError::Lagged` and resumes at the newest events.
#[derive(Debug, Clone)]
pub struct EventHub {
    sender: broadcast::Sender<Arc<NavigationEvent>>,
}

impl Default for EventHub {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(DEFAULT_CAPACITY);
        Self { sender }
    }
}

impl EventHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hub with a specific buffer capacity.
    ///
    /// # Errors
    /// Returns [`InterceptorError::Internal`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, InterceptorError> {
        if capacity == 0 {
            return Err(InterceptorError::Internal {
                message: "event hub capacity must be greater than zero".into(),
                context: None,
            });
        }
        let (sender, _) = broadcast::channel(capacity);
        Ok(Self { sender })
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<NavigationEvent>> {
        self.sender.subscribe()
    }

    /// Returns how many subscribers received the event.
    pub fn publish(&self, event: NavigationEvent) -> usize {
        self.sender.send(Arc::new(event)).map_or_else(
            |dropped| {
                trace!(event = ?dropped.0, "Navigation event dropped: no active subscribers");
                0
            },
            |count| {
                trace!(count, "Navigation event dispatched");
                count
            },
        )
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
