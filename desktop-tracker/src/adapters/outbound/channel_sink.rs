use tokio::sync::mpsc;

use crate::domain::{ports::outbound::EventSink, ConnectionEvent};

/// Forwards lifecycle events to whoever holds the receiving half.
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<ConnectionEvent>,
}

impl ChannelEventSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ConnectionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ConnectionEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("event receiver dropped");
        }
    }
}
