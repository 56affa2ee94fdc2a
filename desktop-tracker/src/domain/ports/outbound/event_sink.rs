use crate::domain::ConnectionEvent;

/// Receiver of lifecycle events, i.e. whatever renders the UI.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ConnectionEvent);
}
