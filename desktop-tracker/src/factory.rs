//! Composition root. The only place that names concrete outbound adapters.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    adapters::outbound::{
        ChannelEventSink, FileSecureStore, JiraConnector, TcpConnectivityProbe,
        TrackerServerClient, WebSocketRealtime,
    },
    config::TrackerConfig,
    domain::{
        ports::outbound::EventSink,
        services::{ConnectionManager, ConnectionPorts},
        ConnectionEvent,
    },
};

/// Builds a [`ConnectionManager`] wired to the real network and disk adapters.
///
/// Events from the manager and the realtime channel arrive on the returned receiver.
pub fn build_connection_manager(
    config: &TrackerConfig,
) -> Result<(ConnectionManager, UnboundedReceiver<ConnectionEvent>)> {
    let timeout = config.request_timeout();
    let (sink, rx) = ChannelEventSink::channel();
    let events: Arc<dyn EventSink> = Arc::new(sink);

    let store_path = config.store_path()?;
    let store = FileSecureStore::open(store_path.clone())
        .with_context(|| format!("Failed to open store at {}", store_path.display()))?;

    let ports = ConnectionPorts {
        auth_server: Arc::new(TrackerServerClient::new(&config.static_url, timeout)?),
        store: Arc::new(store),
        realtime: Arc::new(WebSocketRealtime::new(
            &config.realtime_url,
            timeout,
            events.clone(),
        )?),
        probe: Arc::new(TcpConnectivityProbe::new(
            config.probe_hosts.clone(),
            timeout,
        )),
        connector: Arc::new(JiraConnector::new(timeout)),
        events,
    };

    Ok((ConnectionManager::new(ports), rx))
}
