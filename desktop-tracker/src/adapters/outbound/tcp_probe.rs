use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;

use crate::domain::ports::outbound::ConnectivityProbe;

/// Considers the device online when any of the configured `host:port`
/// endpoints accepts a TCP connection within the timeout.
#[derive(Debug, Clone)]
pub struct TcpConnectivityProbe {
    hosts: Vec<String>,
    timeout: Duration,
}

impl TcpConnectivityProbe {
    pub fn new(hosts: Vec<String>, timeout: Duration) -> Self {
        Self { hosts, timeout }
    }

    async fn reachable(&self, host: &str) -> bool {
        match tokio::time::timeout(self.timeout, TcpStream::connect(host)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::debug!("{} unreachable: {}", host, e);
                false
            }
            Err(_) => {
                tracing::debug!("{} timed out after {:?}", host, self.timeout);
                false
            }
        }
    }
}

#[async_trait]
impl ConnectivityProbe for TcpConnectivityProbe {
    async fn is_online(&self) -> bool {
        for host in &self.hosts {
            if self.reachable(host).await {
                return true;
            }
        }
        false
    }
}
