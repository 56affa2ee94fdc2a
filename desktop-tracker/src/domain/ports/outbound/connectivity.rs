use async_trait::async_trait;

/// Reports whether the device currently has network access.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn is_online(&self) -> bool;
}
