//! In-memory collaborators for testing the connection lifecycle.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jira::{BasicAuth, JiraFetchError, JiraHost, SelfProfile};
use serde_json::Value;

use super::{
    AuthServer, AuthServerError, ConnectivityProbe, DelegatedCredentials, EventSink, IssuedToken,
    RealtimeChannel, RealtimeContext, RealtimeError, RemoteApi, RemoteApiConnector, SecureStore,
    StoreError,
};
use crate::domain::ConnectionEvent;

/// Key/value store backed by a `HashMap`, optionally failing every read or write.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Value>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: Value) -> Self {
        self.entries.lock().unwrap().insert(key.to_string(), value);
        self
    }

    pub fn failing_reads(self) -> Self {
        self.fail_reads.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    pub fn entry(&self, key: &str) -> Option<Value> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Every `set` call in order.
    pub fn writes(&self) -> Vec<(String, Value)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecureStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("store is locked")));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.clone()));
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Tracker server with canned responses.
#[derive(Clone)]
pub struct MockAuthServer {
    exchange: Result<DelegatedCredentials, AuthServerError>,
    issue: Result<IssuedToken, AuthServerError>,
    exchanged_tokens: Arc<Mutex<Vec<String>>>,
    issue_requests: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl MockAuthServer {
    pub fn new() -> Self {
        Self {
            exchange: Err(AuthServerError::Unauthorized),
            issue: Ok(IssuedToken::default()),
            exchanged_tokens: Arc::new(Mutex::new(Vec::new())),
            issue_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn exchanging(mut self, result: Result<DelegatedCredentials, AuthServerError>) -> Self {
        self.exchange = result;
        self
    }

    pub fn issuing(mut self, result: Result<IssuedToken, AuthServerError>) -> Self {
        self.issue = result;
        self
    }

    pub fn exchanged_tokens(&self) -> Vec<String> {
        self.exchanged_tokens.lock().unwrap().clone()
    }

    /// `(base_url, username, password)` of every issue request.
    pub fn issue_requests(&self) -> Vec<(String, String, String)> {
        self.issue_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthServer for MockAuthServer {
    async fn exchange_token(&self, token: &str) -> Result<DelegatedCredentials, AuthServerError> {
        self.exchanged_tokens.lock().unwrap().push(token.to_string());
        self.exchange.clone()
    }

    async fn issue_token(
        &self,
        host: &JiraHost,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthServerError> {
        self.issue_requests.lock().unwrap().push((
            host.to_string(),
            username.to_string(),
            password.to_string(),
        ));
        self.issue.clone()
    }
}

/// Remote API returning a fixed profile, or `Unauthorized` when none is set.
pub struct MockRemoteApi {
    profile: Option<SelfProfile>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl RemoteApi for MockRemoteApi {
    async fn get_myself(&self) -> Result<SelfProfile, JiraFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.profile.clone().ok_or(JiraFetchError::Unauthorized)
    }
}

#[derive(Clone, Default)]
pub struct MockConnector {
    profile: Option<SelfProfile>,
    connections: Arc<Mutex<Vec<(String, String)>>>,
    profile_calls: Arc<AtomicUsize>,
}

impl MockConnector {
    pub fn returning(profile: SelfProfile) -> Self {
        Self {
            profile: Some(profile),
            ..Self::default()
        }
    }

    pub fn unauthorized() -> Self {
        Self::default()
    }

    /// `(host, username)` of every constructed client.
    pub fn connections(&self) -> Vec<(String, String)> {
        self.connections.lock().unwrap().clone()
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }
}

impl RemoteApiConnector for MockConnector {
    fn connect(
        &self,
        host: &JiraHost,
        auth: BasicAuth,
    ) -> Result<Arc<dyn RemoteApi>, JiraFetchError> {
        self.connections
            .lock()
            .unwrap()
            .push((host.to_string(), auth.username().to_string()));
        Ok(Arc::new(MockRemoteApi {
            profile: self.profile.clone(),
            calls: self.profile_calls.clone(),
        }))
    }
}

#[derive(Clone, Default)]
pub struct MockRealtime {
    fail: bool,
    logins: Arc<Mutex<Vec<RealtimeContext>>>,
    closes: Arc<AtomicUsize>,
}

impl MockRealtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn logins(&self) -> Vec<RealtimeContext> {
        self.logins.lock().unwrap().clone()
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RealtimeChannel for MockRealtime {
    async fn login(&self, context: &RealtimeContext) -> Result<(), RealtimeError> {
        self.logins.lock().unwrap().push(context.clone());
        if self.fail {
            return Err(RealtimeError::Connect("connection refused".to_string()));
        }
        Ok(())
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct MockProbe(pub bool);

#[async_trait]
impl ConnectivityProbe for MockProbe {
    async fn is_online(&self) -> bool {
        self.0
    }
}

/// Records every emitted event.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<ConnectionEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ConnectionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: ConnectionEvent) {
        self.events.lock().unwrap().push(event);
    }
}
