use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use jira::{BasicAuth, JiraHost, SelfProfile};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::domain::{
    models::{ConnectedInfo, Credentials, Lookup, PersistedCredentials, Session},
    ports::outbound::{
        AuthServer, AuthServerError, ConnectivityProbe, EventSink, RealtimeChannel,
        RealtimeContext, RemoteApiConnector, SecureStore, StoreError, CREDENTIALS_KEY, TOKEN_KEY,
    },
    ConnectionError, ConnectionEvent,
};

const AUTO_LOGIN_FAILED: &str = "Automatic login failed, please enter your credentials again";
const TRACKER_UNREACHABLE: &str = "Cannot reach the tracker server, please try again later";
const JIRA_PROFILE_FAILED: &str =
    "Something went wrong with JIRA. Please check credentials and try again";
const JIRA_UNAUTHORIZED: &str = "Cannot authorize to JIRA. Check your credentials and try again";
const TOKEN_NOT_ISSUED: &str =
    "Connected to JIRA, but the tracker server issued no session token. Automatic login is unavailable";
const MISSING_TOKEN: &str = "No saved session, please enter your credentials";

/// Collaborators the [`ConnectionManager`] drives.
pub struct ConnectionPorts {
    pub auth_server: Arc<dyn AuthServer>,
    pub store: Arc<dyn SecureStore>,
    pub realtime: Arc<dyn RealtimeChannel>,
    pub probe: Arc<dyn ConnectivityProbe>,
    pub connector: Arc<dyn RemoteApiConnector>,
    pub events: Arc<dyn EventSink>,
}

/// Owns the authentication lifecycle against JIRA and the tracker server.
///
/// Every operation emits its progress through the [`EventSink`] before it
/// settles, and every failure resets the in-progress flag so the UI can accept
/// a new attempt. Callers should not start a second connect while
/// [`is_fetching`](Self::is_fetching) is true; the flag is advisory.
pub struct ConnectionManager {
    ports: ConnectionPorts,
    session: RwLock<Option<Session>>,
    profile: RwLock<Option<SelfProfile>>,
    fetching: AtomicBool,
}

impl ConnectionManager {
    pub fn new(ports: ConnectionPorts) -> Self {
        Self {
            ports,
            session: RwLock::new(None),
            profile: RwLock::new(None),
            fetching: AtomicBool::new(false),
        }
    }

    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn profile(&self) -> Option<SelfProfile> {
        self.profile.read().await.clone()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::SeqCst)
    }

    /// Reconnect with a bearer token issued by an earlier credential login.
    #[tracing::instrument(skip_all)]
    pub async fn connect_with_token(&self, token: &str) -> Result<Session, ConnectionError> {
        self.begin();

        let delegated = match self.ports.auth_server.exchange_token(token).await {
            Ok(delegated) => delegated,
            Err(AuthServerError::Unauthorized) => {
                self.forget_token().await;
                return Err(self.fail(
                    AUTO_LOGIN_FAILED,
                    ConnectionError::AuthRejected("saved token was rejected".to_string()),
                ));
            }
            Err(AuthServerError::Status(status)) => {
                self.forget_token().await;
                return Err(self.fail(
                    AUTO_LOGIN_FAILED,
                    ConnectionError::ServerError(format!("authenticate returned {}", status)),
                ));
            }
            Err(e) => {
                return Err(self.fail(
                    TRACKER_UNREACHABLE,
                    ConnectionError::ServerError(e.to_string()),
                ));
            }
        };

        let host = JiraHost::canonical(&delegated.base_url);
        let auth = BasicAuth::new(&delegated.username, &delegated.password);
        let client = match self.ports.connector.connect(&host, auth) {
            Ok(client) => client,
            Err(e) => {
                return Err(self.fail(
                    JIRA_PROFILE_FAILED,
                    ConnectionError::ProfileFetchFailed(e.to_string()),
                ));
            }
        };

        // Opened before the profile arrives so no push event is lost in between.
        self.open_realtime(RealtimeContext {
            host: host.clone(),
            username: delegated.username.clone(),
            token: Some(token.to_string()),
        })
        .await;

        let profile = match client.get_myself().await {
            Ok(profile) => profile,
            Err(e) => {
                self.ports.realtime.close().await;
                self.clear_session().await;
                return Err(self.fail(
                    JIRA_PROFILE_FAILED,
                    ConnectionError::ProfileFetchFailed(e.to_string()),
                ));
            }
        };

        let session = Session::new(
            client,
            host,
            delegated.username.clone(),
            Some(token.to_string()),
        );
        self.install(session.clone(), profile.clone()).await;

        self.emit(ConnectionEvent::SelfProfile(profile));
        self.emit(ConnectionEvent::Connected(ConnectedInfo {
            host: delegated.base_url,
            username: delegated.username,
            memorize: true,
        }));
        self.finish();

        tracing::info!(host = %session.host, "reconnected with saved token");
        Ok(session)
    }

    /// Log in with the form typed by the user.
    #[tracing::instrument(skip_all, fields(host = %credentials.host, username = %credentials.username))]
    pub async fn connect_with_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, ConnectionError> {
        self.begin();

        if let Err(reason) = credentials.validate() {
            return Err(self.fail(
                reason.clone(),
                ConnectionError::InvalidCredentials(reason),
            ));
        }

        let host = JiraHost::normalize(&credentials.host);
        let auth = BasicAuth::new(&credentials.username, &credentials.password);
        let client = match self.ports.connector.connect(&host, auth) {
            Ok(client) => client,
            Err(e) => {
                return Err(self.fail(
                    JIRA_UNAUTHORIZED,
                    ConnectionError::AuthRejected(e.to_string()),
                ));
            }
        };

        let profile = match client.get_myself().await {
            Ok(profile) => profile,
            Err(e) => {
                self.clear_session().await;
                return Err(self.fail(
                    JIRA_UNAUTHORIZED,
                    ConnectionError::AuthRejected(e.to_string()),
                ));
            }
        };
        self.emit(ConnectionEvent::SelfProfile(profile.clone()));

        let token = match self
            .ports
            .auth_server
            .issue_token(&host, &credentials.username, &credentials.password)
            .await
        {
            Ok(issued) => issued.token.filter(|token| !token.is_empty()),
            Err(e) => {
                tracing::warn!("tracker server did not issue a token: {}", e);
                None
            }
        };
        if token.is_none() {
            self.emit(ConnectionEvent::Warning(TOKEN_NOT_ISSUED.to_string()));
        }

        let session = Session::new(
            client,
            host.clone(),
            credentials.username.clone(),
            token.clone(),
        );
        self.install(session.clone(), profile).await;

        self.emit(ConnectionEvent::Connected(ConnectedInfo {
            host: credentials.host.clone(),
            username: credentials.username.clone(),
            memorize: credentials.memorize,
        }));
        self.emit(ConnectionEvent::AuthSucceeded);

        if let Some(token) = token {
            self.open_realtime(RealtimeContext {
                host,
                username: credentials.username.clone(),
                token: Some(token.clone()),
            })
            .await;

            match self.write(TOKEN_KEY, &token).await {
                Ok(()) => self.emit(ConnectionEvent::TokenSaved(token)),
                Err(e) => {
                    tracing::error!("Failed to save session token: {:?}", e);
                    self.emit(ConnectionEvent::Error(format!(
                        "Failed to save session token: {}",
                        e
                    )));
                }
            }
        }

        if credentials.memorize {
            let persisted = credentials.persisted();
            match self.write(CREDENTIALS_KEY, &persisted).await {
                Ok(()) => self.emit(ConnectionEvent::CredentialsMemorized(persisted)),
                Err(e) => {
                    tracing::error!("Failed to memorize credentials: {:?}", e);
                    self.emit(ConnectionEvent::Error(format!(
                        "Failed to remember credentials: {}",
                        e
                    )));
                }
            }
        }

        self.finish();
        tracing::info!(host = %session.host, "connected");
        Ok(session)
    }

    /// Read the host/username remembered by an earlier login.
    pub async fn load_persisted_credentials(
        &self,
    ) -> Result<Lookup<PersistedCredentials>, ConnectionError> {
        match self.read::<PersistedCredentials>(CREDENTIALS_KEY).await {
            Ok(credentials) => {
                self.emit(ConnectionEvent::SavedCredentialsLoaded(credentials.clone()));
                Ok(Lookup::from(credentials))
            }
            Err(e) => Err(self.fail(e.to_string(), ConnectionError::StorageError(e))),
        }
    }

    /// Read the saved bearer token. An absent or empty token is an error.
    pub async fn load_persisted_token(&self) -> Result<String, ConnectionError> {
        match self.read::<String>(TOKEN_KEY).await {
            Ok(Some(token)) if !token.is_empty() => {
                self.emit(ConnectionEvent::JwtLoaded(token.clone()));
                Ok(token)
            }
            Ok(_) => Err(self.fail(MISSING_TOKEN, ConnectionError::MissingToken)),
            Err(e) => Err(self.fail(e.to_string(), ConnectionError::StorageError(e))),
        }
    }

    /// Drop the in-memory session. Persisted credentials and token are kept.
    pub async fn logout(&self) {
        self.emit(ConnectionEvent::IssuesCleared);
        self.emit(ConnectionEvent::ProjectsCleared);
        self.ports.realtime.close().await;
        self.clear_session().await;
        self.emit(ConnectionEvent::LoggedOut);
        tracing::info!("logged out");
    }

    /// Remove the saved token and credentials from storage.
    pub async fn forget_persisted(&self) -> Result<(), ConnectionError> {
        self.ports.store.remove(TOKEN_KEY).await?;
        self.ports.store.remove(CREDENTIALS_KEY).await?;
        Ok(())
    }

    pub async fn probe_connectivity(&self) -> bool {
        let online = self.ports.probe.is_online().await;
        self.emit(ConnectionEvent::ConnectionStatus(online));
        online
    }

    pub fn set_auth_succeeded(&self) {
        self.emit(ConnectionEvent::AuthSucceeded);
    }

    fn emit(&self, event: ConnectionEvent) {
        self.ports.events.emit(event);
    }

    fn begin(&self) {
        self.fetching.store(true, Ordering::SeqCst);
        self.emit(ConnectionEvent::FetchInProgress(true));
    }

    fn finish(&self) {
        self.fetching.store(false, Ordering::SeqCst);
        self.emit(ConnectionEvent::FetchInProgress(false));
    }

    /// Reports a failed operation to the UI and hands the error back.
    fn fail(&self, message: impl Into<String>, error: ConnectionError) -> ConnectionError {
        let message = message.into();
        tracing::warn!("{}: {}", message, error);
        self.emit(ConnectionEvent::Error(message));
        self.finish();
        error
    }

    async fn install(&self, session: Session, profile: SelfProfile) {
        *self.session.write().await = Some(session);
        *self.profile.write().await = Some(profile);
    }

    async fn clear_session(&self) {
        *self.session.write().await = None;
        *self.profile.write().await = None;
    }

    async fn open_realtime(&self, context: RealtimeContext) {
        if let Err(e) = self.ports.realtime.login(&context).await {
            tracing::warn!("realtime channel unavailable: {}", e);
            self.emit(ConnectionEvent::Warning(format!(
                "Live updates are unavailable: {}",
                e
            )));
        }
    }

    async fn forget_token(&self) {
        if let Err(e) = self.ports.store.remove(TOKEN_KEY).await {
            tracing::error!("Failed to remove rejected token: {:?}", e);
        }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.ports
            .store
            .get(key)
            .await?
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value)?;
        self.ports.store.set(key, value).await
    }
}
