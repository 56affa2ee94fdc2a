//! Realtime channel over a WebSocket.
//!
//! One connection per session. A background read loop forwards text frames
//! as [`ConnectionEvent::RealtimeMessage`] until the channel is replaced,
//! closed, or the server hangs up. Closing is local and sends no frames.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::{tungstenite, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    ports::outbound::{EventSink, RealtimeChannel, RealtimeContext, RealtimeError},
    ConnectionEvent,
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct WebSocketRealtime {
    url: Url,
    timeout: Duration,
    events: Arc<dyn EventSink>,
    active: Mutex<Option<CancellationToken>>,
}

impl WebSocketRealtime {
    pub fn new(url: &str, timeout: Duration, events: Arc<dyn EventSink>) -> anyhow::Result<Self> {
        let url = Url::parse(url).with_context(|| format!("Invalid realtime URL: {}", url))?;
        Ok(Self {
            url,
            timeout,
            events,
            active: Mutex::new(None),
        })
    }

    fn url_for(&self, context: &RealtimeContext) -> Url {
        let mut url = self.url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("host", context.host.as_str())
                .append_pair("username", &context.username);
            if let Some(token) = &context.token {
                query.append_pair("token", token);
            }
        }
        url
    }
}

#[async_trait]
impl RealtimeChannel for WebSocketRealtime {
    #[tracing::instrument(skip_all, fields(host = %context.host, username = %context.username))]
    async fn login(&self, context: &RealtimeContext) -> Result<(), RealtimeError> {
        let url = self.url_for(context);
        let (stream, _) =
            tokio::time::timeout(self.timeout, tokio_tungstenite::connect_async(url.as_str()))
                .await
                .map_err(|_| RealtimeError::Timeout)?
                .map_err(|e| RealtimeError::Connect(e.to_string()))?;

        let cancel = CancellationToken::new();
        if let Some(previous) = self.active.lock().await.replace(cancel.clone()) {
            debug!("replacing previous realtime channel");
            previous.cancel();
        }

        tokio::spawn(read_loop(stream, self.events.clone(), cancel));
        debug!("realtime channel open");
        Ok(())
    }

    async fn close(&self) {
        if let Some(active) = self.active.lock().await.take() {
            active.cancel();
            debug!("realtime channel closed");
        }
    }
}

async fn read_loop(stream: WsStream, events: Arc<dyn EventSink>, cancel: CancellationToken) {
    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            // Local teardown: the stream is dropped without a closing handshake.
            _ = cancel.cancelled() => break,
            msg = read.next() => match msg {
                Some(Ok(tungstenite::Message::Text(text))) => {
                    events.emit(ConnectionEvent::RealtimeMessage(text.as_str().to_owned()));
                }
                Some(Ok(tungstenite::Message::Ping(data))) => {
                    let _ = write.send(tungstenite::Message::Pong(data)).await;
                }
                Some(Ok(tungstenite::Message::Close(_))) | None => {
                    debug!("realtime channel closed by server");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("realtime channel error: {}", e);
                    break;
                }
            }
        }
    }
}
