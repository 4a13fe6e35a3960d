//! WebSocket transport for the chat channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use super::channel::{Channel, ChannelError, Connector, Envelope, EventHandler, HandlerRegistry};
use crate::config::ServerConfig;
use crate::lifecycle::Disposer;

pub struct WsConnector {
    connect_timeout: Duration,
}

impl WsConnector {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(config.connect_timeout_seconds),
        }
    }
}

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, url: &str) -> Result<Arc<dyn Channel>, ChannelError> {
        let connect_error = |reason: String| ChannelError::Connect {
            url: url.to_owned(),
            reason,
        };
        let (stream, _response) =
            tokio::time::timeout(self.connect_timeout, tokio_tungstenite::connect_async(url))
                .await
                .map_err(|_| connect_error("timed out".into()))?
                .map_err(|e| connect_error(e.to_string()))?;
        tracing::info!(%url, "chat channel connected");

        let (mut sink, mut source) = stream.split();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<Message>();
        let registry = HandlerRegistry::default();
        let connected = Arc::new(AtomicBool::new(true));
        let shutdown = CancellationToken::new();

        let writer_shutdown = shutdown.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = writer_shutdown.cancelled() => {
                        let _ = sink.send(Message::Close(None)).await;
                        break;
                    }
                    next = outbound_rx.recv() => {
                        let Some(message) = next else { break };
                        if let Err(e) = sink.send(message).await {
                            tracing::warn!(error = %e, "chat send failed");
                            break;
                        }
                    }
                }
            }
        });

        let reader_registry = registry.clone();
        let reader_connected = Arc::clone(&connected);
        let reader_shutdown = shutdown.clone();
        tokio::spawn(async move {
            loop {
                let frame = tokio::select! {
                    _ = reader_shutdown.cancelled() => break,
                    frame = source.next() => frame,
                };
                match frame {
                    Some(Ok(Message::Text(text))) => match serde_json::from_str::<Envelope>(&text) {
                        Ok(envelope) => reader_registry.dispatch(&envelope.event, envelope.payload),
                        Err(e) => tracing::warn!(error = %e, "ignoring malformed chat frame"),
                    },
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("chat channel closed by server");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "chat channel read failed");
                        break;
                    }
                }
            }
            reader_connected.store(false, Ordering::SeqCst);
            reader_shutdown.cancel();
        });

        Ok(Arc::new(WsChannel {
            registry,
            outbound,
            connected,
            shutdown,
        }))
    }
}

pub struct WsChannel {
    registry: HandlerRegistry,
    outbound: mpsc::UnboundedSender<Message>,
    connected: Arc<AtomicBool>,
    shutdown: CancellationToken,
}

impl Channel for WsChannel {
    fn on(&self, event: &str, handler: EventHandler) -> Disposer {
        self.registry.register(event, handler)
    }

    fn emit(&self, event: &str, payload: Value) -> Result<(), ChannelError> {
        if !self.is_connected() {
            return Err(ChannelError::Closed);
        }
        let frame = serde_json::to_string(&Envelope {
            event: event.to_owned(),
            payload,
        })?;
        self.outbound
            .send(Message::Text(frame))
            .map_err(|_| ChannelError::Closed)
    }

    fn disconnect(&self) {
        if self.connected.swap(false, Ordering::SeqCst) {
            tracing::info!("chat channel disconnected");
        }
        self.shutdown.cancel();
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

impl Drop for WsChannel {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
