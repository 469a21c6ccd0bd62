//! WebSocket transport to the simulation daemon.
//!
//! One binary frame per tick comes down, command frames go up. The
//! channel never reconnects on its own; once the peer goes away the
//! session loop decides what to do next.

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::error::ChannelError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Something the receive side handed up.
#[derive(Debug)]
pub enum ChannelEvent {
    /// A complete binary frame, ready for decoding.
    Frame(Vec<u8>),
    /// The connection ended; the string describes how.
    Closed(String),
}

pub struct ChannelClient {
    sink: SplitSink<WsStream, Message>,
    stream: SplitStream<WsStream>,
    closed: bool,
}

impl ChannelClient {
    /// Dial `endpoint` (a `host:port` pair) and negotiate `subprotocol`.
    ///
    /// The websocket library rejects the handshake itself if the server
    /// accepts the socket without echoing the offered subprotocol, so a
    /// successful connect implies the protocol was agreed.
    pub async fn connect(endpoint: &str, subprotocol: &str) -> Result<Self, ChannelError> {
        let url = format!("ws://{endpoint}");
        let mut request = url
            .clone()
            .into_client_request()
            .map_err(|e| ChannelError::Endpoint(e.to_string()))?;
        let protocol = HeaderValue::from_str(subprotocol)
            .map_err(|e| ChannelError::Endpoint(e.to_string()))?;
        request
            .headers_mut()
            .insert(SEC_WEBSOCKET_PROTOCOL, protocol);

        let (socket, _) = connect_async(request)
            .await
            .map_err(ChannelError::Handshake)?;
        info!(%url, subprotocol, "connected");

        let (sink, stream) = socket.split();
        Ok(Self {
            sink,
            stream,
            closed: false,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Ship an encoded command frame.
    pub async fn send(&mut self, frame: Vec<u8>) -> Result<(), ChannelError> {
        if self.closed {
            return Err(ChannelError::Closed);
        }
        match self.sink.send(Message::Binary(frame)).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.closed = true;
                Err(ChannelError::Transport(e))
            }
        }
    }

    /// Wait for the next frame. Returns `None` only after a `Closed`
    /// event has already been delivered.
    pub async fn recv(&mut self) -> Option<ChannelEvent> {
        if self.closed {
            return None;
        }
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Binary(data))) => {
                    return Some(ChannelEvent::Frame(data));
                }
                Some(Ok(Message::Text(text))) => {
                    warn!(len = text.len(), "dropping unexpected text frame");
                }
                Some(Ok(Message::Close(reason))) => {
                    self.closed = true;
                    let detail = reason
                        .map(|f| f.to_string())
                        .unwrap_or_else(|| "peer closed".into());
                    return Some(ChannelEvent::Closed(detail));
                }
                Some(Ok(other)) => {
                    debug!(?other, "ignoring control frame");
                }
                Some(Err(e)) => {
                    self.closed = true;
                    return Some(ChannelEvent::Closed(e.to_string()));
                }
                None => {
                    self.closed = true;
                    return Some(ChannelEvent::Closed("stream ended".into()));
                }
            }
        }
    }

    /// Polite shutdown. Errors are ignored; the socket is going away
    /// either way.
    pub async fn close(&mut self) {
        if !self.closed {
            let _ = self.sink.send(Message::Close(None)).await;
            self.closed = true;
        }
    }
}
