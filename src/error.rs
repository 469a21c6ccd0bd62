use tokio_tungstenite::tungstenite;

/// Transport faults on the command/update channel.
///
/// None of these are recoverable by the channel itself; reconnect policy
/// belongs to the embedder.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The channel left the open state. Every later `send` gets this
    /// rather than a silent drop, so callers can tell "sent" from
    /// "discarded".
    #[error("channel is closed")]
    Closed,

    #[error("invalid endpoint or subprotocol: {0}")]
    Endpoint(String),

    #[error("websocket handshake failed: {0}")]
    Handshake(#[source] tungstenite::Error),

    #[error("transport error: {0}")]
    Transport(#[source] tungstenite::Error),
}

/// Decode faults on inbound update frames.
///
/// All of these mean "malformed frame" at the protocol level: the caller
/// drops the frame, logs it, and continues with the next one. State is
/// never partially applied.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("frame is not a well-formed update envelope: {0}")]
    Malformed(#[from] prost::DecodeError),

    #[error("update envelope carries no recognized payload")]
    MissingPayload,

    #[error("update envelope carries more than one payload")]
    ConflictingPayload,
}
