//! Loopback WebSocket tests for the channel client.

use beetles_ui::channel::{ChannelClient, ChannelEvent};
use beetles_ui::error::ChannelError;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::handshake::server::{
    ErrorResponse, Request, Response,
};
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;
use tokio_tungstenite::tungstenite::Message;

/// Accept one connection, echoing back whatever subprotocol the client
/// offered, the way the real daemon does.
async fn accept_one(
    listener: TcpListener,
) -> (
    tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>,
    Option<String>,
) {
    let (stream, _) = listener.accept().await.unwrap();
    let (tx, rx) = std::sync::mpsc::channel();
    let callback = move |request: &Request, mut response: Response| -> Result<Response, ErrorResponse> {
        let offered = request
            .headers()
            .get(SEC_WEBSOCKET_PROTOCOL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        if let Some(ref protocol) = offered {
            response
                .headers_mut()
                .insert(SEC_WEBSOCKET_PROTOCOL, protocol.parse().unwrap());
        }
        tx.send(offered).unwrap();
        Ok(response)
    };
    let socket = tokio_tungstenite::accept_hdr_async(stream, callback)
        .await
        .unwrap();
    (socket, rx.recv().unwrap())
}

#[tokio::test]
async fn handshake_offers_subprotocol_and_frames_flow() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = listener.local_addr().unwrap().to_string();

    let server = tokio::spawn(async move {
        let (mut socket, offered) = accept_one(listener).await;
        assert_eq!(offered.as_deref(), Some("battle-beetles"));

        socket.send(Message::Binary(vec![1, 2, 3])).await.unwrap();
        socket
            .send(Message::Text("not a frame".into()))
            .await
            .unwrap();
        socket.send(Message::Binary(vec![4, 5])).await.unwrap();

        // One command frame back from the client.
        let upstream = socket.next().await.unwrap().unwrap();
        assert_eq!(upstream, Message::Binary(vec![9, 9]));

        socket.close(None).await.unwrap();
    });

    let mut channel = ChannelClient::connect(&endpoint, "battle-beetles")
        .await
        .unwrap();

    match channel.recv().await {
        Some(ChannelEvent::Frame(frame)) => assert_eq!(frame, vec![1, 2, 3]),
        other => panic!("expected first frame, got {other:?}"),
    }
    // The text frame is dropped, so the next event is the second binary.
    match channel.recv().await {
        Some(ChannelEvent::Frame(frame)) => assert_eq!(frame, vec![4, 5]),
        other => panic!("expected second frame, got {other:?}"),
    }

    channel.send(vec![9, 9]).await.unwrap();

    match channel.recv().await {
        Some(ChannelEvent::Closed(_)) => {}
        other => panic!("expected close, got {other:?}"),
    }
    assert!(channel.is_closed());
    assert!(matches!(
        channel.send(vec![1]).await,
        Err(ChannelError::Closed)
    ));
    assert!(channel.recv().await.is_none());

    server.await.unwrap();
}

#[tokio::test]
async fn local_close_rejects_further_sends() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = listener.local_addr().unwrap().to_string();

    let server = tokio::spawn(async move {
        let (mut socket, _) = accept_one(listener).await;
        // Drain until the peer closes.
        while let Some(Ok(message)) = socket.next().await {
            if message.is_close() {
                break;
            }
        }
    });

    let mut channel = ChannelClient::connect(&endpoint, "battle-beetles")
        .await
        .unwrap();
    channel.close().await;

    assert!(channel.is_closed());
    assert!(matches!(
        channel.send(vec![0]).await,
        Err(ChannelError::Closed)
    ));

    server.await.unwrap();
}

#[tokio::test]
async fn server_without_subprotocol_echo_fails_the_handshake() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = listener.local_addr().unwrap().to_string();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        // Plain accept never echoes the offered subprotocol; the client
        // side must reject the connection rather than proceed.
        let _ = tokio_tungstenite::accept_async(stream).await;
    });

    let result = ChannelClient::connect(&endpoint, "battle-beetles").await;
    assert!(matches!(result, Err(ChannelError::Handshake(_))));

    server.await.unwrap();
}

#[tokio::test]
async fn connect_to_dead_endpoint_is_a_handshake_error() {
    // Bind then drop so the port is very likely unoccupied.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = listener.local_addr().unwrap().to_string();
    drop(listener);

    let result = ChannelClient::connect(&endpoint, "battle-beetles").await;
    assert!(matches!(result, Err(ChannelError::Handshake(_))));
}
