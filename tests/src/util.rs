use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Binds a loopback listener and runs `handler` for every accepted connection.
pub async fn spawn_listener<F, Fut>(handler: F) -> u16
where
    F: Fn(TcpStream) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
        .await
        .expect("bind loopback listener");
    let port = listener.local_addr().expect("listener address").port();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(handler(socket));
        }
    });
    port
}

/// A port on loopback that nothing listens on.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
        .await
        .expect("bind loopback listener");
    let port = listener.local_addr().expect("listener address").port();
    drop(listener);
    port
}

/// Sends `greeting` immediately, then keeps the connection open without a word.
pub async fn speak_first_then_idle(mut socket: TcpStream, greeting: &'static [u8]) {
    let _ = socket.write_all(greeting).await;
    tokio::time::sleep(Duration::from_secs(30)).await;
}

/// Reads one request up to its blank line, then answers and keeps the socket open.
pub async fn answer_http(mut socket: TcpStream, response: &'static [u8]) -> Vec<u8> {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let _ = socket.write_all(response).await;
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(socket);
    });
    request
}
