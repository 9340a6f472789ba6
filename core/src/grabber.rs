//! # Banner Acquisition
//!
//! One probe is a fixed sequence: connect (optionally over TLS), send the
//! rendered payload if there is one, read until a stop condition, then close.
//!
//! Connection setup is bounded by the probe timeout. Once connected, a fresh
//! absolute deadline of the same length covers the write and every read.
//!
//! Reading stops when any of these happens first:
//! * the accumulated bytes contain `\r\n\r\n` (end of an HTTP header block),
//! * the peer closes the stream,
//! * the deadline elapses,
//! * any other read error occurs.
//!
//! None of these count as failures. Only connection setup can fail a probe.

use std::io;
use std::time::Duration;

use bannergrab_common::banner::{BannerResult, Termination};
use bannergrab_common::error::ConnectError;
use bannergrab_common::network::target::join_host_port;
use bannergrab_protocols::render_payload;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::time::{Instant, timeout, timeout_at};
use tracing::{debug, trace};

use crate::network::transport::{BoxedTransport, Connector};

/// Blank line ending an HTTP-style header block.
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

const READ_CHUNK_SIZE: usize = 4096;

/// Stand-in deadline for timeouts too large to add to the clock.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Everything needed to probe a single endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub host: String,
    /// Already resolved; never empty.
    pub port: String,
    /// Label carried into the result. Does not alter behavior.
    pub protocol: String,
    /// Template; `{host}` is substituted before sending. Empty sends nothing.
    pub payload: String,
    pub timeout: Duration,
    pub use_tls: bool,
}

/// Runs one probe to completion. Never panics on network failure and never
/// returns without a result.
pub async fn acquire<C>(connector: &C, probe: &Probe) -> BannerResult
where
    C: Connector + ?Sized,
{
    let mut stream: BoxedTransport = match establish(connector, probe).await {
        Ok(stream) => stream,
        Err(e) => {
            debug!("{}:{} unreachable: {e}", probe.host, probe.port);
            return BannerResult::failed(&probe.host, &probe.port, &probe.protocol, e);
        }
    };

    let deadline: Instant = deadline_after(probe.timeout);

    if !probe.payload.is_empty() {
        let payload: String = render_payload(&probe.payload, &probe.host);
        send_payload(&mut stream, payload.as_bytes(), deadline).await;
    }

    let (bytes, termination) = read_banner(&mut stream, deadline).await;
    drop(stream);

    trace!(
        "{}:{} read {} bytes, stopped on {termination}",
        probe.host,
        probe.port,
        bytes.len()
    );

    let banner: String = String::from_utf8_lossy(&bytes).into_owned();
    BannerResult::captured(&probe.host, &probe.port, &probe.protocol, banner, termination)
}

async fn establish<C>(connector: &C, probe: &Probe) -> Result<BoxedTransport, ConnectError>
where
    C: Connector + ?Sized,
{
    match timeout(
        probe.timeout,
        connector.connect(&probe.host, &probe.port, probe.use_tls),
    )
    .await
    {
        Ok(result) => result,
        Err(_elapsed) => Err(ConnectError::Timeout {
            addr: join_host_port(&probe.host, &probe.port),
            timeout: probe.timeout,
        }),
    }
}

/// The instant `timeout` from now, saturating at [`FAR_FUTURE`].
fn deadline_after(timeout: Duration) -> Instant {
    let now: Instant = Instant::now();
    now.checked_add(timeout).unwrap_or_else(|| now + FAR_FUTURE)
}

/// A failed write is not reported; the following read surfaces the same problem.
async fn send_payload(stream: &mut BoxedTransport, payload: &[u8], deadline: Instant) {
    let write = async {
        stream.write_all(payload).await?;
        stream.flush().await?;
        Ok::<(), io::Error>(())
    };

    match timeout_at(deadline, write).await {
        Ok(Ok(())) => trace!("sent {} byte payload", payload.len()),
        Ok(Err(e)) => debug!("payload write failed: {e}"),
        Err(_elapsed) => debug!("payload write hit the deadline"),
    }
}

/// Accumulates bytes until a stop condition. See the module docs for the list.
pub async fn read_banner<R>(stream: &mut R, deadline: Instant) -> (Vec<u8>, Termination)
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut banner: Vec<u8> = Vec::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        match timeout_at(deadline, stream.read(&mut chunk)).await {
            Err(_elapsed) => return (banner, Termination::Deadline),
            Ok(Ok(0)) => return (banner, Termination::PeerClosed),
            Ok(Ok(n)) => {
                // The terminator may straddle the previous chunk.
                let scan_from: usize = banner.len().saturating_sub(HEADER_TERMINATOR.len() - 1);
                banner.extend_from_slice(&chunk[..n]);
                if contains_terminator(&banner[scan_from..]) {
                    return (banner, Termination::HeaderTerminator);
                }
            }
            Ok(Err(e)) => {
                trace!("read ended with error: {e}");
                return (banner, Termination::ReadError);
            }
        }
    }
}

fn contains_terminator(bytes: &[u8]) -> bool {
    bytes
        .windows(HEADER_TERMINATOR.len())
        .any(|window| window == HEADER_TERMINATOR)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::io::{DuplexStream, duplex};
    use tokio::sync::oneshot;

    /// Hands out pre-built in-memory streams, one per connect call.
    struct ScriptedConnector {
        streams: Mutex<Vec<DuplexStream>>,
    }

    impl ScriptedConnector {
        fn new(stream: DuplexStream) -> Self {
            Self {
                streams: Mutex::new(vec![stream]),
            }
        }
    }

    #[async_trait]
    impl Connector for ScriptedConnector {
        async fn connect(&self, _host: &str, _port: &str, _use_tls: bool) -> Result<BoxedTransport, ConnectError> {
            let stream = self.streams.lock().unwrap().pop().unwrap();
            Ok(Box::new(stream))
        }
    }

    /// Never completes the connection.
    struct HangingConnector;

    #[async_trait]
    impl Connector for HangingConnector {
        async fn connect(&self, _host: &str, _port: &str, _use_tls: bool) -> Result<BoxedTransport, ConnectError> {
            std::future::pending().await
        }
    }

    fn probe(payload: &str, timeout: Duration) -> Probe {
        Probe {
            host: "scanme.test".into(),
            port: "80".into(),
            protocol: "http".into(),
            payload: payload.into(),
            timeout,
            use_tls: false,
        }
    }

    #[tokio::test]
    async fn stops_at_header_terminator_without_waiting_for_timeout() {
        let (client, mut server) = duplex(4096);
        let (done_tx, done_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            server
                .write_all(b"HTTP/1.1 200 OK\r\nServer: nginx\r\n\r\n")
                .await
                .unwrap();
            // Keep the stream open until the probe is finished.
            let _ = done_rx.await;
        });

        let started = Instant::now();
        let result = acquire(&ScriptedConnector::new(client), &probe("", Duration::from_secs(5))).await;
        let _ = done_tx.send(());

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(result.banner, "HTTP/1.1 200 OK\r\nServer: nginx\r\n\r\n");
        assert_eq!(result.error, None);
        assert_eq!(result.termination, Some(Termination::HeaderTerminator));
    }

    #[tokio::test]
    async fn silent_peer_returns_partial_banner_at_deadline() {
        let (client, mut server) = duplex(4096);
        let (done_tx, done_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            server.write_all(b"SSH-2.0-OpenSSH_9.6\r\n").await.unwrap();
            let _ = done_rx.await;
        });

        let timeout = Duration::from_millis(300);
        let started = Instant::now();
        let result = acquire(&ScriptedConnector::new(client), &probe("", timeout)).await;
        let elapsed = started.elapsed();
        let _ = done_tx.send(());

        assert!(elapsed >= timeout);
        assert!(elapsed < timeout + Duration::from_millis(500));
        assert_eq!(result.banner, "SSH-2.0-OpenSSH_9.6\r\n");
        assert_eq!(result.error, None);
        assert_eq!(result.termination, Some(Termination::Deadline));
    }

    #[tokio::test]
    async fn peer_close_ends_read_without_error() {
        let (client, mut server) = duplex(4096);
        tokio::spawn(async move {
            server.write_all(b"220 ftp ready\r\n").await.unwrap();
        });

        let result = acquire(&ScriptedConnector::new(client), &probe("", Duration::from_secs(5))).await;
        assert_eq!(result.banner, "220 ftp ready\r\n");
        assert_eq!(result.error, None);
        assert_eq!(result.termination, Some(Termination::PeerClosed));
    }

    #[tokio::test]
    async fn payload_is_rendered_with_host_before_reading() {
        let (client, mut server) = duplex(4096);
        let (sent_tx, sent_rx) = oneshot::channel::<Vec<u8>>();
        tokio::spawn(async move {
            let mut received = Vec::new();
            let mut buf = [0u8; 256];
            while !contains_terminator(&received) {
                let n = server.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            server.write_all(b"HTTP/1.0 404 Not Found\r\n\r\n").await.unwrap();
            let _ = sent_tx.send(received);
        });

        let template = "GET / HTTP/1.1\r\nHost: {host}\r\n\r\n";
        let result = acquire(&ScriptedConnector::new(client), &probe(template, Duration::from_secs(5))).await;

        assert_eq!(
            sent_rx.await.unwrap(),
            b"GET / HTTP/1.1\r\nHost: scanme.test\r\n\r\n".to_vec()
        );
        assert_eq!(result.banner, "HTTP/1.0 404 Not Found\r\n\r\n");
    }

    #[tokio::test]
    async fn connect_timeout_is_reported_as_error() {
        let timeout = Duration::from_millis(100);
        let result = acquire(&HangingConnector, &probe("", timeout)).await;

        assert!(result.banner.is_empty());
        assert!(result.error.unwrap().contains("timeout"));
        assert_eq!(result.termination, None);
    }

    #[tokio::test]
    async fn terminator_split_across_chunks_is_detected() {
        let (mut client, mut server) = duplex(4096);
        tokio::spawn(async move {
            server.write_all(b"HTTP/1.1 301 Moved\r\n\r").await.unwrap();
            tokio::time::sleep(Duration::from_millis(20)).await;
            server.write_all(b"\nbody").await.unwrap();
            std::future::pending::<()>().await;
        });

        let deadline = Instant::now() + Duration::from_secs(5);
        let (bytes, termination) = read_banner(&mut client, deadline).await;

        assert_eq!(termination, Termination::HeaderTerminator);
        assert!(bytes.starts_with(b"HTTP/1.1 301 Moved\r\n\r\n"));
    }

    #[tokio::test]
    async fn huge_timeout_still_captures_the_banner() {
        let (client, mut server) = duplex(4096);
        let (done_tx, done_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            server.write_all(b"HTTP/1.0 200 OK\r\n\r\n").await.unwrap();
            let _ = done_rx.await;
        });

        let result = acquire(
            &ScriptedConnector::new(client),
            &probe("", Duration::from_secs(u64::MAX)),
        )
        .await;
        let _ = done_tx.send(());

        assert_eq!(result.banner, "HTTP/1.0 200 OK\r\n\r\n");
        assert_eq!(result.error, None);
        assert_eq!(result.termination, Some(Termination::HeaderTerminator));
    }

    #[test]
    fn deadline_saturates_instead_of_overflowing() {
        let before = Instant::now();
        assert!(deadline_after(Duration::MAX) >= before + FAR_FUTURE);

        let short = deadline_after(Duration::from_secs(1));
        assert!(short >= before + Duration::from_secs(1));
        assert!(short < before + Duration::from_secs(2));
    }

    #[test]
    fn terminator_detection() {
        assert!(contains_terminator(b"a\r\n\r\nb"));
        assert!(!contains_terminator(b"a\r\n\nb"));
        assert!(!contains_terminator(b"\r\n\r"));
        assert!(!contains_terminator(b""));
    }
}
