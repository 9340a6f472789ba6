use std::io;
use std::net::SocketAddr;

use async_trait::async_trait;
use bannergrab_common::error::ConnectError;
use bannergrab_common::network::target::join_host_port;
use tokio::net::{TcpStream, lookup_host};
use tracing::trace;

use crate::network::tls;
use crate::network::transport::{BoxedTransport, Connector};

/// Dials real sockets, optionally wrapping them in TLS.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, host: &str, port: &str, use_tls: bool) -> Result<BoxedTransport, ConnectError> {
        let addr: String = join_host_port(host, port);
        let stream: TcpStream = dial(host, port, &addr).await?;

        if use_tls {
            let tls_stream = tls::handshake(stream, host, &addr).await?;
            return Ok(Box::new(tls_stream));
        }
        Ok(Box::new(stream))
    }
}

/// Resolves `host` and tries each address in turn, keeping the last failure.
async fn dial(host: &str, port: &str, addr: &str) -> Result<TcpStream, ConnectError> {
    let port_num: u16 = port
        .parse()
        .map_err(|_| ConnectError::InvalidPort(port.to_string()))?;

    let candidates: Vec<SocketAddr> = lookup_host((host, port_num))
        .await
        .map_err(|source| ConnectError::Resolve {
            host: host.to_string(),
            source,
        })?
        .collect();

    let mut last_err: Option<io::Error> = None;
    for socket_addr in candidates {
        match TcpStream::connect(socket_addr).await {
            Ok(stream) => {
                trace!("connected to {socket_addr} for {addr}");
                return Ok(stream);
            }
            Err(e) => {
                trace!("connect to {socket_addr} failed: {e}");
                last_err = Some(e);
            }
        }
    }

    match last_err {
        Some(source) => Err(ConnectError::Connect {
            addr: addr.to_string(),
            source,
        }),
        None => Err(ConnectError::Unresolvable(host.to_string())),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
