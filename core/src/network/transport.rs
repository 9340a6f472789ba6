use async_trait::async_trait;
use bannergrab_common::error::ConnectError;
use tokio::io::{AsyncRead, AsyncWrite};

/// A connected byte stream, plain or TLS-wrapped.
pub trait Transport: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T> Transport for T where T: AsyncRead + AsyncWrite + Unpin + Send {}

pub type BoxedTransport = Box<dyn Transport>;

/// Opens transports to targets.
///
/// The grabber bounds every call with its own timeout, so implementations
/// do not need to enforce one.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, host: &str, port: &str, use_tls: bool) -> Result<BoxedTransport, ConnectError>;
}
