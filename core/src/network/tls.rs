use std::sync::{Arc, OnceLock};
use std::time::SystemTime;

use bannergrab_common::error::ConnectError;
use rustls::client::{ServerCertVerified, ServerCertVerifier};
use rustls::{Certificate, ClientConfig, ServerName};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;

/// Accepts any certificate chain. Banner grabbing only wants the bytes
/// behind the handshake, not assurance about who sent them.
struct AcceptAnyCertificate;

impl ServerCertVerifier for AcceptAnyCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &Certificate,
        _intermediates: &[Certificate],
        _server_name: &ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }
}

fn insecure_config() -> Arc<ClientConfig> {
    static INSECURE_CONFIG: OnceLock<Arc<ClientConfig>> = OnceLock::new();

    INSECURE_CONFIG
        .get_or_init(|| {
            let config = ClientConfig::builder()
                .with_safe_defaults()
                .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate))
                .with_no_client_auth();
            Arc::new(config)
        })
        .clone()
}

/// Runs a client handshake over `stream`, sending `host` as SNI when it is a DNS name.
pub async fn handshake(
    stream: TcpStream,
    host: &str,
    addr: &str,
) -> Result<TlsStream<TcpStream>, ConnectError> {
    let server_name: ServerName = ServerName::try_from(host)
        .map_err(|_| ConnectError::InvalidServerName(host.to_string()))?;

    TlsConnector::from(insecure_config())
        .connect(server_name, stream)
        .await
        .map_err(|source| ConnectError::Handshake {
            addr: addr.to_string(),
            source,
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
