use std::io;
use std::time::Duration;

use thiserror::Error;

/// Failure to establish a usable connection to a target.
///
/// This is the only failure a probe reports. Anything that goes wrong after
/// the connection is up ends the read quietly and keeps whatever was captured.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid port '{0}'")]
    InvalidPort(String),

    #[error("lookup {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("lookup {0}: no addresses found")]
    Unresolvable(String),

    #[error("dial tcp {addr}: i/o timeout after {}s", .timeout.as_secs_f64())]
    Timeout { addr: String, timeout: Duration },

    #[error("dial tcp {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid TLS server name '{0}'")]
    InvalidServerName(String),

    #[error("tls handshake with {addr}: {source}")]
    Handshake {
        addr: String,
        #[source]
        source: io::Error,
    },
}

/// A raw target string that cannot name a host.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("empty target")]
    Empty,

    #[error("missing host in target '{0}'")]
    MissingHost(String),

    #[error("missing ']' in target '{0}'")]
    UnclosedBracket(String),

    #[error("unexpected characters after ']' in target '{0}'")]
    TrailingGarbage(String),
}
