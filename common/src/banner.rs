//! Outcome records produced by a probe.

use std::fmt;

use serde::Serialize;

/// Why the read loop stopped.
///
/// Informational only. None of these are errors: a peer going quiet or hanging
/// up is how most non-HTTP services end their banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The accumulated bytes contain a blank-line header terminator.
    HeaderTerminator,
    /// The peer closed the stream.
    PeerClosed,
    /// The per-connection deadline elapsed.
    Deadline,
    /// Any other I/O failure while reading, such as a reset.
    ReadError,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::HeaderTerminator => "header terminator",
            Termination::PeerClosed => "peer closed",
            Termination::Deadline => "deadline",
            Termination::ReadError => "read error",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single outcome of probing one target.
///
/// Either `error` is set and `banner` is empty, or `error` is `None` and
/// `banner` holds whatever the peer sent (possibly nothing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerResult {
    pub host: String,
    pub port: String,
    pub protocol: String,
    pub banner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination: Option<Termination>,
}

impl BannerResult {
    /// A connection was made and `banner` is what was read before `termination`.
    pub fn captured(
        host: impl Into<String>,
        port: impl Into<String>,
        protocol: impl Into<String>,
        banner: impl Into<String>,
        termination: Termination,
    ) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            protocol: protocol.into(),
            banner: banner.into(),
            error: None,
            termination: Some(termination),
        }
    }

    /// No connection could be made.
    pub fn failed(
        host: impl Into<String>,
        port: impl Into<String>,
        protocol: impl Into<String>,
        error: impl fmt::Display,
    ) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            protocol: protocol.into(),
            banner: String::new(),
            error: Some(error.to_string()),
            termination: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Connected, but the peer sent nothing.
    pub fn is_silent(&self) -> bool {
        !self.is_error() && self.banner.is_empty()
    }

    /// Error text, or an empty string on success. Matches the flat CSV column.
    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }
}
