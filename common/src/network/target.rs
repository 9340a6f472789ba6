//! # Probe Target Model
//!
//! Defines a single address to grab a banner from.
//!
//! A target is written as one of:
//! * A bare host (e.g., `example.com`, `10.0.0.5`).
//! * A host with a port (e.g., `example.com:2121`).
//! * A bracketed IPv6 literal with an optional port (e.g., `[::1]:22`).
//! * A bare IPv6 literal (e.g., `fe80::1`), which never carries a port.
//!
//! The embedded port is kept exactly as written. It is only validated when a
//! connection is attempted, so a malformed port surfaces as that target's
//! connection error instead of rejecting the whole target list.

use std::fmt;
use std::str::FromStr;

use crate::error::TargetError;

/// Represents one host to be probed, in input order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    /// Hostname or IP literal, without IPv6 brackets.
    pub host: String,
    /// Port embedded in the raw target, if any.
    pub port: Option<String>,
}

impl Target {
    pub fn new(host: impl Into<String>, port: Option<String>) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Picks the port to dial.
    ///
    /// Precedence: `port_override` > the embedded port > `default_port`.
    pub fn resolve_port<'a>(&'a self, port_override: Option<&'a str>, default_port: &'a str) -> &'a str {
        port_override
            .or(self.port.as_deref())
            .unwrap_or(default_port)
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TargetError::Empty);
        }

        if let Some(rest) = s.strip_prefix('[') {
            return parse_bracketed(rest, s);
        }

        match s.matches(':').count() {
            0 => Ok(Target::new(s, None)),
            1 => {
                let (host, port) = s.split_once(':').unwrap_or((s, ""));
                if host.is_empty() {
                    return Err(TargetError::MissingHost(s.to_string()));
                }
                Ok(Target::new(host, non_empty(port)))
            }
            _ => Ok(Target::new(s, None)),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host: &str = &self.host;
        match (&self.port, host.contains(':')) {
            (Some(port), true) => write!(f, "[{host}]:{port}"),
            (Some(port), false) => write!(f, "{host}:{port}"),
            (None, _) => write!(f, "{host}"),
        }
    }
}

/// Parses the remainder of `[addr]` or `[addr]:port`.
fn parse_bracketed(rest: &str, original: &str) -> Result<Target, TargetError> {
    let Some((host, tail)) = rest.split_once(']') else {
        return Err(TargetError::UnclosedBracket(original.to_string()));
    };
    if host.is_empty() {
        return Err(TargetError::MissingHost(original.to_string()));
    }

    match tail {
        "" => Ok(Target::new(host, None)),
        _ => match tail.strip_prefix(':') {
            Some(port) => Ok(Target::new(host, non_empty(port))),
            None => Err(TargetError::TrailingGarbage(original.to_string())),
        },
    }
}

fn non_empty(port: &str) -> Option<String> {
    (!port.is_empty()).then(|| port.to_string())
}

/// Joins a host and port into a dialable `host:port` string, bracketing IPv6 literals.
pub fn join_host_port(host: &str, port: &str) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
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
