//! Static per-protocol knowledge: what to send first and where to connect.

pub mod payload;

pub use payload::{HOST_PLACEHOLDER, default_payload, implies_tls, is_known, render_payload};

pub const DEFAULT_PORT: &str = "80";
pub const DEFAULT_TLS_PORT: &str = "443";

/// Port used when neither an override nor the target names one.
pub fn default_port(use_tls: bool) -> &'static str {
    if use_tls { DEFAULT_TLS_PORT } else { DEFAULT_PORT }
}
