//! Shared models for the banner grabber.
//!
//! Everything here is plain data: what to probe ([`network::target::Target`]),
//! how to probe it ([`config::ProbeConfig`]) and what came back
//! ([`banner::BannerResult`]). No I/O happens in this crate.

pub mod banner;
pub mod config;
pub mod error;
pub mod network;

#[doc(hidden)]
pub use tracing as __tracing;

/// Logs a successful milestone. Rendered with the `[+]` marker by the CLI.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "bannergrab::success", $($arg)*)
    };
}

/// Logs a run-level milestone, rendered with `[*]`.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__tracing::info!($($arg)*)
    };
}

/// Logs a recoverable problem, rendered with `[!]`.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!($($arg)*)
    };
}
