//! End-to-end tests for the banner grabber against loopback listeners.

#[cfg(test)]
mod grab;
#[cfg(test)]
mod util;
