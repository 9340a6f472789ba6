//! Banner acquisition engine.
//!
//! * [`grabber`] runs one connect, send, read, close cycle and yields a
//!   [`BannerResult`](bannergrab_common::banner::BannerResult).
//! * [`scanner`] fans a target list out over a bounded number of concurrent
//!   grabs and returns results in input order.
//! * [`network`] holds the transport seam the grabber dials through.

pub mod grabber;
pub mod network;
pub mod scanner;
