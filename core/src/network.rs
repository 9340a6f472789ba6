pub mod tcp;
pub mod tls;
pub mod transport;
