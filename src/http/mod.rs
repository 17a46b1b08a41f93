//! HTTP transport used by the runner.
mod client;
mod transport;


pub use client::{ClientOptions, ReqwestTransport};
pub use transport::{Transport, TransportResponse};
