//! Concurrent TCP connect-scanning engine.
//!
//! [`scanner::Scanner`] validates the input, then scans targets one after the
//! other. Ports within a target are drained from a [`scanner::queue::PortQueue`]
//! by a fixed-size [`scanner::pool::WorkerPool`], each worker using a
//! [`scanner::Prober`] such as [`network::tcp::TcpConnectProbe`].

pub mod network;
pub mod scanner;

pub use network::tcp::TcpConnectProbe;
pub use scanner::{Prober, Scanner, StopSignal};
pub use scanner::sink::EventSink;
