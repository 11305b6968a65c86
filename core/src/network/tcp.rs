use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use async_trait::async_trait;
use portsweep_common::network::outcome::{ProbeError, ProbeOutcome};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

use crate::scanner::Prober;

/// Full-handshake connect probe: one socket, one attempt, no data sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnectProbe;

#[async_trait]
impl Prober for TcpConnectProbe {
    async fn probe(&self, addr: Ipv4Addr, port: u16, probe_timeout: Duration) -> ProbeOutcome {
        let socket_addr = SocketAddr::V4(SocketAddrV4::new(addr, port));

        match timeout(probe_timeout, TcpStream::connect(socket_addr)).await {
            // The stream is dropped here, which closes the socket.
            Ok(Ok(_stream)) => ProbeOutcome::Open,
            Ok(Err(e)) => {
                trace!("connect to {socket_addr} failed: {e}");
                classify_connect_error(&e)
            }
            Err(_elapsed) => ProbeOutcome::ClosedOrFiltered,
        }
    }
}

/// Maps a failed connect to an outcome. Refusals and timeouts mean the port
/// is closed or filtered; anything else is a local or network error.
pub fn classify_connect_error(e: &io::Error) -> ProbeOutcome {
    match e.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::TimedOut => ProbeOutcome::ClosedOrFiltered,
        _ => ProbeOutcome::Error(ProbeError::from(e)),
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
