use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use portsweep_common::network::outcome::ProbeOutcome;
use portsweep_core::{Prober, TcpConnectProbe};
use tokio::net::TcpListener;

/// Real TCP probe whose scan port `n` is redirected to `ports[n - 1]`, so a
/// small `1..=n` scan can hit ephemeral loopback ports.
pub struct RemappedProbe {
    ports: Vec<u16>,
    pub calls: AtomicUsize,
}

impl RemappedProbe {
    pub fn new(ports: Vec<u16>) -> Self {
        Self {
            ports,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Prober for RemappedProbe {
    async fn probe(&self, addr: Ipv4Addr, port: u16, timeout: Duration) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let real_port = self.ports[usize::from(port) - 1];
        TcpConnectProbe.probe(addr, real_port, timeout).await
    }
}

pub async fn open_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

/// A loopback port that nothing listens on (bound, then released).
pub async fn closed_port() -> u16 {
    let (listener, port) = open_listener().await;
    drop(listener);
    port
}
