use std::net::Ipv4Addr;
use std::sync::atomic::Ordering;
use std::time::Duration;

use portsweep_common::config::ScanConfig;
use portsweep_common::error::ScanError;
use portsweep_common::network::target::Target;
use portsweep_common::report::{ScanEvent, TargetStatus};
use portsweep_core::{EventSink, Scanner};

use crate::utils::{RemappedProbe, closed_port, open_listener};

fn open_ports(events: &[ScanEvent]) -> Vec<u16> {
    let mut ports: Vec<u16> = events
        .iter()
        .filter_map(|e| match e {
            ScanEvent::PortOpen { port, .. } => Some(*port),
            _ => None,
        })
        .collect();
    ports.sort_unstable();
    ports
}

/// Scans loopback through the real connect probe and expects exactly the
/// listening ports to be reported.
#[tokio::test]
async fn loopback_scan_reports_only_listening_ports() {
    let (_l1, open1) = open_listener().await;
    let (_l2, open2) = open_listener().await;
    let (_l3, open3) = open_listener().await;
    let closed1 = closed_port().await;
    let closed2 = closed_port().await;

    let probe = RemappedProbe::new(vec![open1, closed1, open2, closed2, open3]);
    let scanner = Scanner::with_prober(ScanConfig::default(), probe).unwrap();
    let sink = EventSink::new(Vec::new());

    let summaries = scanner.run_scan(&["127.0.0.1"], 5, &sink).await.unwrap();

    let events = sink.into_inner().unwrap();
    assert_eq!(open_ports(&events), vec![1, 3, 5]);

    let summary = &summaries[0];
    assert_eq!(summary.target, Target::new(Ipv4Addr::LOCALHOST));
    assert_eq!(summary.status, TargetStatus::Completed);
    assert_eq!(summary.ports_probed, 5);
    assert_eq!(summary.closed_or_filtered, 2);
    assert_eq!(summary.errors, 0);
    assert_eq!(scanner.prober().calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn invalid_target_means_no_network_activity() {
    let (_listener, open) = open_listener().await;
    let probe = RemappedProbe::new(vec![open]);
    let scanner = Scanner::with_prober(ScanConfig::default(), probe).unwrap();
    let sink = EventSink::new(Vec::new());

    let result = scanner
        .run_scan(&["127.0.0.1", "999.1.1.1", "not-an-ip"], 1, &sink)
        .await;

    match result {
        Err(ScanError::Validation { invalid }) => {
            assert_eq!(invalid, vec!["999.1.1.1", "not-an-ip"]);
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
    assert!(sink.into_inner().unwrap().is_empty());
    assert_eq!(scanner.prober().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn event_stream_is_framed_per_target() {
    let (_listener, open) = open_listener().await;
    let probe = RemappedProbe::new(vec![open, open]);
    let scanner = Scanner::with_prober(ScanConfig::default(), probe).unwrap();
    let sink = EventSink::new(Vec::new());

    scanner
        .run_scan(&["127.0.0.1", "127.0.0.1"], 2, &sink)
        .await
        .unwrap();

    let events = sink.into_inner().unwrap();
    assert!(matches!(events.first(), Some(ScanEvent::RunStarted { targets }) if targets.len() == 2));

    let starts = events.iter().filter(|e| matches!(e, ScanEvent::ScanStarted { .. })).count();
    let summaries = events.iter().filter(|e| matches!(e, ScanEvent::ScanSummary(_))).count();
    assert_eq!((starts, summaries), (2, 2));
    assert!(matches!(events.last(), Some(ScanEvent::ScanSummary(_))));
}

#[tokio::test]
async fn stop_signal_cancels_a_running_scan() {
    let (_listener, open) = open_listener().await;
    let probe = RemappedProbe::new(vec![open; 5000]);
    let cfg = ScanConfig {
        worker_count: 2,
        probe_timeout: Duration::from_millis(500),
    };
    let scanner = Scanner::with_prober(cfg, probe).unwrap();
    let stop = scanner.stop_signal();
    let sink = EventSink::new(Vec::new());

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        stop.trigger();
    });

    let summaries = scanner.run_scan(&["127.0.0.1"], 5000, &sink).await.unwrap();

    assert_eq!(summaries[0].status, TargetStatus::Cancelled);
    assert!(summaries[0].ports_probed < 5000);
}

/// Full-range scan of real loopback ports; slow, so opt-in.
#[tokio::test]
#[ignore]
async fn full_loopback_scan_finds_listener() {
    let (_listener, port) = open_listener().await;
    let cfg = ScanConfig {
        worker_count: 256,
        ..ScanConfig::default()
    };
    let scanner = Scanner::new(cfg).unwrap();
    let sink = EventSink::new(Vec::new());

    let summaries = scanner
        .run_scan(&["127.0.0.1"], u32::from(port), &sink)
        .await
        .unwrap();

    assert!(summaries[0].open_ports.contains(&port));
    assert!(open_ports(&sink.into_inner().unwrap()).contains(&port));
    assert_eq!(scanner.config().worker_count, 256);
}
