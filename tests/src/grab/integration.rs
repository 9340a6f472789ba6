#![cfg(test)]
use std::str::FromStr;
use std::time::{Duration, Instant};

use bannergrab_common::banner::{BannerResult, Termination};
use bannergrab_common::config::ProbeConfig;
use bannergrab_common::network::target::Target;
use bannergrab_core::scanner;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::util::{answer_http, closed_port, spawn_listener, speak_first_then_idle};

fn targets(raw: &[String]) -> Vec<Target> {
    raw.iter().map(|s| Target::from_str(s).unwrap()).collect()
}

/// A target whose port cannot be dialed fails on its own, quickly.
#[tokio::test]
async fn unusable_port_reports_error_within_timeout() {
    let list = targets(&["127.0.0.1:7\u{200b}".to_string()]);
    let config = ProbeConfig::new("http")
        .with_timeout(Duration::from_secs(1))
        .with_concurrency(1);

    let started = Instant::now();
    let results: Vec<BannerResult> = scanner::run(&list, &config).await;

    assert!(started.elapsed() < Duration::from_millis(1500));
    assert_eq!(results.len(), 1);
    assert!(results[0].banner.is_empty());
    assert!(!results[0].error_text().is_empty());
}

#[tokio::test]
async fn refused_connection_reports_error_and_empty_banner() {
    let port = closed_port().await;
    let list = targets(&[format!("127.0.0.1:{port}")]);
    let config = ProbeConfig::new("ssh").with_timeout(Duration::from_secs(2));

    let results = scanner::run(&list, &config).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].banner.is_empty());
    assert!(results[0].is_error());
    assert_eq!(results[0].port, port.to_string());
}

#[tokio::test]
async fn http_service_is_read_up_to_header_terminator() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
    let port = spawn_listener(move |socket| {
        let tx = tx.clone();
        async move {
            let request =
                answer_http(socket, b"HTTP/1.1 200 OK\r\nServer: test-httpd\r\n\r\n<html>").await;
            let _ = tx.send(request);
        }
    })
    .await;

    let list = targets(&["127.0.0.1".to_string()]);
    let config = ProbeConfig::new("http")
        .with_port(Some(port.to_string()))
        .with_timeout(Duration::from_secs(5));

    let started = Instant::now();
    let results = scanner::run(&list, &config).await;

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(results[0].error, None);
    assert!(results[0].banner.starts_with("HTTP/1.1 200 OK\r\nServer: test-httpd\r\n\r\n"));
    assert_eq!(results[0].termination, Some(Termination::HeaderTerminator));
    assert_eq!(
        rx.recv().await.unwrap(),
        b"GET / HTTP/1.1\r\nHost: 127.0.0.1\r\n\r\n".to_vec()
    );
}

#[tokio::test]
async fn server_first_service_is_captured_until_deadline() {
    let port = spawn_listener(|socket| speak_first_then_idle(socket, b"SSH-2.0-OpenSSH_9.6\r\n")).await;

    let list = targets(&[format!("127.0.0.1:{port}")]);
    let timeout = Duration::from_millis(500);
    let config = ProbeConfig::new("ssh").with_timeout(timeout);

    let started = Instant::now();
    let results = scanner::run(&list, &config).await;
    let elapsed = started.elapsed();

    assert!(elapsed >= timeout);
    assert!(elapsed < timeout + Duration::from_millis(750));
    assert_eq!(results[0].banner, "SSH-2.0-OpenSSH_9.6\r\n");
    assert_eq!(results[0].error, None);
    assert_eq!(results[0].termination, Some(Termination::Deadline));
}

#[tokio::test]
async fn mixed_targets_keep_input_order() {
    let slow = spawn_listener(|mut socket| async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        let _ = socket.write_all(b"220 slow ftp\r\n").await;
    })
    .await;
    let fast = spawn_listener(|socket| speak_first_then_idle(socket, b"220 fast smtp\r\n\r\n")).await;
    let refused = closed_port().await;

    let list = targets(&[
        format!("127.0.0.1:{slow}"),
        format!("127.0.0.1:{refused}"),
        format!("127.0.0.1:{fast}"),
    ]);
    let config = ProbeConfig::new("telnet")
        .with_timeout(Duration::from_secs(3))
        .with_concurrency(4);

    let results = scanner::run(&list, &config).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].port, slow.to_string());
    assert_eq!(results[0].banner, "220 slow ftp\r\n");
    assert_eq!(results[0].termination, Some(Termination::PeerClosed));
    assert_eq!(results[1].port, refused.to_string());
    assert!(results[1].is_error());
    assert_eq!(results[2].port, fast.to_string());
    assert_eq!(results[2].banner, "220 fast smtp\r\n\r\n");
}

#[tokio::test]
async fn tls_handshake_failure_is_a_connect_error() {
    let port = spawn_listener(|socket| speak_first_then_idle(socket, b"SSH-2.0-not-tls\r\n")).await;

    let list = targets(&[format!("127.0.0.1:{port}")]);
    let config = ProbeConfig::new("https").with_timeout(Duration::from_secs(2));
    let results = scanner::run(&list, &config).await;

    // https defaults to 443, the embedded port still wins
    assert_eq!(results[0].port, port.to_string());
    assert!(results[0].banner.is_empty());
    assert!(results[0].error_text().contains("tls handshake"));
}

#[tokio::test]
async fn single_slot_pool_still_completes_every_target() {
    let port = spawn_listener(|socket| speak_first_then_idle(socket, b"+OK pop3\r\n")).await;

    let raw: Vec<String> = (0..5).map(|_| format!("127.0.0.1:{port}")).collect();
    let config = ProbeConfig::new("custom")
        .with_timeout(Duration::from_millis(200))
        .with_concurrency(1);

    let started = Instant::now();
    let results = scanner::run(&targets(&raw), &config).await;

    // Serialized: each grab waits out its own deadline.
    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|r| r.banner == "+OK pop3\r\n"));
}
