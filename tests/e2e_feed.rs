// LogFeed - tests/e2e_feed.rs
//
// End-to-end tests for the live feed pipeline.
//
// These tests run a real WebSocket server (std TcpListener + tungstenite
// accept) on a background thread and drive the real transport, real
// envelope decoding, and the real reconnect loop, with no mocks or stubs.
// This exercises the full path from a text frame on the wire to rows in
// the feed table.

use logfeed::app::feed::FeedManager;
use logfeed::app::transport::WsTransport;
use logfeed::core::model::FeedProgress;
use logfeed::core::table::FeedTable;
use std::net::TcpListener;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tungstenite::Message;

// =============================================================================
// Helpers
// =============================================================================

/// A scripted frame for the test server to deliver on one connection.
enum Serve {
    /// Send a text frame.
    Text(&'static str),
    /// Pause before the next action (lets the client drain in order).
    Pause(u64),
}

/// Start a WebSocket server that accepts `connections.len()` connections in
/// sequence, plays each connection's script, then closes it. Returns the
/// endpoint URL.
fn spawn_server(connections: Vec<Vec<Serve>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");

    std::thread::spawn(move || {
        for script in connections {
            let Ok((stream, _)) = listener.accept() else {
                return;
            };
            let Ok(mut ws) = tungstenite::accept(stream) else {
                continue;
            };
            for action in script {
                match action {
                    Serve::Text(raw) => {
                        if ws.send(Message::text(raw)).is_err() {
                            break;
                        }
                    }
                    Serve::Pause(ms) => std::thread::sleep(Duration::from_millis(ms)),
                }
            }
            let _ = ws.close(None);
            // Drain the closing handshake so the close is clean.
            while ws.read().is_ok() {}
        }
    });

    format!("ws://{addr}/ws")
}

/// Collect progress messages until `stop_when` is satisfied or `deadline`
/// elapses.
fn collect_until(
    rx: &mpsc::Receiver<FeedProgress>,
    deadline: Duration,
    stop_when: impl Fn(&[FeedProgress]) -> bool,
) -> Vec<FeedProgress> {
    let start = Instant::now();
    let mut seen = Vec::new();
    while start.elapsed() < deadline && !stop_when(&seen) {
        if let Ok(msg) = rx.recv_timeout(Duration::from_millis(50)) {
            seen.push(msg);
        }
    }
    seen
}

fn batches(seen: &[FeedProgress]) -> Vec<&Vec<logfeed::core::model::LogRecord>> {
    seen.iter()
        .filter_map(|m| match m {
            FeedProgress::Batch { records } => Some(records),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Feed E2E
// =============================================================================

/// A logs envelope on the wire becomes table rows with the right fields,
/// badge key, and default crew name.
#[test]
fn e2e_logs_envelope_becomes_table_rows() {
    let endpoint = spawn_server(vec![vec![
        Serve::Text(
            r#"{"type":"logs","data":[
                {"timestamp":"T1","level":"Error","message":"boom","crew_name":"Alpha"},
                {"timestamp":"T2","level":"Info","message":"fine"}
            ]}"#,
        ),
        Serve::Pause(200),
    ]]);

    let mut manager = FeedManager::new();
    manager.start_feed(
        Box::new(WsTransport::new(&endpoint).unwrap()),
        Duration::from_secs(60),
    );
    let rx = manager.progress_rx.take().unwrap();

    let seen = collect_until(&rx, Duration::from_secs(5), |msgs| {
        msgs.iter().any(|m| matches!(m, FeedProgress::Batch { .. }))
    });
    manager.stop_feed();

    let got = batches(&seen);
    assert_eq!(got.len(), 1, "messages seen: {seen:?}");

    let mut table = FeedTable::new(None);
    table.prepend_batch(got[0].clone());

    assert_eq!(table.len(), 2);
    let first = &table.rows()[0];
    assert_eq!(first.record.timestamp, "T1");
    assert_eq!(first.record.level, "Error");
    assert_eq!(first.record.badge_key(), "error");
    assert_eq!(first.record.message, "boom");
    assert_eq!(first.record.crew_display(), "Alpha");

    let second = &table.rows()[1];
    assert_eq!(second.record.crew_display(), "system");
}

/// Two sequential single-record envelopes stack most-recent-first.
#[test]
fn e2e_sequential_batches_prepend_newest_first() {
    let endpoint = spawn_server(vec![vec![
        Serve::Text(r#"{"type":"logs","data":[{"timestamp":"T1","level":"Info","message":"R1"}]}"#),
        Serve::Pause(50),
        Serve::Text(r#"{"type":"logs","data":[{"timestamp":"T2","level":"Info","message":"R2"}]}"#),
        Serve::Pause(200),
    ]]);

    let mut manager = FeedManager::new();
    manager.start_feed(
        Box::new(WsTransport::new(&endpoint).unwrap()),
        Duration::from_secs(60),
    );
    let rx = manager.progress_rx.take().unwrap();

    let seen = collect_until(&rx, Duration::from_secs(5), |msgs| {
        msgs.iter()
            .filter(|m| matches!(m, FeedProgress::Batch { .. }))
            .count()
            >= 2
    });
    manager.stop_feed();

    let mut table = FeedTable::new(None);
    for batch in batches(&seen) {
        table.prepend_batch(batch.clone());
    }

    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0].record.message, "R2");
    assert_eq!(table.rows()[1].record.message, "R1");
}

/// A non-log envelope is ignored without mutating the table, and a
/// malformed frame is dropped without ending the connection.
#[test]
fn e2e_ignored_and_malformed_frames_do_not_break_the_stream() {
    let endpoint = spawn_server(vec![vec![
        Serve::Text(r#"{"type":"ping","data":{}}"#),
        Serve::Text("{definitely not json"),
        Serve::Text(
            r#"{"type":"logs","data":[{"timestamp":"T","level":"Info","message":"survivor"}]}"#,
        ),
        Serve::Pause(200),
    ]]);

    let mut manager = FeedManager::new();
    manager.start_feed(
        Box::new(WsTransport::new(&endpoint).unwrap()),
        Duration::from_secs(60),
    );
    let rx = manager.progress_rx.take().unwrap();

    let seen = collect_until(&rx, Duration::from_secs(5), |msgs| {
        msgs.iter().any(|m| matches!(m, FeedProgress::Batch { .. }))
    });
    manager.stop_feed();

    // The ping envelope is invisible; the malformed frame surfaces as one
    // FrameDropped; the stream continues to the surviving batch.
    let dropped = seen
        .iter()
        .filter(|m| matches!(m, FeedProgress::FrameDropped { .. }))
        .count();
    assert_eq!(dropped, 1, "messages seen: {seen:?}");

    let got = batches(&seen);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0][0].message, "survivor");
}

/// When the server closes, the client reconnects after the fixed delay and
/// keeps receiving; rows from both connections accumulate.
#[test]
fn e2e_reconnects_after_server_close() {
    let endpoint = spawn_server(vec![
        vec![
            Serve::Text(
                r#"{"type":"logs","data":[{"timestamp":"T1","level":"Info","message":"before"}]}"#,
            ),
            Serve::Pause(100),
        ],
        vec![
            Serve::Text(
                r#"{"type":"logs","data":[{"timestamp":"T2","level":"Info","message":"after"}]}"#,
            ),
            Serve::Pause(100),
        ],
    ]);

    let mut manager = FeedManager::new();
    manager.start_feed(
        Box::new(WsTransport::new(&endpoint).unwrap()),
        Duration::from_millis(200),
    );
    let rx = manager.progress_rx.take().unwrap();

    let seen = collect_until(&rx, Duration::from_secs(10), |msgs| {
        msgs.iter()
            .filter(|m| matches!(m, FeedProgress::Batch { .. }))
            .count()
            >= 2
    });
    manager.stop_feed();

    // Connected, batch, disconnected, connected again, batch.
    let connects = seen
        .iter()
        .filter(|m| matches!(m, FeedProgress::Connected))
        .count();
    assert!(connects >= 2, "expected a reconnect; saw: {seen:?}");
    assert!(seen
        .iter()
        .any(|m| matches!(m, FeedProgress::Disconnected { .. })));

    let mut table = FeedTable::new(None);
    for batch in batches(&seen) {
        table.prepend_batch(batch.clone());
    }
    assert_eq!(table.rows()[0].record.message, "after");
    assert_eq!(table.rows()[1].record.message, "before");
}

/// While no server is listening, the client keeps retrying and never gives
/// up; stopping the feed ends the retry loop promptly.
#[test]
fn e2e_retries_against_a_dead_endpoint_until_stopped() {
    // Bind and immediately drop so the port is very likely unoccupied.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let endpoint = format!("ws://127.0.0.1:{port}/ws");

    let mut manager = FeedManager::new();
    manager.start_feed(
        Box::new(WsTransport::new(&endpoint).unwrap()),
        Duration::from_millis(50),
    );
    let rx = manager.progress_rx.take().unwrap();

    let seen = collect_until(&rx, Duration::from_secs(5), |msgs| {
        msgs.iter()
            .filter(|m| matches!(m, FeedProgress::Disconnected { .. }))
            .count()
            >= 4
    });

    let failures = seen
        .iter()
        .filter(|m| matches!(m, FeedProgress::Disconnected { .. }))
        .count();
    assert!(failures >= 4, "client gave up after {failures} attempts");
    assert!(!seen.iter().any(|m| matches!(m, FeedProgress::Connected)));

    manager.stop_feed();
    assert!(!manager.is_active());
}
