// LogFeed - app/feed.rs
//
// The live feed: owns the connection to the monitoring backend and streams
// received log batches to the UI in real time.
//
// Architecture:
//   - `FeedManager` lives on the UI thread; `run_feed_worker` runs on a
//     background thread owning the connection.
//   - An `Arc<AtomicBool>` cancel flag allows the UI to stop the feed.
//   - Progress is sent as `FeedProgress` messages over an mpsc channel.
//   - The UI thread polls the channel each frame.
//
// Connection state machine (two states, no terminal state):
//   DISCONNECTED --connect()--> CONNECTED   (optimistic; a failed establish
//                                            is an immediate closure)
//   CONNECTED --frame--> CONNECTED          (self-loop; "logs" envelopes
//                                            become Batch messages)
//   CONNECTED --closure--> DISCONNECTED     (one reconnect scheduled after
//                                            the fixed delay)
// Reconnect policy: retry forever on a fixed interval. No backoff, no
// jitter, no retry cap. At most one live connection exists at a time: a
// replacement is created only after the previous one signalled closure.
//
// Failure handling:
//   - Connect failures and closures are uniform: logged, reported as
//     Disconnected, retried after the delay.
//   - An undecodable text frame is dropped (FrameDropped) and the
//     connection continues; one bad message never ends the stream.
//   - Stop: the cancel flag is observed within FEED_CANCEL_CHECK_INTERVAL_MS
//     both on idle read ticks and inside the reconnect sleep, so a pending
//     reconnect is cancellable.

use crate::app::transport::{FeedTransport, Frame};
use crate::core::envelope::{self, Decoded};
use crate::core::model::FeedProgress;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use crate::util::constants::FEED_CANCEL_CHECK_INTERVAL_MS;

// =============================================================================
// FeedManager
// =============================================================================

/// Manages the live feed worker on a background thread.
///
/// The manager lives on the UI thread and exposes a simple
/// start/stop/poll interface. Constructing a manager performs no I/O:
/// no connection is attempted until `start_feed` is called, so a host
/// without a feed surface never opens a socket.
pub struct FeedManager {
    /// Channel receiver for the UI to poll feed progress messages.
    pub progress_rx: Option<mpsc::Receiver<FeedProgress>>,
    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
    /// Handle of the background thread, joined on stop.
    worker: Option<std::thread::JoinHandle<()>>,
}

impl FeedManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
            worker: None,
        }
    }

    /// Start the feed worker against the given transport.
    ///
    /// Spawns the background thread immediately. If a feed is already
    /// running it is stopped first, preserving the single-connection
    /// invariant.
    pub fn start_feed(&mut self, transport: Box<dyn FeedTransport>, reconnect_delay: Duration) {
        self.stop_feed();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        let endpoint = transport.endpoint().to_string();
        self.worker = Some(std::thread::spawn(move || {
            run_feed_worker(transport, reconnect_delay, tx, cancel);
        }));

        tracing::info!(endpoint = %endpoint, "Live feed started");
    }

    /// Stop the background worker and wait for it to exit.
    ///
    /// The worker observes the flag within `FEED_CANCEL_CHECK_INTERVAL_MS`
    /// (including out of a pending reconnect sleep) and is joined before
    /// this returns, so a restart can never overlap the dying connection
    /// with its replacement.
    pub fn stop_feed(&mut self) {
        if let Some(flag) = self.cancel_flag.take() {
            flag.store(true, Ordering::SeqCst);
        }
        // Dropping the receiver also fails the worker's next send, which
        // ends it even mid-read.
        self.progress_rx = None;
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::error!("Feed worker thread panicked");
            }
        }
    }

    /// Returns `true` if a feed background thread is currently active.
    pub fn is_active(&self) -> bool {
        self.cancel_flag.is_some()
    }

    /// Poll for pending progress messages without blocking.
    ///
    /// Drains at most `max` queued messages; the remainder stay in the
    /// channel for subsequent frames so a burst cannot stall the render
    /// loop.
    pub fn poll_progress(&self, max: usize) -> Vec<FeedProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while messages.len() < max {
                match rx.try_recv() {
                    Ok(msg) => messages.push(msg),
                    Err(_) => break,
                }
            }
        }
        messages
    }
}

impl Default for FeedManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background feed worker
// =============================================================================

/// Background connection loop. Connects, streams frames, and on any
/// closure schedules exactly one reconnect after `reconnect_delay`.
pub fn run_feed_worker(
    mut transport: Box<dyn FeedTransport>,
    reconnect_delay: Duration,
    tx: mpsc::Sender<FeedProgress>,
    cancel: Arc<AtomicBool>,
) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                // UI channel closed; exit silently.
                return;
            }
        };
    }

    loop {
        if cancel.load(Ordering::SeqCst) {
            send!(FeedProgress::Stopped);
            return;
        }

        match transport.connect() {
            Ok(mut conn) => {
                tracing::info!(endpoint = transport.endpoint(), "Feed connected");
                send!(FeedProgress::Connected);

                // ---------------------------------------------------------
                // CONNECTED: stream frames until closure or cancellation.
                // ---------------------------------------------------------
                let reason = loop {
                    if cancel.load(Ordering::SeqCst) {
                        send!(FeedProgress::Stopped);
                        return;
                    }

                    match conn.next_frame() {
                        Ok(Frame::Idle) => continue,

                        Ok(Frame::Text(text)) => match envelope::decode_frame(&text) {
                            Ok(Decoded::Logs(records)) => {
                                if records.is_empty() {
                                    continue;
                                }
                                tracing::debug!(count = records.len(), "Feed: new batch");
                                send!(FeedProgress::Batch { records });
                            }
                            Ok(Decoded::Ignored { kind }) => {
                                tracing::trace!(kind = %kind, "Feed: ignoring envelope type");
                            }
                            Err(e) => {
                                // Drop the single frame; the stream continues.
                                tracing::warn!(error = %e, "Feed: dropping undecodable frame");
                                send!(FeedProgress::FrameDropped {
                                    reason: e.to_string(),
                                });
                            }
                        },

                        Err(e) => break e.to_string(),
                    }
                };

                tracing::info!(reason = %reason, "Feed: connection lost");
                send!(FeedProgress::Disconnected { reason });
            }

            Err(e) => {
                tracing::warn!(error = %e, "Feed: connect attempt failed");
                send!(FeedProgress::Disconnected {
                    reason: e.to_string(),
                });
            }
        }

        // -----------------------------------------------------------------
        // DISCONNECTED: fixed-delay wait, interruptible by cancel.
        // -----------------------------------------------------------------
        if !sleep_unless_cancelled(reconnect_delay, &cancel) {
            send!(FeedProgress::Stopped);
            return;
        }
    }
}

/// Sleep for `total`, waking every `FEED_CANCEL_CHECK_INTERVAL_MS` to check
/// the cancel flag. Returns `false` if cancellation was observed.
fn sleep_unless_cancelled(total: Duration, cancel: &AtomicBool) -> bool {
    let slice = Duration::from_millis(FEED_CANCEL_CHECK_INTERVAL_MS);
    let mut remaining = total;
    while remaining > Duration::ZERO {
        let step = remaining.min(slice);
        std::thread::sleep(step);
        if cancel.load(Ordering::SeqCst) {
            return false;
        }
        remaining = remaining.saturating_sub(step);
    }
    true
}

// =============================================================================
// Tests (fake transports exercise the reconnect state machine)
// =============================================================================
