// LogFeed - app/transport.rs
//
// Transport capability traits and the production WebSocket implementation.
//
// The feed worker is written against `FeedTransport`/`FeedConnection`
// rather than a concrete socket type so the reconnect loop can be unit
// tested by injecting a fake transport that emits synthetic frames.
//
// The client is receive-only: it never sends application frames. The
// tungstenite layer still answers protocol pings automatically on read.

use crate::util::constants::FEED_READ_TIMEOUT_MS;
use crate::util::error::TransportError;
use std::net::TcpStream;
use std::time::Duration;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

// =============================================================================
// Capability traits
// =============================================================================

/// One read outcome from a live connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A complete UTF-8 text frame.
    Text(String),

    /// Nothing deliverable this tick: a read timeout, or a non-text frame
    /// (binary, ping, pong). The caller uses these ticks to check its
    /// cancel flag.
    Idle,
}

/// A live connection to the log stream.
pub trait FeedConnection: Send {
    /// Read the next frame.
    ///
    /// `Err(TransportError::Closed)` signals that the connection has ended
    /// for any reason; the connection handle must then be discarded and
    /// replaced wholesale by a fresh `connect()`.
    fn next_frame(&mut self) -> Result<Frame, TransportError>;
}

impl std::fmt::Debug for dyn FeedConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FeedConnection")
    }
}

/// A factory for connections to a fixed endpoint.
///
/// `connect()` is called once per attempt; a failed establish surfaces as
/// `Err` and is handled identically to a closure of a live connection.
pub trait FeedTransport: Send {
    fn connect(&mut self) -> Result<Box<dyn FeedConnection>, TransportError>;

    /// Endpoint description for logging and the status bar.
    fn endpoint(&self) -> &str;
}

// =============================================================================
// WebSocket transport (production implementation)
// =============================================================================

/// Blocking tungstenite client for `ws://` and `wss://` endpoints.
#[derive(Debug)]
pub struct WsTransport {
    url: String,
}

impl WsTransport {
    /// Create a transport for the given endpoint URL.
    ///
    /// The URL is validated for scheme up front so a typo fails loudly at
    /// startup instead of producing an endless silent retry loop.
    pub fn new(url: &str) -> Result<Self, TransportError> {
        if !url.starts_with("ws://") && !url.starts_with("wss://") {
            return Err(TransportError::InvalidEndpoint {
                url: url.to_string(),
                reason: "expected a ws:// or wss:// URL".to_string(),
            });
        }
        Ok(Self {
            url: url.to_string(),
        })
    }
}

impl FeedTransport for WsTransport {
    fn connect(&mut self) -> Result<Box<dyn FeedConnection>, TransportError> {
        let (socket, response) =
            tungstenite::connect(self.url.as_str()).map_err(|e| TransportError::Connect {
                url: self.url.clone(),
                source: Box::new(e),
            })?;

        tracing::debug!(
            url = %self.url,
            status = %response.status(),
            "WebSocket handshake completed"
        );

        // A read timeout makes the blocking read return periodically so the
        // worker thread can observe its cancel flag between frames.
        let tcp = match socket.get_ref() {
            MaybeTlsStream::Plain(stream) => Some(stream),
            MaybeTlsStream::Rustls(stream) => Some(&stream.sock),
            _ => None,
        };
        if let Some(stream) = tcp {
            if let Err(e) =
                stream.set_read_timeout(Some(Duration::from_millis(FEED_READ_TIMEOUT_MS)))
            {
                tracing::warn!(error = %e, "Could not set socket read timeout");
            }
        }

        Ok(Box::new(WsConnection { socket }))
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

/// A live tungstenite connection.
struct WsConnection {
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
}

impl FeedConnection for WsConnection {
    fn next_frame(&mut self) -> Result<Frame, TransportError> {
        match self.socket.read() {
            Ok(Message::Text(text)) => Ok(Frame::Text(text.to_string())),

            // Binary frames are outside the contract; control frames are
            // handled by tungstenite. All are idle ticks to the caller.
            Ok(Message::Binary(_))
            | Ok(Message::Ping(_))
            | Ok(Message::Pong(_))
            | Ok(Message::Frame(_)) => Ok(Frame::Idle),

            Ok(Message::Close(frame)) => Err(TransportError::Closed {
                reason: match frame {
                    Some(f) => format!("server close: {}", f.reason),
                    None => "server close".to_string(),
                },
            }),

            // Read timeout from the socket deadline: nothing arrived.
            Err(tungstenite::Error::Io(e))
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut =>
            {
                Ok(Frame::Idle)
            }

            Err(e) => Err(TransportError::Closed {
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_websocket_scheme() {
        let err = WsTransport::new("http://localhost:8000/ws").unwrap_err();
        assert!(matches!(err, TransportError::InvalidEndpoint { .. }));
    }

    #[test]
    fn accepts_ws_and_wss_schemes() {
        assert!(WsTransport::new("ws://localhost:8000/ws").is_ok());
        assert!(WsTransport::new("wss://example.com/ws").is_ok());
    }

    #[test]
    fn endpoint_reports_the_configured_url() {
        let t = WsTransport::new("ws://localhost:8000/ws").unwrap();
        assert_eq!(t.endpoint(), "ws://localhost:8000/ws");
    }

    #[test]
    fn wss_connect_reaches_the_network_layer() {
        // Port 1 refuses immediately. With TLS compiled in, the failure is
        // a socket error; a missing-TLS build would instead fail with a
        // "TLS support not compiled in" URL error before any I/O happens.
        let mut t = WsTransport::new("wss://127.0.0.1:1/ws").unwrap();
        let err = t.connect().unwrap_err();
        assert!(matches!(err, TransportError::Connect { .. }));
        assert!(
            !err.to_string().contains("TLS support not compiled in"),
            "wss endpoints must be connectable: {err}"
        );
    }
}
