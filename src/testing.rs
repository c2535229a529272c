//! Deterministic test doubles for the system under test
//!
//! [`MockEndpoint`] binds a loopback listener and serves canned HTTP/1.1
//! responses with a configurable per-route service delay and status, plus
//! transport-failure injection by request ordinal. Each connection is served
//! on its own thread and closed after a single response, so concurrent
//! requests observe the configured delay independently, the same shape a
//! worker pool sees from a real endpoint.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Canned behavior for one route of the mock system under test
#[derive(Debug, Clone)]
pub struct MockRoute {
    /// Request path this route answers
    pub path: String,
    /// Artificial service delay before the response is written
    pub delay: Duration,
    /// HTTP status code to answer with
    pub status: u16,
}

impl MockRoute {
    /// Immediate 200 route
    #[must_use]
    pub fn ok(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            delay: Duration::ZERO,
            status: 200,
        }
    }

    /// 200 route with a fixed service delay
    #[must_use]
    pub fn with_delay(path: impl Into<String>, delay: Duration) -> Self {
        Self {
            path: path.into(),
            delay,
            status: 200,
        }
    }

    /// Route answering a fixed status without delay
    #[must_use]
    pub fn with_status(path: impl Into<String>, status: u16) -> Self {
        Self {
            path: path.into(),
            delay: Duration::ZERO,
            status,
        }
    }
}

/// In-process HTTP server double with deterministic behavior
pub struct MockEndpoint {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    shutdown: Arc<AtomicBool>,
    acceptor: Option<JoinHandle<()>>,
}

impl MockEndpoint {
    /// Spawn a mock serving `routes`
    ///
    /// Requests whose 1-based accept ordinal appears in `drop_ordinals` are
    /// read and then closed without a response, which the client observes as
    /// a transport-level failure. Unrouted paths answer 200 with no delay.
    ///
    /// # Panics
    /// Panics if no loopback port can be bound.
    #[must_use]
    pub fn spawn(routes: Vec<MockRoute>, drop_ordinals: Vec<usize>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock endpoint");
        let addr = listener.local_addr().expect("mock endpoint local addr");
        let hits = Arc::new(AtomicUsize::new(0));
        let shutdown = Arc::new(AtomicBool::new(false));

        let acceptor = {
            let hits = Arc::clone(&hits);
            let shutdown = Arc::clone(&shutdown);
            thread::spawn(move || accept_loop(&listener, &routes, &drop_ordinals, &hits, &shutdown))
        };

        Self {
            addr,
            hits,
            shutdown,
            acceptor: Some(acceptor),
        }
    }

    /// Base URL of the mock (no trailing slash)
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Total requests accepted so far, dropped ones included
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockEndpoint {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // Wake the acceptor so it observes the flag.
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.acceptor.take() {
            let _ = handle.join();
        }
    }
}

fn accept_loop(
    listener: &TcpListener,
    routes: &[MockRoute],
    drop_ordinals: &[usize],
    hits: &Arc<AtomicUsize>,
    shutdown: &Arc<AtomicBool>,
) {
    for conn in listener.incoming() {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        let Ok(stream) = conn else { continue };
        let ordinal = hits.fetch_add(1, Ordering::SeqCst) + 1;
        let drop_response = drop_ordinals.contains(&ordinal);
        let routes = routes.to_vec();
        thread::spawn(move || serve_connection(stream, &routes, drop_response));
    }
}

fn serve_connection(mut stream: TcpStream, routes: &[MockRoute], drop_response: bool) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let Some(path) = read_request_path(&mut stream) else {
        return;
    };
    if drop_response {
        // Closing without a response simulates a mid-flight transport failure.
        return;
    }

    let (status, delay) = routes
        .iter()
        .find(|r| r.path == path)
        .map_or((200, Duration::ZERO), |r| (r.status, r.delay));

    if !delay.is_zero() {
        thread::sleep(delay);
    }

    let body = "[]";
    let reason = if (200..300).contains(&status) { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
}

/// Read request headers and return the path from the request line
fn read_request_path(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::with_capacity(512);
    let mut chunk = [0u8; 512];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    let request_line = std::str::from_utf8(&buf).ok()?.lines().next()?.to_string();
    request_line.split_whitespace().nth(1).map(String::from)
}
