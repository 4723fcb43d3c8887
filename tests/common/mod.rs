#![allow(dead_code)]

use std::io::{ErrorKind, Read};
use std::net::{SocketAddr, TcpListener};
use std::sync::mpsc::{self, Receiver};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use alveo_client::{RequestEvent, RequestSink};

pub const API_KEY: &str = "test-api-key-1234";

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).expect("read fixture")
}

/// An address that refuses connections.
pub fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr
}

/// A server that accepts one connection and never answers.
pub fn hung_server(hold_for: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(hold_for);
            drop(stream);
        }
    });
    addr
}

/// A server that reads one request head, never answers, and reports when
/// the client closes the connection.
///
/// The receiver yields `Some(instant)` once the client side is closed, or
/// `None` if it stayed open for `hold_for`.
pub fn eof_watching_server(hold_for: Duration) -> (SocketAddr, Receiver<Option<Instant>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        stream.set_read_timeout(Some(hold_for)).expect("read timeout");

        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        let closed_at = loop {
            match stream.read(&mut buf) {
                Ok(0) => break Some(Instant::now()),
                Ok(n) => head.extend_from_slice(&buf[..n]),
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    break None
                }
                Err(_) => break Some(Instant::now()),
            }
        };
        assert!(
            closed_at.is_none() || head.windows(4).any(|w| w == b"\r\n\r\n"),
            "connection closed before the request head arrived"
        );
        let _ = tx.send(closed_at);
    });
    (addr, rx)
}

/// Records a one-line summary of every event.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<String> {
        self.events.lock().expect("sink lock").clone()
    }
}

impl RequestSink for RecordingSink {
    fn record(&self, event: &RequestEvent<'_>) {
        let line = match event {
            RequestEvent::Started { url, api_key } => format!("started {url} {api_key}"),
            RequestEvent::Completed {
                url,
                status,
                bytes_read,
                ..
            } => format!("completed {url} {status} {bytes_read}"),
            RequestEvent::Failed { url, .. } => format!("failed {url}"),
        };
        self.events.lock().expect("sink lock").push(line);
    }
}
