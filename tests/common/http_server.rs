//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves one static body for every GET, whatever the path. Options let a test
//! drop the Content-Length header, answer with an error status, stall before
//! answering, or cut the body short.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    pub status: u16,
    /// If false, no Content-Length is sent and the body ends at close.
    pub send_length: bool,
    /// Close the connection after this many body bytes.
    pub truncate_at: Option<usize>,
    /// Wait this long before answering.
    pub delay: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            status: 200,
            send_length: true,
            truncate_at: None,
            delay: Duration::ZERO,
        }
    }
}

/// Starts a server in a background thread serving `body`. Returns the base URL
/// without a trailing slash (e.g. "http://127.0.0.1:12345").
pub fn start(body: Vec<u8>) -> String {
    start_with_options(body, ServerOptions::default())
}

pub fn start_with_options(body: Vec<u8>, opts: ServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body, opts));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// A URL on a port nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/file.bin", port)
}

fn read_head(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return None,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8(buf).ok()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn handle(mut stream: TcpStream, body: &[u8], opts: ServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let head = match read_head(&mut stream) {
        Some(head) => head,
        None => return,
    };
    if !head.starts_with("GET ") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }
    if !opts.delay.is_zero() {
        thread::sleep(opts.delay);
    }

    let payload: &[u8] = if opts.status == 200 { body } else { b"error" };
    let mut response = format!(
        "HTTP/1.1 {} {}\r\nConnection: close\r\n",
        opts.status,
        reason(opts.status)
    );
    if opts.send_length {
        response.push_str(&format!("Content-Length: {}\r\n", payload.len()));
    }
    response.push_str("\r\n");
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }

    let sent = opts.truncate_at.unwrap_or(payload.len()).min(payload.len());
    for piece in payload[..sent].chunks(4096) {
        if stream.write_all(piece).is_err() {
            return;
        }
        let _ = stream.flush();
    }
    if opts.truncate_at.is_some() {
        // Let the client consume what was sent before the connection drops.
        thread::sleep(Duration::from_millis(100));
    }
    let _ = stream.shutdown(std::net::Shutdown::Both);
}
