//! Loopback HTTP server shared by integration tests.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Serve the canned `(status line, body)` responses, one connection each, in order.
///
/// The receiver yields the head of every request served.
pub fn serve(responses: Vec<(&'static str, &'static str)>) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status_line, body) in responses {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut head = String::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).expect("read request") == 0 || line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().ok();
            tx.send(head).ok();
        }
    });

    (format!("http://{addr}"), rx)
}

/// Serve a single canned response.
pub fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    serve(vec![(status_line, body)])
}

pub fn request_head(rx: &mpsc::Receiver<String>) -> String {
    rx.recv_timeout(Duration::from_secs(5)).expect("request head")
}

/// A loopback URL with nothing listening on it.
pub fn dead_host() -> String {
    let port = TcpListener::bind("127.0.0.1:0")
        .expect("bind loopback")
        .local_addr()
        .expect("local addr")
        .port();
    format!("http://127.0.0.1:{port}")
}
