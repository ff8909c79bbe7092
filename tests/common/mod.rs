#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

pub const TIMEOUT: Option<Duration> = Some(Duration::from_secs(5));

/// Serves each canned `(status, body)` to one connection in order and
/// forwards the raw request head (lowercased) to the returned receiver.
pub fn serve(responses: Vec<(u16, String)>) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in responses {
            let (mut stream, _) = match listener.accept() {
                Ok(conn) => conn,
                Err(_) => return,
            };
            let head = read_head(&stream);
            let _ = tx.send(head.to_lowercase());
            let reason = if status == 200 { "OK" } else { "Error" };
            let _ = write!(
                stream,
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.flush();
        }
    });

    (format!("http://{addr}/"), rx)
}

fn read_head(stream: &TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut head = String::new();
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                if line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }
        }
    }
    head
}

/// Value of header `name` in a lowercased request head.
pub fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        (k.trim() == name).then(|| v.trim())
    })
}

/// Request target from the first line, e.g. `/path?a=1`.
pub fn target(head: &str) -> &str {
    head.lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("")
}

pub fn ok(data: &str) -> (u16, String) {
    (200, format!(r#"{{"retcode":0,"message":"OK","data":{data}}}"#))
}

pub fn fail(retcode: i64, message: &str) -> (u16, String) {
    (
        200,
        format!(r#"{{"retcode":{retcode},"message":"{message}","data":null}}"#),
    )
}
