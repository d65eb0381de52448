use std::io::{Read, Write};
use std::net;
use std::thread;

pub const RESPONSE: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nX-Raw: \xff\xfe\r\n\r\nhello\r\nworld\x00";

/// Accepts one connection, returns the request head it received and answers
/// with `response` before closing.
pub fn serve_one(response: &'static [u8]) -> (u16, thread::JoinHandle<String>) {
    let listener = net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut head: Vec<u8> = Vec::new();
        let mut buf = [0u8; 256];
        while !head.ends_with(b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            assert!(n > 0, "client closed before finishing the request");
            head.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response).unwrap();
        String::from_utf8(head).unwrap()
    });
    (port, handle)
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
