//! HTTP/1.1 request heads as they are put on the wire.
//!
//! Responses are never parsed; the client passes them through byte for byte.
use crate::auth::encode_proxy_auth;
use crate::error::{Error, Result};
use crate::proxy::ProxySpec;
use crate::url::RequestTarget;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct HttpVersion {
    major: u32,
    minor: u32,
}

impl HttpVersion {
    fn new(major: u32, minor: u32) -> Self {
        HttpVersion { major, minor }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod http_version_tests {
    use super::HttpVersion;

    #[test]
    fn display() {
        assert_eq!(&HttpVersion::new(1, 1).to_string(), "HTTP/1.1");
        assert_eq!(&HttpVersion::new(1, 0).to_string(), "HTTP/1.0");
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HttpMethod {
    Get,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
struct HttpHeader {
    key: String,
    value: String,
}

impl HttpHeader {
    fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        HttpHeader {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for HttpHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}\r\n", self.key, self.value)
    }
}

/// Headers in the order they were added, which is the order they are sent in.
#[derive(Debug, PartialEq, Eq, Clone)]
struct HttpHeaders {
    headers: Vec<HttpHeader>,
}

impl HttpHeaders {
    fn new() -> Self {
        HttpHeaders {
            headers: Vec::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_str())
    }

    fn push<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.headers.push(HttpHeader::new(key, value));
    }

    fn iter(&self) -> impl Iterator<Item = &HttpHeader> {
        self.headers.iter()
    }
}

impl fmt::Display for HttpHeaders {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for header in &self.headers {
            write!(f, "{}", header)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod http_headers_tests {
    use super::HttpHeaders;

    #[test]
    fn to_string_keeps_insertion_order() {
        let mut headers = HttpHeaders::new();
        headers.push("c", "d");
        headers.push("a", "b");
        assert_eq!(&headers.to_string(), "c: d\r\na: b\r\n");
    }

    #[test]
    fn to_string_empty() {
        assert_eq!(&HttpHeaders::new().to_string(), "");
    }

    #[test]
    fn get_ignores_case() {
        let mut headers = HttpHeaders::new();
        headers.push("Host", "example.com");
        assert_eq!(headers.get("host"), Some("example.com"));
        assert_eq!(headers.get("Connection"), None);
    }
}

/// A request head ready to be written, one line per send.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct OutgoingRequest {
    method: HttpMethod,
    uri: String,
    version: HttpVersion,
    headers: HttpHeaders,
}

impl OutgoingRequest {
    fn new<S: Into<String>>(method: HttpMethod, uri: S) -> Self {
        OutgoingRequest {
            method,
            uri: uri.into(),
            version: HttpVersion::new(1, 1),
            headers: HttpHeaders::new(),
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// The request-target of the request line.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    pub fn request_line(&self) -> String {
        format!("{} {} {}\r\n", self.method, self.uri, self.version)
    }

    /// The byte strings to send, in order. The blank line ending the head is
    /// part of the last header line.
    pub fn lines(&self) -> Vec<Vec<u8>> {
        let mut lines = vec![self.request_line().into_bytes()];
        lines.extend(self.headers.iter().map(|h| h.to_string().into_bytes()));
        if let Some(last) = lines.last_mut() {
            last.extend_from_slice(b"\r\n");
        }
        lines
    }

    /// Size of the serialized head in bytes.
    pub fn head_len(&self) -> usize {
        self.lines().iter().map(Vec::len).sum()
    }

    pub fn ensure_within(&self, limit: usize) -> Result<()> {
        let size = self.head_len();
        if size > limit {
            return Err(Error::RequestTooLarge { size, limit });
        }
        Ok(())
    }
}

impl fmt::Display for OutgoingRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.request_line())?;
        write!(f, "{}", self.headers)?;
        write!(f, "\r\n")?;
        Ok(())
    }
}

/// Builds the GET request for `target`, in absolute-URI form when it goes
/// through `proxy`.
///
/// `Host` always names the origin server. The header order is fixed: `Host`,
/// then `Proxy-Authorization` when the proxy has credentials, then
/// `Connection: close`.
pub fn build_request(target: &RequestTarget, proxy: Option<&ProxySpec>) -> OutgoingRequest {
    let uri = match proxy {
        Some(_) => format!("http://{}{}", target.host, target.origin_form()),
        None => target.origin_form(),
    };

    let mut request = OutgoingRequest::new(HttpMethod::Get, uri);
    request.headers.push("Host", target.host.as_str());
    if let Some(credentials) = proxy.and_then(|p| p.credentials.as_ref()) {
        let token = encode_proxy_auth(&credentials.user, &credentials.password);
        request
            .headers
            .push("Proxy-Authorization", format!("Basic {}", token));
    }
    request.headers.push("Connection", "close");
    request
}
