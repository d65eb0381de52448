//! The single-request lifecycle: resolve, connect, send, stream, close.
//!
//! Name resolution and the byte stream come from a [`StreamConnector`], so the
//! lifecycle can run against something other than a real socket.
//!
//! ```no_run
//! use std::io;
//!
//! use http_get::client;
//! use http_get::config::ClientConfig;
//! use http_get::error::Result;
//!
//! fn main() -> Result<()> {
//!     client::get("http://example.com/", ClientConfig::default(), &mut io::stdout())?;
//!     Ok(())
//! }
//! ```
//!
//! Every step blocks and there are no timeouts: an unanswered lookup or a
//! silent peer stalls the caller.
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::protocol::{build_request, OutgoingRequest};
use crate::url::{parse_url, RequestTarget};
use std::fmt;
use std::io::{self, Read, Write};
use std::net::{Ipv4Addr, Shutdown, SocketAddr, SocketAddrV4, TcpStream, ToSocketAddrs};
use tracing::{debug, error, warn};

/// Resolves names and opens, and later releases, byte streams.
pub trait StreamConnector {
    type Stream: io::Read + io::Write;

    /// Looks up an IPv4 address for `host`. Fails with [`Error::NameResolution`].
    fn resolve(&mut self, host: &str) -> Result<Ipv4Addr>;

    /// Opens a stream to `addr`. Fails with [`Error::SocketCreate`] or
    /// [`Error::Connect`].
    fn connect(&mut self, addr: SocketAddrV4) -> Result<Self::Stream>;

    /// Releases a stream. Fails with [`Error::Close`].
    fn close(&mut self, stream: Self::Stream) -> Result<()>;
}

/// Plain TCP through the operating system's resolver.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

impl StreamConnector for TcpConnector {
    type Stream = TcpStream;

    fn resolve(&mut self, host: &str) -> Result<Ipv4Addr> {
        let lookup_error = |source: io::Error| Error::NameResolution {
            host: host.into(),
            source,
        };
        (host, 0)
            .to_socket_addrs()
            .map_err(lookup_error)?
            .find_map(|addr| match addr {
                SocketAddr::V4(v4) => Some(*v4.ip()),
                SocketAddr::V6(_) => None,
            })
            .ok_or_else(|| {
                lookup_error(io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    "no IPv4 address found",
                ))
            })
    }

    fn connect(&mut self, addr: SocketAddrV4) -> Result<TcpStream> {
        TcpStream::connect(addr).map_err(|source| Error::Connect { addr, source })
    }

    fn close(&mut self, stream: TcpStream) -> Result<()> {
        match stream.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // The peer already tore the connection down.
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(Error::Close(e)),
        }
    }
}

/// Where a fetch has got to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Resolved,
    Connected,
    RequestSent,
    Streaming,
    Closed,
    /// Terminal after any error; the error returned by the fetch is the reason.
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Resolved => "resolved",
            Stage::Connected => "connected",
            Stage::RequestSent => "request-sent",
            Stage::Streaming => "streaming",
            Stage::Closed => "closed",
            Stage::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

pub struct HttpClient<C: StreamConnector> {
    connector: C,
    config: ClientConfig,
    stage: Stage,
}

impl<C: StreamConnector> HttpClient<C> {
    pub fn new(connector: C, config: ClientConfig) -> Self {
        HttpClient {
            connector,
            config,
            stage: Stage::Start,
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// The stage the most recent fetch ended in: `Closed` on success, `Failed`
    /// on any error.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn enter(&mut self, stage: Stage) {
        debug!(from = %self.stage, to = %stage, "lifecycle");
        self.stage = stage;
    }

    /// Fetches `target` and copies the raw response to `out`, surrounded by
    /// progress lines. Returns the number of response bytes copied.
    ///
    /// Once a connection is open it is closed exactly once, whatever happens
    /// afterwards. A close failure only decides the result when everything
    /// before it succeeded. On any error [`stage`](Self::stage) ends at
    /// [`Stage::Failed`] and the error is the reason.
    pub fn fetch<W: io::Write>(&mut self, target: &RequestTarget, out: &mut W) -> Result<u64> {
        self.stage = Stage::Start;
        let result = self.fetch_inner(target, out);
        if let Err(e) = &result {
            debug!(stage = %self.stage, "fetch failed: {}", e);
            self.stage = Stage::Failed;
        }
        result
    }

    fn fetch_inner<W: io::Write>(&mut self, target: &RequestTarget, out: &mut W) -> Result<u64> {
        let request = build_request(target, self.config.proxy.as_ref());
        request.ensure_within(self.config.max_request_bytes)?;

        progress(out, format_args!("Connecting to host '{}'", target.host));

        let (host, port) = match &self.config.proxy {
            Some(proxy) => (proxy.host.as_str(), proxy.port),
            None => (target.host.as_str(), self.config.default_port),
        };
        let ip = self.connector.resolve(host)?;
        self.enter(Stage::Resolved);

        let addr = SocketAddrV4::new(ip, port);
        let mut stream = self.connector.connect(addr)?;
        self.enter(Stage::Connected);

        progress(out, format_args!("Retrieving document: '{}'", target.path));

        let result = self.exchange(&request, &mut stream, out);
        progress(out, format_args!("Shutting down."));

        let closed = self.connector.close(stream);
        self.enter(Stage::Closed);

        match (result, closed) {
            (Ok(copied), Ok(())) => Ok(copied),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_error)) => {
                error!("{}", close_error);
                Err(e)
            }
        }
    }

    fn exchange<W: io::Write>(
        &mut self,
        request: &OutgoingRequest,
        stream: &mut C::Stream,
        out: &mut W,
    ) -> Result<u64> {
        for line in request.lines() {
            stream.write_all(&line).map_err(Error::Send)?;
        }
        stream.flush().map_err(Error::Send)?;
        self.enter(Stage::RequestSent);

        self.enter(Stage::Streaming);
        let copied = stream_response(stream, out, self.config.read_buffer_size);
        debug!(bytes = copied, "response streamed");
        Ok(copied)
    }
}

/// Copies `stream` to `out` until the peer closes it or a read fails; both end
/// the response normally.
fn stream_response<R: Read, W: Write>(stream: &mut R, out: &mut W, buffer_size: usize) -> u64 {
    let mut buf = vec![0u8; buffer_size.max(1)];
    let mut copied = 0;
    loop {
        let len = match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(len) => len,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("read ended the response: {}", e);
                break;
            }
        };
        if let Err(e) = out.write_all(&buf[..len]) {
            warn!("output closed while streaming: {}", e);
            return copied;
        }
        copied += len as u64;
    }
    if let Err(e) = out.write_all(b"\n").and_then(|()| out.flush()) {
        warn!("output closed while streaming: {}", e);
    }
    copied
}

fn progress<W: io::Write>(out: &mut W, message: fmt::Arguments) {
    if let Err(e) = writeln!(out, "{}", message).and_then(|()| out.flush()) {
        warn!("unable to write progress: {}", e);
    }
}

/// Parses `url` and fetches it over TCP, writing the response to `out`.
pub fn get<W: io::Write>(url: &str, config: ClientConfig, out: &mut W) -> Result<u64> {
    let target = parse_url(url)?;
    HttpClient::new(TcpConnector, config).fetch(&target, out)
}
