use std::io;
use std::net::SocketAddrV4;

/// Why a proxy specification was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProxySpecError {
    #[error("proxy credentials are missing a ':password' before '@'")]
    MissingPassword,
    #[error("invalid proxy port '{0}'")]
    InvalidPort(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad command line; holds the rendered usage message.
    #[error("{0}")]
    Usage(String),
    #[error("Error - malformed URL '{0}'.")]
    MalformedUrl(String),
    #[error("Error - malformed proxy specification: {0}")]
    MalformedProxySpec(#[from] ProxySpecError),
    #[error("Error - request head of {size} bytes exceeds the {limit} byte limit")]
    RequestTooLarge { size: usize, limit: usize },
    #[error("Unable to create local socket: {0}")]
    SocketCreate(#[source] io::Error),
    #[error("Error in name resolution of '{host}': {source}")]
    NameResolution {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("Unable to connect to host {addr}: {source}")]
    Connect {
        addr: SocketAddrV4,
        #[source]
        source: io::Error,
    },
    #[error("Unable to send request: {0}")]
    Send(#[source] io::Error),
    #[error("Error closing client connection: {0}")]
    Close(#[source] io::Error),
}

pub type Result<R> = std::result::Result<R, Error>;

impl Error {
    /// The process exit status reported for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) | Error::MalformedUrl(_) | Error::RequestTooLarge { .. } => 1,
            Error::MalformedProxySpec(_) | Error::SocketCreate(_) => 2,
            Error::NameResolution { .. } => 3,
            Error::Connect { .. } | Error::Send(_) => 4,
            Error::Close(_) => 5,
        }
    }
}
