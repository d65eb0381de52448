//! Lenient splitting of a URL into the host and path of a request.
//!
//! There is no scheme validation, percent-decoding or query handling: everything
//! after the first `//` up to the next `/` is the host, and the rest is the path.
use crate::error::{Error, Result};
use core::fmt;
use core::str;

const SCHEME_SEPARATOR: &str = "//";

/// The origin server and document a GET request is aimed at.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct RequestTarget {
    /// Authority as written in the URL; resolved and sent in `Host` as is.
    pub host: String,
    /// Path without its leading `/`; empty when the URL names only a host.
    pub path: String,
}

impl RequestTarget {
    pub fn new<H: Into<String>, P: Into<String>>(host: H, path: P) -> Self {
        RequestTarget {
            host: host.into(),
            path: path.into(),
        }
    }

    /// The path as it appears in an origin-form request line.
    pub fn origin_form(&self) -> String {
        format!("/{}", self.path)
    }
}

/// Splits `uri` into the host between the first `//` and the next `/`, and the
/// path after that `/`.
pub fn parse_url(uri: &str) -> Result<RequestTarget> {
    let start = uri
        .find(SCHEME_SEPARATOR)
        .ok_or_else(|| Error::MalformedUrl(uri.into()))?;
    let remainder = &uri[start + SCHEME_SEPARATOR.len()..];

    Ok(match remainder.split_once('/') {
        Some((host, path)) => RequestTarget::new(host, path),
        None => RequestTarget::new(remainder, ""),
    })
}

impl str::FromStr for RequestTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_url(s)
    }
}

impl fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "http://{}/{}", self.host, self.path)
    }
}
