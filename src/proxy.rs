//! Parsing of `[http://][user:password@]host[:port][/...]` proxy specifications.
use crate::error::{Error, ProxySpecError, Result};
use core::fmt;
use core::str;

const PROXY_SCHEME: &str = "http://";
pub const DEFAULT_PROXY_PORT: u16 = 80;

/// Login for a proxy that requires basic authentication.
#[derive(PartialEq, Eq, Clone)]
pub struct ProxyCredentials {
    pub user: String,
    pub password: String,
}

impl fmt::Debug for ProxyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ProxyCredentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A forwarding proxy to send the request through.
///
/// A user is only ever present together with a password, so both live in one
/// optional [`ProxyCredentials`].
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ProxySpec {
    pub host: String,
    pub port: u16,
    pub credentials: Option<ProxyCredentials>,
}

impl ProxySpec {
    pub fn new<H: Into<String>>(host: H, port: u16) -> Self {
        ProxySpec {
            host: host.into(),
            port,
            credentials: None,
        }
    }

    pub fn with_credentials<U: Into<String>, P: Into<String>>(mut self, user: U, password: P) -> Self {
        self.credentials = Some(ProxyCredentials {
            user: user.into(),
            password: password.into(),
        });
        self
    }

    pub fn user(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.user.as_str())
    }

    pub fn password(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.password.as_str())
    }
}

/// Splits a proxy specification into host, port and optional credentials.
///
/// Only the first `@`, the first `:` before it, the first `/` and the first `:`
/// of the host part are significant.
pub fn parse_proxy_spec(spec: &str) -> Result<ProxySpec> {
    let spec = spec.strip_prefix(PROXY_SCHEME).unwrap_or(spec);

    let (credentials, host_port) = match spec.split_once('@') {
        Some((login, rest)) => {
            let (user, password) = login
                .split_once(':')
                .ok_or(ProxySpecError::MissingPassword)?;
            let credentials = ProxyCredentials {
                user: user.into(),
                password: password.into(),
            };
            (Some(credentials), rest)
        }
        None => (None, spec),
    };

    let host_port = host_port
        .split_once('/')
        .map_or(host_port, |(host_port, _)| host_port);

    let (host, port) = match host_port.split_once(':') {
        Some((host, port)) => (host, parse_port(port)?),
        None => (host_port, DEFAULT_PROXY_PORT),
    };

    Ok(ProxySpec {
        host: host.into(),
        port,
        credentials,
    })
}

fn parse_port(port: &str) -> Result<u16> {
    match port.parse::<u16>() {
        Ok(p) if p > 0 => Ok(p),
        _ => Err(Error::from(ProxySpecError::InvalidPort(port.into()))),
    }
}

impl str::FromStr for ProxySpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_proxy_spec(s)
    }
}
