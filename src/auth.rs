//! Basic authentication tokens for the `Proxy-Authorization` header.
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Base64 of `user:password`, without line breaks.
pub fn encode_proxy_auth(user: &str, password: &str) -> String {
    STANDARD.encode(format!("{}:{}", user, password))
}
