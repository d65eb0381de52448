//! A minimal HTTP/1.1 GET client that streams the raw response.
//!
//! See the `client` module for the connect, send, stream and close lifecycle.
//! See the `url` and `proxy` modules for parsing targets and proxy specifications.
//! See the `protocol` module for how the request head is built.
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod proxy;
pub mod url;
