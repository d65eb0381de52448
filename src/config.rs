use crate::proxy::ProxySpec;

/// Tunables for a single fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Size of the buffer each read from the connection fills.
    pub read_buffer_size: usize,
    /// Largest request head that will be sent.
    pub max_request_bytes: usize,
    /// Port the origin server is connected on when no proxy is used.
    pub default_port: u16,
    pub proxy: Option<ProxySpec>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            read_buffer_size: 8 * 1024,
            max_request_bytes: 8 * 1024,
            default_port: 80,
            proxy: None,
        }
    }
}

impl ClientConfig {
    pub fn with_proxy(mut self, proxy: ProxySpec) -> Self {
        self.proxy = Some(proxy);
        self
    }
}
