//! Driven port for the single HTTP exchange behind every registry call.
//!
//! The domain owns the request and response shapes so the gateway can
//! classify outcomes without knowing which HTTP client sits underneath.

use async_trait::async_trait;
use zeroize::Zeroizing;

use super::define_port_error;

/// HTTP verbs used against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`, used for listing endpoints.
    Get,
    /// `POST`, used for requests that carry a body.
    Post,
}

impl HttpMethod {
    /// Upper-case method token as it appears on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// One outbound request, addressed relative to the registry base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the registry base, without a leading slash.
    pub path: &'static str,
    /// Header name/value pairs sent verbatim.
    pub headers: Vec<(&'static str, String)>,
    /// Serialized body, if the request carries one. Wiped on drop since it
    /// may hold a password.
    pub body: Option<Zeroizing<Vec<u8>>>,
}

impl TransportRequest {
    /// Look up the first header with `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response as received from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

define_port_error! {
    /// Failures where no complete response was received.
    pub enum TransportError {
        /// The registry could not be reached (DNS, refused connection).
        Unreachable { message: String } =>
            "registry unreachable: {message}",
        /// The exchange exceeded the configured timeout.
        Timeout { message: String } =>
            "registry request timed out: {message}",
        /// The connection failed mid-exchange, or the request could not be built.
        Io { message: String } =>
            "registry exchange failed: {message}",
    }
}

/// Port performing one HTTP exchange with the registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    /// Send `request` and return the status and body, whatever the status.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
