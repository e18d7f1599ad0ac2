//! Reqwest-backed registry transport.
//!
//! This adapter owns transport details only: URL resolution against the
//! registry base, the request timeout, and mapping reqwest failures onto
//! [`TransportError`]. Status classification stays in the gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};

use crate::domain::ports::{
    HttpMethod, RegistryTransport, TransportError, TransportRequest, TransportResponse,
};

const DEFAULT_USER_AGENT: &str = concat!("registry-client/", env!("CARGO_PKG_VERSION"));

/// Registry transport performing real HTTP exchanges.
#[derive(Debug, Clone)]
pub struct ReqwestRegistryTransport {
    client: Client,
    base: Url,
}

impl ReqwestRegistryTransport {
    /// Build a transport for the registry at `base` with a per-request timeout.
    ///
    /// ```rust,ignore
    /// let transport = ReqwestRegistryTransport::new(base, Duration::from_secs(30));
    /// assert!(transport.is_ok() || transport.is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base: directory_base(base),
        })
    }

    /// Absolute URL for a registry-relative `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] when `path` cannot be joined onto the base.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|error| TransportError::io(format!("invalid endpoint path '{path}': {error}")))
    }
}

#[async_trait]
impl RegistryTransport for ReqwestRegistryTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = self.endpoint_url(request.path)?;
        let mut builder = self.client.request(to_method(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        // reqwest owns its copy of the body from here on; ours is wiped on drop.
        if let Some(body) = &request.body {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Make sure relative joins append to the base path instead of replacing its
/// last segment.
fn directory_base(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::unreachable(error.to_string())
    } else {
        TransportError::io(error.to_string())
    }
}
