//! Request gateway: one registry call in, one classified outcome out.
//!
//! The gateway builds the request for an endpoint, hands it to the transport
//! port, parses the body as JSON whatever the status, and classifies the
//! result. Transport and parse failures come back as [`GatewayError`] values;
//! nothing escapes as a panic.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::outcome::{GatewayError, Outcome, UNKNOWN_ERROR_MESSAGE};
use crate::domain::ports::{HttpMethod, RegistryTransport, TransportRequest, TransportResponse};
use crate::domain::{CatalogEntry, Credentials, Session, SessionContext, decode_catalog};

/// Content type declared on requests that carry a body.
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// Header the registry reads the bearer token from.
pub const AUTHORIZATION_HEADER: &str = "X-Authorization";

/// Body fields checked, in order, for a failure reason.
const MESSAGE_FIELDS: [&str; 2] = ["message", "detail"];

/// Worst-case JSON escaping turns one input byte into six (`\u00XX`).
const MAX_ESCAPED_BYTES_PER_BYTE: usize = 6;
/// Room for the braces, keys, quotes, and separators of [`LoginBody`].
const LOGIN_BODY_FRAMING: usize = 64;

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Registry endpoints the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST login`.
    Login,
    /// `GET models`.
    Models,
}

impl Endpoint {
    /// Path relative to the registry base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Models => "models",
        }
    }

    /// HTTP method used for the endpoint.
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::Login => HttpMethod::Post,
            Self::Models => HttpMethod::Get,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Issues registry calls and classifies their outcomes.
#[derive(Clone)]
pub struct RequestGateway {
    transport: Arc<dyn RegistryTransport>,
}

impl RequestGateway {
    /// Create a gateway over `transport`.
    pub fn new(transport: Arc<dyn RegistryTransport>) -> Self {
        Self { transport }
    }

    /// Authenticate `credentials` and decode the issued session.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] when no response arrived and
    /// [`GatewayError::MalformedResponse`] when the body is not JSON or a
    /// successful body is not a JSON object.
    pub async fn login(&self, credentials: &Credentials) -> Result<Outcome<Session>, GatewayError> {
        let body = login_body(credentials)?;

        self.call(Endpoint::Login, Some(body), None)
            .await?
            .try_map(|payload| {
                Session::try_from_value(payload).map_err(|error| {
                    warn!(endpoint = %Endpoint::Login, error = %error, "unexpected session shape");
                    GatewayError::MalformedResponse {
                        message: error.to_string(),
                    }
                })
            })
    }

    /// Fetch the catalog listing on behalf of `context`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] when no response arrived and
    /// [`GatewayError::MalformedResponse`] when the body is not JSON or a
    /// successful body is not an array of catalog entries.
    pub async fn fetch_models(
        &self,
        context: &SessionContext,
    ) -> Result<Outcome<Vec<CatalogEntry>>, GatewayError> {
        self.call(Endpoint::Models, None, context.bearer_token())
            .await?
            .try_map(|payload| {
                decode_catalog(payload).map_err(|error| {
                    warn!(endpoint = %Endpoint::Models, error = %error, "unexpected catalog shape");
                    GatewayError::MalformedResponse {
                        message: format!("invalid catalog payload: {error}"),
                    }
                })
            })
    }

    /// Perform one call and classify the parsed body.
    ///
    /// # Errors
    ///
    /// See [`RequestGateway::login`].
    pub async fn call(
        &self,
        endpoint: Endpoint,
        body: Option<Zeroizing<Vec<u8>>>,
        bearer_token: Option<&str>,
    ) -> Result<Outcome<Value>, GatewayError> {
        let request = build_request(endpoint, body, bearer_token);
        let span = info_span!(
            "registry_call",
            request_id = %Uuid::new_v4(),
            endpoint = %endpoint,
            method = endpoint.method().as_str(),
        );

        async move {
            let response = self.transport.send(request).await.map_err(|error| {
                warn!(error = %error, "registry call failed before a response arrived");
                GatewayError::Network {
                    message: error.to_string(),
                }
            })?;
            classify(endpoint, &response)
        }
        .instrument(span)
        .await
    }
}

/// Serialize the login body straight into a wiped buffer.
///
/// The buffer is sized for the worst case up front so it never reallocates
/// and leaves an unwiped copy of the password behind.
fn login_body(credentials: &Credentials) -> Result<Zeroizing<Vec<u8>>, GatewayError> {
    let payload = LoginBody {
        email: credentials.email(),
        password: credentials.password(),
    };
    let capacity = (payload.email.len() + payload.password.len())
        .saturating_mul(MAX_ESCAPED_BYTES_PER_BYTE)
        .saturating_add(LOGIN_BODY_FRAMING);
    let mut body = Zeroizing::new(Vec::with_capacity(capacity));
    serde_json::to_writer(&mut *body, &payload).map_err(|error| GatewayError::Network {
        message: format!("could not encode the login request: {error}"),
    })?;
    Ok(body)
}

fn build_request(
    endpoint: Endpoint,
    body: Option<Zeroizing<Vec<u8>>>,
    bearer_token: Option<&str>,
) -> TransportRequest {
    let mut headers = vec![("Accept", JSON_CONTENT_TYPE.to_owned())];
    if body.is_some() {
        headers.push(("Content-Type", JSON_CONTENT_TYPE.to_owned()));
    }
    if let Some(token) = bearer_token {
        headers.push((AUTHORIZATION_HEADER, token.to_owned()));
    }

    TransportRequest {
        method: endpoint.method(),
        path: endpoint.path(),
        headers,
        body,
    }
}

fn classify(
    endpoint: Endpoint,
    response: &TransportResponse,
) -> Result<Outcome<Value>, GatewayError> {
    let parsed: Value = serde_json::from_slice(&response.body).map_err(|error| {
        warn!(
            status = response.status,
            error = %error,
            "registry response body is not JSON"
        );
        GatewayError::MalformedResponse {
            message: format!(
                "{endpoint} returned status {} with invalid JSON: {error}",
                response.status
            ),
        }
    })?;
    debug!(status = response.status, body = %parsed, "registry response received");

    if response.is_success() {
        Ok(Outcome::Success(parsed))
    } else {
        Ok(Outcome::Failure {
            status: response.status,
            message: failure_message(&parsed),
        })
    }
}

fn failure_message(body: &Value) -> String {
    MESSAGE_FIELDS
        .iter()
        .find_map(|field| body.get(*field).and_then(Value::as_str))
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
        .to_owned()
}

#[cfg(test)]
mod tests;
