//! Classified results of registry calls.
//!
//! A call that received a parseable response yields an [`Outcome`]; a call
//! that did not yields a [`GatewayError`]. Flows fold both into
//! [`RequestError`] when they only care whether the payload arrived.

use thiserror::Error;

/// Message used when a failed response carries no readable reason.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Result of a call whose response body parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// 2xx response carrying the decoded payload.
    Success(T),
    /// Non-2xx response.
    Failure {
        /// HTTP status code.
        status: u16,
        /// Reason extracted from the body, or [`UNKNOWN_ERROR_MESSAGE`].
        message: String,
    },
}

impl<T> Outcome<T> {
    /// Convert the success payload, leaving failures untouched.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Outcome<U>, E> {
        match self {
            Self::Success(payload) => f(payload).map(Outcome::Success),
            Self::Failure { status, message } => Ok(Outcome::Failure { status, message }),
        }
    }

    /// Treat an application failure as an error.
    pub fn into_result(self) -> Result<T, RequestError> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::Failure { status, message } => Err(RequestError::Application { status, message }),
        }
    }
}

/// Failures where no usable response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Transport failed before a complete response arrived.
    #[error("network error: {message}")]
    Network {
        /// Transport diagnostic, for logs only.
        message: String,
    },
    /// A response arrived but its body was not the expected JSON.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Parse or decode diagnostic, for logs only.
        message: String,
    },
}

/// Every way a registry call can fail, as seen by a flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// See [`GatewayError::Network`].
    #[error("network error: {message}")]
    Network {
        /// Transport diagnostic, for logs only.
        message: String,
    },
    /// See [`GatewayError::MalformedResponse`].
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Parse or decode diagnostic, for logs only.
        message: String,
    },
    /// Well-formed response with a non-success status.
    #[error("registry returned {status}: {message}")]
    Application {
        /// HTTP status code.
        status: u16,
        /// Server-provided reason, safe to show to the user.
        message: String,
    },
}

impl From<GatewayError> for RequestError {
    fn from(value: GatewayError) -> Self {
        match value {
            GatewayError::Network { message } => Self::Network { message },
            GatewayError::MalformedResponse { message } => Self::MalformedResponse { message },
        }
    }
}

/// Flatten a gateway result into a payload or a [`RequestError`].
pub fn flatten_outcome<T>(result: Result<Outcome<T>, GatewayError>) -> Result<T, RequestError> {
    result?.into_result()
}
