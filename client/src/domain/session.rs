//! Opaque session payload issued by the login endpoint.
//!
//! The registry controls the shape of the payload. The client only requires
//! that it is a JSON object, and otherwise round-trips it untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names that may carry a bearer token, in lookup order.
const TOKEN_FIELDS: [&str; 2] = ["bearerToken", "token"];

/// Payload returned by a successful login.
///
/// # Examples
/// ```
/// use registry_client::domain::Session;
/// use serde_json::json;
///
/// let session = Session::try_from_value(json!({ "bearerToken": "abc" })).unwrap();
/// assert_eq!(session.bearer_token(), Some("abc"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session(Map<String, Value>);

/// Error returned when a payload is not a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("session payload must be a JSON object, found {found}")]
pub struct SessionShapeError {
    found: &'static str,
}

impl Session {
    /// Accept `value` as a session when it is a JSON object.
    pub fn try_from_value(value: Value) -> Result<Self, SessionShapeError> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(SessionShapeError {
                found: json_kind(&other),
            }),
        }
    }

    /// Raw fields of the payload.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Bearer token carried by the payload, if any.
    pub fn bearer_token(&self) -> Option<&str> {
        TOKEN_FIELDS
            .iter()
            .find_map(|field| {
                self.0
                    .get(*field)
                    .and_then(Value::as_str)
                    .filter(|token| !token.trim().is_empty())
            })
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Authenticated state handed to components that act on behalf of the user.
///
/// Built once at page bootstrap from the session store and passed explicitly;
/// nothing reads the stored session behind a caller's back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    session: Option<Session>,
}

impl SessionContext {
    /// Context for a visitor with no stored session.
    pub const fn anonymous() -> Self {
        Self { session: None }
    }

    /// Context wrapping a loaded session, if there was one.
    pub const fn from_loaded(session: Option<Session>) -> Self {
        Self { session }
    }

    /// The loaded session.
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Bearer token to attach to registry calls.
    pub fn bearer_token(&self) -> Option<&str> {
        self.session.as_ref().and_then(Session::bearer_token)
    }
}
