//! Domain layer: registry payloads, the request gateway, session storage,
//! catalog rendering, and the page flows that tie them together.
//!
//! Everything outside the process (HTTP, persistent storage, the screen) is
//! reached through the driven ports in [`ports`].

pub mod catalog;
pub mod credentials;
pub mod display;
pub mod flows;
pub mod gateway;
pub mod outcome;
pub mod ports;
pub mod renderer;
pub mod session;
pub mod session_store;

pub use self::catalog::{CatalogEntry, decode_catalog};
pub use self::credentials::{Credentials, CredentialsValidationError};
pub use self::display::{CatalogCard, DisplayElement, Placeholder, SafeText};
pub use self::flows::{
    CatalogFlow, CatalogOutcome, LoginFlow, LoginForm, LoginOutcome, bootstrap_session,
};
pub use self::gateway::{Endpoint, RequestGateway};
pub use self::outcome::{GatewayError, Outcome, RequestError, flatten_outcome};
pub use self::renderer::CatalogRenderer;
pub use self::session::{Session, SessionContext, SessionShapeError};
pub use self::session_store::{SESSION_KEY, SessionStore, SessionStoreError};
