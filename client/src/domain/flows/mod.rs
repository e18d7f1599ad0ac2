//! Page flows gluing the gateway, session store, and renderer together.
//!
//! Flows never return errors: every failure ends as a notification or a
//! placeholder, and the returned outcome only reports which one.

mod catalog;
mod in_flight;
mod login;

pub use catalog::{CatalogFlow, CatalogOutcome, bootstrap_session};
pub use login::{
    DEFAULT_CATALOG_PAGE, LoginFlow, LoginForm, LoginOutcome, NETWORK_ERROR_MESSAGE,
    SESSION_SAVE_ERROR_MESSAGE,
};
