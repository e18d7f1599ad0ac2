//! Client for the package registry.
//!
//! The crate signs a user in against the registry's login endpoint, keeps the
//! issued session in persistent storage, and renders the model catalog from
//! the listing endpoint. Network, storage, and display concerns sit behind the
//! driven ports in [`domain::ports`]; [`outbound`] supplies the adapters.

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::{ClientSettings, SettingsError};
