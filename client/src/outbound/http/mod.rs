//! HTTP outbound adapters.
//!
//! This module provides the reqwest implementation of the
//! `RegistryTransport` port.

mod reqwest_transport;

pub use reqwest_transport::ReqwestRegistryTransport;
