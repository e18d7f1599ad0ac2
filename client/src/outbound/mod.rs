//! Outbound adapters implementing the domain's driven ports.

pub mod display;
pub mod http;
pub mod storage;
