//! Driven ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod key_value_storage;
mod page;
mod registry_transport;

#[cfg(test)]
pub use key_value_storage::MockKeyValueStorage;
pub use key_value_storage::{InMemoryKeyValueStorage, KeyValueStorage, KeyValueStorageError};
#[cfg(test)]
pub use page::{MockCatalogSurface, MockNavigator, MockNotifier};
pub use page::{CatalogSurface, Navigator, Notifier};
#[cfg(test)]
pub use registry_transport::MockRegistryTransport;
pub use registry_transport::{
    HttpMethod, RegistryTransport, TransportError, TransportRequest, TransportResponse,
};
