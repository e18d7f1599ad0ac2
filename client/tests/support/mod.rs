//! Recording test doubles for the driven ports.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use registry_client::domain::ports::{
    InMemoryKeyValueStorage, KeyValueStorage, KeyValueStorageError, Navigator, Notifier,
    RegistryTransport, TransportError, TransportRequest, TransportResponse,
};

/// Transport replaying scripted replies in order and recording requests.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<Result<TransportResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn replying(status: u16, body: &str) -> Self {
        let transport = Self::default();
        transport.push_reply(status, body);
        transport
    }

    pub(crate) fn failing(error: TransportError) -> Self {
        let transport = Self::default();
        transport
            .replies
            .lock()
            .expect("replies lock")
            .push_back(Err(error));
        transport
    }

    pub(crate) fn push_reply(&self, status: u16, body: &str) {
        self.replies
            .lock()
            .expect("replies lock")
            .push_back(Ok(TransportResponse {
                status,
                body: body.as_bytes().to_vec(),
            }));
    }

    pub(crate) fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl RegistryTransport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().expect("requests lock").push(request);
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::io("no scripted reply left")))
    }
}

/// Storage counting writes on top of the in-memory adapter.
#[derive(Default)]
pub(crate) struct CountingStorage {
    inner: InMemoryKeyValueStorage,
    writes: Mutex<usize>,
}

impl CountingStorage {
    pub(crate) fn writes(&self) -> usize {
        *self.writes.lock().expect("writes lock")
    }
}

impl KeyValueStorage for CountingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStorageError> {
        *self.writes.lock().expect("writes lock") += 1;
        self.inner.set(key, value)
    }
}

/// Notifier recording every alert.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub(crate) fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("alerts lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .expect("alerts lock")
            .push(message.to_owned());
    }
}

/// Navigator recording every navigation.
#[derive(Default)]
pub(crate) struct CountingNavigator {
    visits: Mutex<Vec<String>>,
}

impl CountingNavigator {
    pub(crate) fn visits(&self) -> Vec<String> {
        self.visits.lock().expect("visits lock").clone()
    }
}

impl Navigator for CountingNavigator {
    fn navigate(&self, path: &str) {
        self.visits
            .lock()
            .expect("visits lock")
            .push(path.to_owned());
    }
}
