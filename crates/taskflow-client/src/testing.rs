//! Test Doubles
//!
//! In-memory transport that records requests and replays scripted responses.
//! Available to other crates' tests through the `testing` feature.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::Value;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::session::{KeyValueStore, MemoryStore, Session, ACCESS_TOKEN_KEY, USER_KEY};
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

enum Scripted {
    Ready(Result<HttpResponse, TransportError>),
    Deferred(oneshot::Receiver<HttpResponse>),
}

/// Records every request; answers from a FIFO script, 200 with no body when empty
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    script: Mutex<VecDeque<Scripted>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: Value) {
        self.push(Scripted::Ready(Ok(HttpResponse::new(status, Some(body)))));
    }

    pub fn fail(&self, message: &str) {
        self.push(Scripted::Ready(Err(TransportError::Network(message.to_string()))));
    }

    /// Next request waits until the returned sender fires
    pub fn defer(&self) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.push(Scripted::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn push(&self, entry: Scripted) {
        self.script.lock().unwrap().push_back(entry);
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            None => Ok(HttpResponse::new(200, None)),
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Deferred(rx)) => rx
                .await
                .map_err(|_| TransportError::Network("response dropped".to_string())),
        }
    }
}

/// Client against `http://test.local` with `token` in the persistent area
pub fn authed_client(transport: &Arc<MockTransport>, token: &str) -> ApiClient {
    let persistent = Arc::new(MemoryStore::new());
    persistent.set(ACCESS_TOKEN_KEY, token).unwrap();
    persistent
        .set(
            USER_KEY,
            r#"{"id":"0b6f5a2e-7f5e-4c59-8a43-2d7c0f0e9b11","email":"ada@example.com","name":"Ada Lovelace"}"#,
        )
        .unwrap();
    let session = Session::new(persistent, Arc::new(MemoryStore::new()));
    ApiClient::new(ClientConfig::new("http://test.local"), transport.clone(), session)
}

/// Client with empty storage
pub fn anonymous_client(transport: &Arc<MockTransport>) -> ApiClient {
    ApiClient::new(ClientConfig::new("http://test.local"), transport.clone(), Session::in_memory())
}
