//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Bytes,
    http::{Method, StatusCode, Uri},
};
use domain_documents::*;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// `DocumentStore` over a shared vector. Clones see the same items.
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<Vec<Item>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Item> {
        self.items.lock().unwrap().clone()
    }

    fn matches(item: &Item, filter: &Filter) -> bool {
        filter
            .iter()
            .all(|(field, value)| item.get(field) == Some(&Value::String(value.clone())))
    }

    fn has_id(item: &Item, id: &str) -> bool {
        item.get(ID_FIELD).and_then(Value::as_str) == Some(id)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, id: &str, mut item: Item) -> StoreResult<()> {
        item.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        self.items.lock().unwrap().push(item);
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Item>> {
        let items = self.items.lock().unwrap();
        Ok(items.iter().find(|item| Self::has_id(item, id)).cloned())
    }

    async fn update(&self, id: &str, mut item: Item) -> StoreResult<()> {
        if id.is_empty() {
            return Err(StoreError::MissingId);
        }
        item.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        let mut items = self.items.lock().unwrap();
        let slot = items
            .iter_mut()
            .find(|existing| Self::has_id(existing, id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = item;
        Ok(())
    }

    async fn find(&self, filter: &Filter) -> StoreResult<FindOutcome> {
        let items = self.items.lock().unwrap();
        Ok(FindOutcome::Complete(
            items
                .iter()
                .filter(|item| Self::matches(item, filter))
                .cloned()
                .collect(),
        ))
    }

    async fn count(&self, filter: &Filter) -> StoreResult<u64> {
        let items = self.items.lock().unwrap();
        Ok(items.iter().filter(|item| Self::matches(item, filter)).count() as u64)
    }
}

/// A request as the upstream received it.
#[derive(Debug, Clone)]
pub struct Relayed {
    pub method: Method,
    pub uri: Uri,
    pub body: Bytes,
}

/// Local upstream that records every request and replies 202 `upstream:<path>`.
pub async fn recording_upstream() -> (SocketAddr, Arc<Mutex<Vec<Relayed>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();

    let app = Router::new().fallback(move |method: Method, uri: Uri, body: Bytes| {
        let recorder = recorder.clone();
        async move {
            let reply = format!("upstream:{}", uri.path());
            recorder.lock().unwrap().push(Relayed { method, uri, body });
            (StatusCode::ACCEPTED, reply)
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (addr, seen)
}

pub fn proxy_to(addr: SocketAddr) -> ProxyForwarder {
    ProxyForwarder::new(ProxyBinding::parse(&format!("http://{}", addr)).unwrap()).unwrap()
}
