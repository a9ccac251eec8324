use axum::body::Bytes;
use axum::http::{HeaderMap, Method, Uri};

/// An inbound request, buffered, as seen by the dispatcher.
///
/// `uri` is the original request URI including the domain prefix, so it can
/// be relayed unchanged and quoted in error messages.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ResourceRequest {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
        }
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }
}
