//! Relays requests a dispatcher does not handle itself to an upstream.

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, Uri, header};
use axum::response::Response;
use tracing::instrument;
use url::Url;

use crate::error::{DocumentError, DocumentResult};
use crate::models::ProxyBinding;
use crate::request::ResourceRequest;

/// Connection-scoped headers that must not be relayed.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Forwards a request to one upstream base URL and hands back its reply.
///
/// Same method, path, query and body; only the host changes. If the target
/// has a path prefix, the request path is appended to it. Redirects are
/// returned to the caller, not followed.
#[derive(Debug, Clone)]
pub struct ProxyForwarder {
    client: reqwest::Client,
    target: Url,
}

impl ProxyForwarder {
    pub fn new(binding: ProxyBinding) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self::with_client(client, binding))
    }

    pub fn with_client(client: reqwest::Client, binding: ProxyBinding) -> Self {
        Self {
            client,
            target: binding.target().clone(),
        }
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    /// Upstream URL for an inbound URI: target path + request path, with
    /// both query strings kept.
    pub fn upstream_url(&self, uri: &Uri) -> Url {
        let mut url = self.target.clone();
        url.set_path(&join_paths(self.target.path(), uri.path()));

        let target_query = self.target.query().filter(|q| !q.is_empty());
        let request_query = uri.query().filter(|q| !q.is_empty());
        let query = match (target_query, request_query) {
            (Some(a), Some(b)) => Some(format!("{}&{}", a, b)),
            (a, b) => a.or(b).map(str::to_string),
        };
        url.set_query(query.as_deref());
        url
    }

    #[instrument(skip(self, request), fields(target = %self.target, path = %request.uri.path()))]
    pub async fn forward(&self, request: ResourceRequest) -> DocumentResult<Response> {
        let url = self.upstream_url(&request.uri);
        let mut headers = end_to_end(&request.headers);
        headers.remove(header::HOST);
        headers.remove(header::CONTENT_LENGTH);

        tracing::debug!(method = %request.method, %url, "Forwarding request");

        let upstream = self
            .client
            .request(request.method, url)
            .headers(headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| self.failure(e))?;

        let status = upstream.status();
        let headers = end_to_end(upstream.headers());
        let body = upstream.bytes().await.map_err(|e| self.failure(e))?;

        tracing::debug!(%status, "Upstream replied");

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }

    fn failure(&self, err: reqwest::Error) -> DocumentError {
        DocumentError::Proxy {
            target: self.target.to_string(),
            message: err.to_string(),
        }
    }
}

fn join_paths(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Copy of `headers` without hop-by-hop headers, including any named in
/// the `Connection` header.
fn end_to_end(headers: &HeaderMap) -> HeaderMap {
    let named: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|name| HeaderName::try_from(name.trim()).ok())
        .collect();

    let mut out = headers.clone();
    for name in HOP_BY_HOP {
        out.remove(name);
    }
    for name in &named {
        out.remove(name);
    }
    out
}
