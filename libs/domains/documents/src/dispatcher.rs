use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::response::Response;
use serde::Serialize;
use tracing::instrument;

use crate::error::{DocumentError, DocumentResult, StoreError};
use crate::id::UniqueIdGenerator;
use crate::models::{Filter, Item, ItemsHandle, operator_field};
use crate::payload;
use crate::proxy::ProxyForwarder;
use crate::request::ResourceRequest;
use crate::store::DocumentStore;

pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Number of items matching the index filter, counted independently of the listing.
pub static TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// Present with value `true` when the listing stopped early.
pub static ITEMS_TRUNCATED: HeaderName = HeaderName::from_static("x-items-truncated");

/// Per-domain request handling on top of a [`DocumentStore`].
///
/// Owns the store, the optional upstream for actions it does not handle,
/// and the name of the form field that carries JSON payloads.
pub struct ResourceDispatcher<S: DocumentStore> {
    domain: String,
    store: S,
    proxy: Option<ProxyForwarder>,
    json_parameter: String,
    content_type: HeaderValue,
    ids: UniqueIdGenerator,
}

impl<S: DocumentStore> ResourceDispatcher<S> {
    pub fn new(domain: impl Into<String>, store: S, json_parameter: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            store,
            proxy: None,
            json_parameter: json_parameter.into(),
            content_type: HeaderValue::from_static(DEFAULT_CONTENT_TYPE),
            ids: UniqueIdGenerator::new(),
        }
    }

    pub fn with_proxy(mut self, proxy: ProxyForwarder) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_content_type(mut self, content_type: HeaderValue) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn json_parameter(&self) -> &str {
        &self.json_parameter
    }

    /// List items matching every query parameter exactly.
    #[instrument(skip(self), fields(domain = %self.domain))]
    pub async fn index(&self, filter: Filter) -> DocumentResult<Response> {
        if let Some(field) = operator_field(&filter) {
            return Err(StoreError::InvalidFilter(field.to_string()).into());
        }

        let outcome = self.store.find(&filter).await?;

        let total = match self.store.count(&filter).await {
            Ok(total) => Some(total),
            Err(e) => {
                tracing::warn!("Count failed, omitting total: {}", e);
                None
            }
        };

        let truncated = outcome.is_partial();
        if truncated {
            tracing::warn!(
                returned = outcome.items().len(),
                total = ?total,
                "Returning truncated listing"
            );
        }

        let handle = ItemsHandle::new(outcome.into_items());
        let mut response = self.respond(StatusCode::OK, &handle)?;

        let headers = response.headers_mut();
        if let Some(total) = total {
            headers.insert(TOTAL_COUNT.clone(), HeaderValue::from(total));
        }
        if truncated {
            headers.insert(ITEMS_TRUNCATED.clone(), HeaderValue::from_static("true"));
        }
        Ok(response)
    }

    /// Store the payload under a fresh id and answer with the stored item.
    #[instrument(skip(self, request), fields(domain = %self.domain))]
    pub async fn create(&self, request: ResourceRequest) -> DocumentResult<Response> {
        let item = payload::required_item(
            request.query(),
            &request.headers,
            &request.body,
            &self.json_parameter,
        )?;

        let id = self.ids.generate()?;
        self.store.create(&id, item).await?;

        let stored = self.fetch(&id).await?;
        self.respond(StatusCode::CREATED, &stored)
    }

    #[instrument(skip(self), fields(domain = %self.domain))]
    pub async fn find(&self, id: &str) -> DocumentResult<Response> {
        let item = self.fetch(id).await?;
        self.respond(StatusCode::OK, &item)
    }

    /// POST on `<id>` or `<id>/<action...>`.
    ///
    /// With no action the item is replaced locally first; a failed update
    /// answers with its error. The request is then relayed to the upstream,
    /// whose reply becomes the response, or rejected as not implemented
    /// when the domain has no upstream.
    #[instrument(skip(self, request), fields(domain = %self.domain, path = %request.path()))]
    pub async fn act(&self, segments: &[String], request: ResourceRequest) -> DocumentResult<Response> {
        if segments.len() < 2 {
            let id = segments.first().map(String::as_str).unwrap_or_default();
            let item = payload::field_or_body_item(
                request.query(),
                &request.headers,
                &request.body,
                &self.json_parameter,
            )?;
            self.store.update(id, item).await?;
        }

        match &self.proxy {
            Some(proxy) => proxy.forward(request).await,
            None => Err(DocumentError::NotImplemented(request.path().to_string())),
        }
    }

    async fn fetch(&self, id: &str) -> DocumentResult<Item> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| DocumentError::NotFound(id.to_string()))
    }

    fn respond<T: Serialize>(&self, status: StatusCode, body: &T) -> DocumentResult<Response> {
        let bytes = serde_json::to_vec(body)?;
        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, self.content_type.clone());
        Ok(response)
    }
}
