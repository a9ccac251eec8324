use axum::{
    Router,
    body::Bytes,
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderMap, Method},
    response::Response,
    routing::{get, post},
};
use std::sync::Arc;

use crate::dispatcher::ResourceDispatcher;
use crate::error::DocumentResult;
use crate::models::Filter;
use crate::request::ResourceRequest;
use crate::store::DocumentStore;

/// Routes of one domain, to be nested under `/<domain>`.
///
/// | Method & path          | Operation |
/// |------------------------|-----------|
/// | `GET /`                | index     |
/// | `POST /`               | create    |
/// | `GET /{id}`            | find      |
/// | `POST /{id}`           | act       |
/// | `POST /{id}/{*action}` | act       |
pub fn router<S: DocumentStore + 'static>(dispatcher: ResourceDispatcher<S>) -> Router {
    let shared_dispatcher = Arc::new(dispatcher);

    Router::new()
        .route("/", get(index::<S>).post(create::<S>))
        .route("/{id}", get(find::<S>).post(act_on_item::<S>))
        .route("/{id}/{*action}", post(act_with_action::<S>))
        .with_state(shared_dispatcher)
}

async fn index<S: DocumentStore>(
    State(dispatcher): State<Arc<ResourceDispatcher<S>>>,
    Query(filter): Query<Filter>,
) -> DocumentResult<Response> {
    dispatcher.index(filter).await
}

async fn create<S: DocumentStore>(
    State(dispatcher): State<Arc<ResourceDispatcher<S>>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> DocumentResult<Response> {
    dispatcher
        .create(ResourceRequest::new(method, uri, headers, body))
        .await
}

async fn find<S: DocumentStore>(
    State(dispatcher): State<Arc<ResourceDispatcher<S>>>,
    Path(id): Path<String>,
) -> DocumentResult<Response> {
    dispatcher.find(&id).await
}

async fn act_on_item<S: DocumentStore>(
    State(dispatcher): State<Arc<ResourceDispatcher<S>>>,
    Path(id): Path<String>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> DocumentResult<Response> {
    let request = ResourceRequest::new(method, uri, headers, body);
    dispatcher.act(&[id], request).await
}

async fn act_with_action<S: DocumentStore>(
    State(dispatcher): State<Arc<ResourceDispatcher<S>>>,
    Path((id, action)): Path<(String, String)>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> DocumentResult<Response> {
    let segments: Vec<String> = std::iter::once(id)
        .chain(
            action
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string),
        )
        .collect();

    let request = ResourceRequest::new(method, uri, headers, body);
    dispatcher.act(&segments, request).await
}
