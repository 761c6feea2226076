use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde::Deserialize;
use serde_json::json;

use sas_types::{PageWindow, StreamKind};

use crate::auth::Credentials;
use crate::error::{ServerError, ServerResult};
use crate::feed::Feed;
use crate::state::AppState;

/// Paging parameters accepted by every stream endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub count: Option<usize>,
    pub offset: Option<usize>,
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "sas-server",
        "version": env!("CARGO_PKG_VERSION"),
        "streams": StreamKind::ALL.iter().map(|k| k.path()).collect::<Vec<_>>(),
    }))
}

/// Serve one page of `nickname`'s `kind` stream, annotated for the caller.
///
/// The page and the viewer context are fetched concurrently; annotation
/// starts once both are in.
pub async fn stream_handler(
    kind: StreamKind,
    State(state): State<AppState>,
    Path(nickname): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
    headers: HeaderMap,
) -> ServerResult<Json<Feed>> {
    let Query(query) = query.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let window = PageWindow::clamped(
        query.offset,
        query.count,
        state.config.default_page_size,
        state.config.max_page_size,
    );
    let credentials = Credentials::from_headers(&headers)?;

    let (viewer, page) = tokio::try_join!(state.credentials.resolve(&credentials), async {
        state
            .streams
            .page(&nickname, kind, window)
            .await
            .map_err(ServerError::from)
    })?;

    let annotated = state.engine.annotate(page.items, kind, &viewer).await?;
    tracing::debug!(
        stream = %kind,
        owner = %page.owner,
        viewer = %viewer,
        items = annotated.items.len(),
        elapsed_us = annotated.elapsed.as_micros() as u64,
        "served stream page"
    );

    Ok(Json(Feed::new(
        &state.config.base_url,
        &nickname,
        kind,
        window,
        page.total_items,
        annotated.items,
    )))
}
