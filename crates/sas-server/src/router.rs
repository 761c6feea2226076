use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use sas_types::StreamKind;

use crate::handler::{self, PageQuery};
use crate::state::AppState;

/// Build the axum router with every SAS endpoint.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(handler::health_handler))
        .route("/api/info", get(handler::info_handler));

    for kind in StreamKind::ALL {
        let path = format!("/api/user/:nickname/{}", kind.path());
        router = router.route(
            &path,
            get(
                move |state: State<AppState>,
                      nickname: Path<String>,
                      query: Result<Query<PageQuery>, QueryRejection>,
                      headers: HeaderMap| {
                    handler::stream_handler(kind, state, nickname, query, headers)
                },
            ),
        );
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
