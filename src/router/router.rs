use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use http::{StatusCode, Uri};
use ssync_service::Services;

pub(crate) fn build(services: &Arc<Services>) -> Router {
	Router::new()
		.route("/health", get(health))
		.route(
			"/_matrix/client/unstable/org.matrix.msc3575/sync",
			post(ssync_api::sync::handler),
		)
		.fallback(not_found)
		.with_state(Arc::clone(services))
}

async fn health() -> &'static str { "ok" }

async fn not_found(_uri: Uri) -> impl IntoResponse {
	(
		StatusCode::NOT_FOUND,
		Json(serde_json::json!({ "errcode": "M_UNRECOGNIZED", "error": "Unrecognized request" })),
	)
}
