use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::{Method, StatusCode, Uri};
use ssync_core::Server;

#[tracing::instrument(skip_all, name = "handle")]
pub(crate) async fn handle(
	State(server): State<Arc<Server>>,
	req: http::Request<axum::body::Body>,
	next: axum::middleware::Next,
) -> Result<Response, StatusCode> {
	if !server.running() {
		tracing::debug!(method = %req.method(), uri = %req.uri(), "unavailable pending shutdown");
		return Err(StatusCode::SERVICE_UNAVAILABLE);
	}

	server.requests_handle_active.fetch_add(1, Ordering::Relaxed);
	let method = req.method().clone();
	let uri = req.uri().clone();
	let result = next.run(req).await;
	server.requests_handle_active.fetch_sub(1, Ordering::Relaxed);
	server.requests_handle_finished.fetch_add(1, Ordering::Relaxed);

	Ok(handle_result(&method, &uri, result))
}

fn handle_result(method: &Method, uri: &Uri, result: Response) -> Response {
	let status = result.status();
	let reason = status.canonical_reason().unwrap_or("Unknown Reason");
	let code = status.as_u16();
	if status.is_server_error() {
		tracing::error!(%method, %uri, "{code} {reason}");
	} else if status.is_client_error() {
		tracing::debug!(%method, %uri, "{code} {reason}");
	}

	if status == StatusCode::METHOD_NOT_ALLOWED {
		return (
			StatusCode::METHOD_NOT_ALLOWED,
			axum::Json(serde_json::json!({ "errcode": "M_UNRECOGNIZED", "error": "Method not allowed" })),
		)
			.into_response();
	}

	result
}

#[cfg(test)]
mod tests {
	use http_body_util::BodyExt as _;

	use super::*;

	fn get(uri: &str) -> (Method, Uri) { (Method::GET, uri.parse().unwrap()) }

	#[tokio::test]
	async fn method_not_allowed_gets_a_json_body() {
		let (method, uri) = get("/sync");
		let response = handle_result(&method, &uri, StatusCode::METHOD_NOT_ALLOWED.into_response());

		assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
		let body = response.into_body().collect().await.unwrap().to_bytes();
		let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
		assert_eq!(json["errcode"], "M_UNRECOGNIZED");
	}

	#[tokio::test]
	async fn other_statuses_pass_through_unchanged() {
		let (method, uri) = get("/sync");
		let response = handle_result(&method, &uri, StatusCode::OK.into_response());
		assert_eq!(response.status(), StatusCode::OK);
	}
}
