use std::any::Any;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::MatchedPath;
use axum::Router;
use http::header::{self, HeaderName};
use http::{HeaderValue, Method, StatusCode};
use ssync_core::Server;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::ServiceBuilderExt as _;
use tracing::Level;

use crate::{request, router};

pub(crate) fn build(server: &Arc<Server>, services: &Arc<ssync_service::Services>) -> io::Result<axum::routing::IntoMakeService<Router>> {
	let layers = ServiceBuilder::new()
		.sensitive_headers([header::AUTHORIZATION])
		.layer(axum::middleware::from_fn_with_state(Arc::clone(server), request::handle))
		.layer(
			TraceLayer::new_for_http()
				.make_span_with(tracing_span::<_>)
				.on_failure(DefaultOnFailure::new().level(Level::ERROR))
				.on_request(DefaultOnRequest::new().level(Level::TRACE))
				.on_response(DefaultOnResponse::new().level(Level::DEBUG)),
		)
		.layer(SetResponseHeaderLayer::if_not_present(
			header::X_CONTENT_TYPE_OPTIONS,
			HeaderValue::from_static("nosniff"),
		))
		.layer(SetResponseHeaderLayer::if_not_present(
			header::X_FRAME_OPTIONS,
			HeaderValue::from_static("DENY"),
		))
		.layer(cors_layer())
		.layer(CatchPanicLayer::custom(catch_panic));

	let routes = router::build(services);
	Ok(routes.layer(layers).into_make_service())
}

fn cors_layer() -> CorsLayer {
	const METHODS: [Method; 4] = [Method::GET, Method::HEAD, Method::POST, Method::OPTIONS];

	let headers: [HeaderName; 3] = [header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION];

	CorsLayer::new()
		.allow_origin(cors::Any)
		.allow_methods(METHODS)
		.allow_headers(headers)
		.max_age(Duration::from_secs(86400))
}

#[tracing::instrument(skip_all)]
fn catch_panic(err: Box<dyn Any + Send + 'static>) -> http::Response<http_body_util::Full<bytes::Bytes>> {
	let details = if let Some(s) = err.downcast_ref::<String>() {
		s.clone()
	} else if let Some(s) = err.downcast_ref::<&str>() {
		(*s).to_owned()
	} else {
		"Unknown internal server error occurred.".to_owned()
	};

	let body = serde_json::json!({
		"errcode": "M_UNKNOWN",
		"error": "Internal server error occurred",
		"details": details,
	})
	.to_string();

	http::Response::builder()
		.status(StatusCode::INTERNAL_SERVER_ERROR)
		.header(header::CONTENT_TYPE, "application/json")
		.body(http_body_util::Full::from(body))
		.expect("static response is always a valid http::Response")
}

fn tracing_span<T>(request: &http::Request<T>) -> tracing::Span {
	let path = request
		.extensions()
		.get::<MatchedPath>()
		.map_or_else(|| request.uri().path(), MatchedPath::as_str);

	tracing::info_span!("router", %path)
}
