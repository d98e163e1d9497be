use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::routing::IntoMakeService;
use axum::Router;
use axum_server::{bind, Handle as ServerHandle};
use ssync_core::{Result, Server};

pub(super) async fn serve(
	server: &Arc<Server>,
	app: IntoMakeService<Router>,
	handle: ServerHandle,
	addr: SocketAddr,
) -> Result<()> {
	tracing::info!("Listening on {addr}");
	bind(addr).handle(handle).serve(app).await?;

	let handle_active = server.requests_handle_active.load(Ordering::Relaxed);
	tracing::debug!(
		handle_finished = server.requests_handle_finished.load(Ordering::Relaxed),
		panics = server.requests_panic.load(Ordering::Relaxed),
		handle_active,
		"Stopped listening on {addr}",
	);

	Ok(())
}
