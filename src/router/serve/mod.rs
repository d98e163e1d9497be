mod plain;

use std::sync::Arc;

use axum_server::Handle as ServerHandle;
use ssync_core::{Result, Server};
use ssync_service::Services;
use tokio::sync::broadcast;

use super::layers;

/// Serve clients. No TLS or unix-socket listener here — this proxy sits
/// behind the same reverse proxy that terminates TLS for the homeserver it
/// polls.
pub(super) async fn serve(
	server: Arc<Server>,
	services: Arc<Services>,
	handle: ServerHandle,
	_shutdown: broadcast::Receiver<()>,
) -> Result<()> {
	let app = layers::build(&server, &services)?;
	let addr = server
		.config
		.listen_addr
		.parse()
		.map_err(|e| ssync_core::err!("invalid listen_addr {:?}: {e}", server.config.listen_addr))?;
	plain::serve(&server, app, handle, addr).await
}
