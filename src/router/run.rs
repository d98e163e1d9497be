use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use axum_server::Handle as ServerHandle;
use ssync_core::{Result, Server};
use ssync_service::Services;
use ssync_store::Store;
use tokio::sync::broadcast;

use crate::serve;

/// Builds the event store and the component graph on top of it.
#[tracing::instrument(skip_all)]
pub async fn start(server: &Arc<Server>) -> Result<Arc<Services>> {
	tracing::debug!("Starting...");

	let store = Store::connect(&server.config.database_url).await?;
	let services = Services::build(Arc::new(server.config.clone()), store).await?;

	tracing::debug!("Started");
	Ok(services)
}

/// Main loop: runs the poller expiry sweep and the HTTP listener side by
/// side until a shutdown signal arrives.
#[tracing::instrument(skip_all)]
pub async fn run(server: &Arc<Server>, services: &Arc<Services>) -> Result<()> {
	tracing::debug!("Running");

	let handle = ServerHandle::new();
	let (tx, _) = broadcast::channel::<()>(1);

	let sigs = server.runtime().spawn(signal(Arc::clone(server), tx.clone(), handle.clone()));
	let sweeper = server.runtime().spawn(expire_sweep(Arc::clone(services), tx.subscribe()));

	let res = serve::serve(Arc::clone(server), Arc::clone(services), handle, tx.subscribe()).await;

	sigs.abort();
	let _ = sigs.await;
	sweeper.abort();
	let _ = sweeper.await;

	tracing::debug!("Finish");
	res
}

#[tracing::instrument(skip_all)]
pub async fn stop(_services: Arc<Services>) -> Result<()> {
	tracing::info!("Shutdown complete.");
	Ok(())
}

/// Periodically sweeps stale pollers until told to stop.
async fn expire_sweep(services: Arc<Services>, mut shutdown: broadcast::Receiver<()>) {
	let mut interval = tokio::time::interval(Duration::from_secs(60));
	loop {
		tokio::select! {
			_ = interval.tick() => {
				if let Err(e) = services.poller.expire_old_pollers().await {
					tracing::error!("poller expiry sweep failed: {e}");
				}
			}
			_ = shutdown.recv() => break,
		}
	}
}

#[tracing::instrument(skip_all)]
async fn signal(server: Arc<Server>, tx: broadcast::Sender<()>, handle: axum_server::Handle) {
	loop {
		let Ok(sig) = server.signal.subscribe().recv().await else {
			break;
		};

		if !server.running() {
			handle_shutdown(&server, &tx, &handle, sig).await;
			break;
		}
	}
}

async fn handle_shutdown(server: &Arc<Server>, tx: &broadcast::Sender<()>, handle: &axum_server::Handle, sig: &str) {
	tracing::debug!("Received signal {sig}");
	if let Err(e) = tx.send(()) {
		tracing::error!("failed sending shutdown transaction to channel: {e}");
	}

	let timeout = Duration::from_secs(30);
	tracing::debug!(
		?timeout,
		handle_active = ?server.requests_handle_active.load(Ordering::Relaxed),
		"Notifying for graceful shutdown"
	);

	handle.graceful_shutdown(Some(timeout));
}
