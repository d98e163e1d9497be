use std::sync::Arc;

use ssync_core::Server;
use tokio::signal;

#[cfg(unix)]
#[tracing::instrument(skip_all)]
pub(super) async fn signal(server: Arc<Server>) {
	use signal::unix::{self, SignalKind};

	let mut quit = unix::signal(SignalKind::quit()).expect("SIGQUIT handler");
	let mut term = unix::signal(SignalKind::terminate()).expect("SIGTERM handler");
	loop {
		let sig: &'static str;
		tokio::select! {
			_ = signal::ctrl_c() => { sig = "SIGINT"; },
			_ = quit.recv() => { sig = "SIGQUIT"; },
			_ = term.recv() => { sig = "SIGTERM"; },
		}

		tracing::warn!("Received {sig}");
		if let Err(e) = server.shutdown() {
			tracing::debug!(?sig, "signal: {e}");
		}
	}
}

#[cfg(not(unix))]
#[tracing::instrument(skip_all)]
pub(super) async fn signal(server: Arc<Server>) {
	if signal::ctrl_c().await.is_ok() {
		tracing::warn!("Received Ctrl+C");
		if let Err(e) = server.shutdown() {
			tracing::debug!("signal: {e}");
		}
	}
}
