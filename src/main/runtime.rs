use std::time::Duration;

use ssync_core::Result;

const WORKER_NAME: &str = "sliding-sync:worker";
const WORKER_KEEPALIVE: u64 = 36;
const SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(10_000);

pub(super) fn new() -> Result<tokio::runtime::Runtime> {
	tokio::runtime::Builder::new_multi_thread()
		.enable_io()
		.enable_time()
		.thread_name(WORKER_NAME)
		.thread_keep_alive(Duration::from_secs(WORKER_KEEPALIVE))
		.build()
		.map_err(Into::into)
}

pub(super) fn shutdown(runtime: tokio::runtime::Runtime) {
	tracing::debug!(timeout = ?SHUTDOWN_TIMEOUT, "Waiting for runtime...");
	runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);
}
