use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::SystemTime;

use tokio::runtime;
use tokio::sync::broadcast;

use crate::{err, Config, Result};

/// Process-wide handle shared by the router, the poller pool, and `main`.
/// Holds configuration, the shutdown/restart signal, and a few request
/// counters used for logging on exit.
pub struct Server {
	pub config: Config,

	/// Timestamp the server was started; used for uptime reporting.
	pub started: SystemTime,

	/// Set once shutdown has been requested; observed by the serve loop.
	pub stopping: AtomicBool,

	/// Set when a restart (rather than a plain shutdown) was requested.
	pub restarting: AtomicBool,

	pub runtime: Option<runtime::Handle>,

	/// Broadcast used to wake every task selecting on shutdown.
	pub signal: broadcast::Sender<&'static str>,

	pub requests_handle_active: AtomicU32,
	pub requests_handle_finished: AtomicU32,
	pub requests_panic: AtomicU32,
}

impl Server {
	#[must_use]
	pub fn new(config: Config, runtime: Option<runtime::Handle>) -> Self {
		Self {
			config,
			started: SystemTime::now(),
			stopping: AtomicBool::new(false),
			restarting: AtomicBool::new(false),
			runtime,
			signal: broadcast::channel::<&'static str>(1).0,
			requests_handle_active: AtomicU32::new(0),
			requests_handle_finished: AtomicU32::new(0),
			requests_panic: AtomicU32::new(0),
		}
	}

	pub fn restart(&self) -> Result<()> {
		if self.restarting.swap(true, Ordering::AcqRel) {
			return Err(err!("restart already in progress"));
		}

		self.shutdown()
	}

	pub fn shutdown(&self) -> Result<()> {
		if self.stopping.swap(true, Ordering::AcqRel) {
			return Err(err!("shutdown already in progress"));
		}

		self.signal("SIGTERM")
	}

	pub fn signal(&self, sig: &'static str) -> Result<()> {
		self.signal
			.send(sig)
			.map_err(|e| err!("failed to send signal: {e}"))?;

		Ok(())
	}

	#[inline]
	pub fn runtime(&self) -> &runtime::Handle {
		self.runtime
			.as_ref()
			.expect("runtime handle available in Server")
	}

	#[inline]
	pub fn running(&self) -> bool { !self.stopping.load(Ordering::Acquire) }
}
