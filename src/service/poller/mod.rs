mod state_machine;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use ruma::{OwnedDeviceId, OwnedUserId};
use ssync_core::Config;
use tokio::sync::watch;

use crate::accumulator::Accumulator;
use crate::conn::ConnManager;
use crate::upstream::UpstreamClient;

type Key = (OwnedUserId, OwnedDeviceId);

/// One entry per currently-running poller task. `outcome` carries the
/// `EnsurePolling` rendezvous result; `stop` lets `ExpireOldPollers`/
/// `OnExpiredToken` ask a running task to exit at its next loop iteration
/// without waiting for a network timeout.
struct PollerHandle {
	outcome: watch::Sender<Option<bool>>,
	stop: AtomicBool,
}

/// One cooperative task per (user, device); see
/// `state_machine` for the loop body.
pub struct PollerPool {
	store: ssync_store::Store,
	accumulator: Arc<Accumulator>,
	upstream: Arc<UpstreamClient>,
	conn: Arc<ConnManager>,
	config: Arc<Config>,
	active: StdMutex<HashMap<Key, Arc<PollerHandle>>>,
}

impl PollerPool {
	#[must_use]
	pub fn new(
		store: ssync_store::Store,
		accumulator: Arc<Accumulator>,
		upstream: Arc<UpstreamClient>,
		conn: Arc<ConnManager>,
		config: Arc<Config>,
	) -> Self {
		Self {
			store,
			accumulator,
			upstream,
			conn,
			config,
			active: StdMutex::new(HashMap::new()),
		}
	}

	/// Resolves true only once the poller for this device has
	/// completed at least one upstream sync; false if it failed with an
	/// auth error before that point. Reuses the already-running poller
	/// (and its already-resolved outcome) when one exists for the device.
	#[tracing::instrument(skip(self, token))]
	pub async fn ensure_polling(
		self: &Arc<Self>,
		user_id: OwnedUserId,
		device_id: OwnedDeviceId,
		token: String,
	) -> bool {
		let key = (user_id.clone(), device_id.clone());

		let handle = {
			let mut active = self.active.lock().expect("poller map poisoned");
			if let Some(handle) = active.get(&key) {
				Arc::clone(handle)
			} else {
				let (tx, _rx) = watch::channel(None);
				let handle = Arc::new(PollerHandle {
					outcome: tx,
					stop: AtomicBool::new(false),
				});
				active.insert(key.clone(), Arc::clone(&handle));

				let pool = Arc::clone(self);
				let spawn_key = key.clone();
				let spawn_handle = Arc::clone(&handle);
				tokio::spawn(async move {
					state_machine::run(pool, spawn_key, token, spawn_handle).await;
				});

				handle
			}
		};

		let mut rx = handle.outcome.subscribe();
		loop {
			if let Some(result) = *rx.borrow() {
				return result;
			}
			if rx.changed().await.is_err() {
				return false;
			}
		}
	}

	/// Removes the entry for `key` from the active map, but only if it is
	/// still the same task's handle — guards against a just-spawned
	/// replacement being clobbered by a slow-to-clean-up predecessor.
	fn retire(&self, key: &Key, handle: &Arc<PollerHandle>) {
		let mut active = self.active.lock().expect("poller map poisoned");
		if active.get(key).is_some_and(|current| Arc::ptr_eq(current, handle)) {
			active.remove(key);
		}
	}

	/// Stops pollers whose token has not been seen in
	/// `token_expire_secs`.
	#[tracing::instrument(skip(self))]
	pub async fn expire_old_pollers(&self) -> ssync_core::Result<()> {
		let expire_secs = i64::try_from(self.config.token_expire_secs).unwrap_or(i64::MAX);
		let stale = ssync_store::tokens::stale(self.store.pool(), expire_secs).await?;

		let active = self.active.lock().expect("poller map poisoned");
		for row in stale {
			let Ok(user_id) = ruma::UserId::parse(&row.user_id) else { continue };
			let Ok(device_id) = <&ruma::DeviceId>::try_from(row.device_id.as_str()) else { continue };
			let key = (user_id.to_owned(), device_id.to_owned());
			if let Some(handle) = active.get(&key) {
				handle.stop.store(true, Ordering::Relaxed);
			}
		}

		Ok(())
	}

	/// Invoked by the poller loop itself on a 401. Tears down
	/// any client connections tracking this device so their next request
	/// re-authenticates.
	pub async fn on_expired_token(&self, user_id: &ruma::UserId, device_id: &ruma::DeviceId, token: &str) {
		let _ = ssync_store::tokens::remove(self.store.pool(), token).await;
		self.conn.destroy_device_connections(user_id, device_id);
	}
}
