//! Business logic sitting between the wire API and the store: the
//! accumulator, the global cache, the poller pool, and the connection
//! manager.
//!
//! A dynamic `Service`/`Dep<T>` registry makes sense when hundreds of
//! services depend on each other, but this crate's component graph is
//! small (four components, no cycles), so `Services` below just holds
//! plain `Arc`s — the registry's indirection would buy nothing here.

pub mod accumulator;
pub mod cache;
pub mod conn;
pub mod poller;
pub mod upstream;

use std::sync::Arc;

use ssync_core::{Config, Result};
use ssync_store::Store;

pub use accumulator::Accumulator;
pub use cache::Cache;
pub use conn::ConnManager;
pub use poller::PollerPool;
pub use upstream::UpstreamClient;

/// Owns every component and the order they're built in: store, then the
/// components that read it back at startup (cache), then the components
/// that drive it going forward (poller, conn).
pub struct Services {
	pub config: Arc<Config>,
	pub store: Store,
	pub cache: Arc<Cache>,
	pub accumulator: Arc<Accumulator>,
	pub upstream: Arc<UpstreamClient>,
	pub poller: Arc<PollerPool>,
	pub conn: Arc<ConnManager>,
}

impl Services {
	pub async fn build(config: Arc<Config>, store: Store) -> Result<Arc<Self>> {
		let cache = Arc::new(Cache::rebuild(&store).await?);
		let accumulator = Arc::new(Accumulator::new(
			store.clone(),
			Arc::clone(&cache),
			config.max_timeline_limit,
		));
		let upstream = Arc::new(UpstreamClient::new(&config.upstream_base_url)?);
		let conn = Arc::new(ConnManager::new(store.clone(), Arc::clone(&cache)));
		let poller = Arc::new(PollerPool::new(
			store.clone(),
			Arc::clone(&accumulator),
			Arc::clone(&upstream),
			Arc::clone(&conn),
			Arc::clone(&config),
		));

		Ok(Arc::new(Self {
			config,
			store,
			cache,
			accumulator,
			upstream,
			poller,
			conn,
		}))
	}
}
