use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{Mutex as TokioMutex, OwnedMutexGuard};

/// Map of per-key async mutexes, grown lazily and pruned when a guard is the
/// last reference to its entry. Used to serialize per-room writes (the
/// accumulator) and to guard the pending-poller rendezvous (the poller
/// pool) without taking a single process-wide lock.
pub struct MutexMap<Key, Val> {
	map: Map<Key, Val>,
}

type Map<Key, Val> = Arc<StdMutex<HashMap<Key, Arc<TokioMutex<Val>>>>>;

pub struct Guard<Key, Val> {
	map: Map<Key, Val>,
	val: OwnedMutexGuard<Val>,
}

impl<Key, Val> MutexMap<Key, Val>
where
	Key: Clone + Eq + Hash,
	Val: Default,
{
	#[must_use]
	pub fn new() -> Self {
		Self {
			map: Arc::new(StdMutex::new(HashMap::new())),
		}
	}

	pub async fn lock(&self, key: &Key) -> Guard<Key, Val> {
		let val = self
			.map
			.lock()
			.expect("mutex map poisoned")
			.entry(key.clone())
			.or_default()
			.clone();

		Guard {
			map: Arc::clone(&self.map),
			val: val.lock_owned().await,
		}
	}

	#[must_use]
	pub fn len(&self) -> usize { self.map.lock().expect("mutex map poisoned").len() }

	#[must_use]
	pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl<Key, Val> Default for MutexMap<Key, Val>
where
	Key: Clone + Eq + Hash,
	Val: Default,
{
	fn default() -> Self { Self::new() }
}

impl<Key, Val> std::ops::Deref for Guard<Key, Val> {
	type Target = Val;

	fn deref(&self) -> &Val { &self.val }
}

impl<Key, Val> std::ops::DerefMut for Guard<Key, Val> {
	fn deref_mut(&mut self) -> &mut Val { &mut self.val }
}

impl<Key, Val> Drop for Guard<Key, Val> {
	fn drop(&mut self) {
		if Arc::strong_count(OwnedMutexGuard::mutex(&self.val)) <= 2 {
			self.map.lock().expect("mutex map poisoned").retain(|_, val| {
				!Arc::ptr_eq(val, OwnedMutexGuard::mutex(&self.val)) || Arc::strong_count(val) > 2
			});
		}
	}
}
