use std::collections::HashMap;
use std::sync::RwLock;

use ruma::{OwnedRoomId, RoomId};
use ssync_core::Result;
use ssync_store::{rooms, snapshots, Store};

/// Everything the connection manager needs about a room without going
/// back to the store: counts, ordered hero candidates, and the handful of
/// metadata fields a client's room list sort/filter can reference.
#[derive(Debug, Clone, Default)]
pub struct RoomMetadata {
	pub joined_count: u64,
	pub invited_count: u64,
	/// All joined, then invited, then left member user ids, in that
	/// preference order, not yet capped or filtered for a requester — call
	/// [`RoomMetadata::heroes_for`] to get the wire-ready list.
	pub heroes: Vec<String>,
	pub name: Option<String>,
	pub canonical_alias: Option<String>,
	pub encryption: Option<String>,
	pub room_type: Option<String>,
	pub predecessor_room_id: Option<String>,
	pub successor_room_id: Option<String>,
	pub last_message_ts: Option<i64>,
}

impl RoomMetadata {
	/// Up to 5 heroes for `requester`, preferring joined over invited over
	/// left, excluding the requester's own membership.
	#[must_use]
	pub fn heroes_for(&self, requester: &str) -> Vec<String> {
		self.heroes.iter().filter(|user_id| user_id.as_str() != requester).take(5).cloned().collect()
	}
}

/// An in-memory `map<room_id, RoomMetadata>` owned by this value rather
/// than kept in process-wide global state — see DESIGN.md.
pub struct Cache {
	rooms: RwLock<HashMap<OwnedRoomId, RoomMetadata>>,
}

impl Cache {
	/// Rebuilds the whole cache from the store's current snapshots in one
	/// pass during `Services::build` startup, via a single transactional
	/// global snapshot.
	#[tracing::instrument(skip(store))]
	pub async fn rebuild(store: &Store) -> Result<Self> {
		let mut rooms = HashMap::new();
		for room_id in rooms::all_room_ids(store.pool()).await? {
			if let Ok(parsed) = RoomId::parse(&room_id) {
				let metadata = load_metadata(store, &room_id).await.unwrap_or_default();
				rooms.insert(parsed.to_owned(), metadata);
			}
		}

		tracing::debug!(num_rooms = rooms.len(), "cache rebuilt");
		Ok(Self {
			rooms: RwLock::new(rooms),
		})
	}

	#[must_use]
	pub fn get(&self, room_id: &RoomId) -> Option<RoomMetadata> {
		self.rooms.read().expect("cache poisoned").get(room_id).cloned()
	}

	/// Every known room id, most-recently-active first (ties broken by id for
	/// a deterministic order) — the universe a list's `ranges` window over.
	#[must_use]
	pub fn sorted_room_ids(&self) -> Vec<OwnedRoomId> {
		let rooms = self.rooms.read().expect("cache poisoned");
		let mut ids: Vec<OwnedRoomId> = rooms.keys().cloned().collect();
		ids.sort_by(|a, b| {
			let ts_a = rooms.get(a).and_then(|m| m.last_message_ts).unwrap_or(i64::MIN);
			let ts_b = rooms.get(b).and_then(|m| m.last_message_ts).unwrap_or(i64::MIN);
			ts_b.cmp(&ts_a).then_with(|| a.cmp(b))
		});
		ids
	}

	/// Invalidates and reloads one room's metadata. Called by the
	/// accumulator after any Accumulate/Initialise that touched metadata
	/// events or produced `IncludesStateRedaction`.
	#[tracing::instrument(skip(self, store))]
	pub async fn on_room_touched(&self, room_id: &str, store: &Store) -> Result<()> {
		let Ok(parsed) = RoomId::parse(room_id) else {
			return Ok(());
		};

		let metadata = load_metadata(store, room_id).await?;
		self.rooms
			.write()
			.expect("cache poisoned")
			.insert(parsed.to_owned(), metadata);

		Ok(())
	}
}

async fn load_metadata(store: &Store, room_id: &str) -> Result<RoomMetadata> {
	let mut txn = store.pool().begin().await?;
	let room = rooms::get(&mut txn, room_id).await?.unwrap_or_default();

	let (joined_count, invited_count, heroes) = if let Some(snapshot_id) = room.current_after_snapshot_id {
		let memberships = snapshots::membership_states(&mut txn, snapshot_id).await?;
		heroes_and_counts(&memberships)
	} else {
		(0, 0, Vec::new())
	};

	txn.commit().await?;

	Ok(RoomMetadata {
		joined_count,
		invited_count,
		heroes,
		encryption: room.encryption,
		room_type: room.room_type,
		canonical_alias: room.canonical_alias,
		predecessor_room_id: room.predecessor_room_id,
		successor_room_id: room.successor_room_id,
		..RoomMetadata::default()
	})
}

/// Join/invite counts, and every member ordered joined, then invited, then
/// left — the full hero candidate list a requester's own id is later
/// filtered out of, so it is deliberately left uncapped here.
fn heroes_and_counts(memberships: &[(String, Option<String>)]) -> (u64, u64, Vec<String>) {
	let mut joined = Vec::new();
	let mut invited = Vec::new();
	let mut left = Vec::new();

	for (user_id, membership) in memberships {
		match membership.as_deref() {
			Some("join") => joined.push(user_id.clone()),
			Some("invite") => invited.push(user_id.clone()),
			_ => left.push(user_id.clone()),
		}
	}

	let joined_count = joined.len() as u64;
	let invited_count = invited.len() as u64;

	let heroes = joined.iter().chain(invited.iter()).chain(left.iter()).cloned().collect();

	(joined_count, invited_count, heroes)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn heroes_prefer_joined_then_invited_then_left() {
		let memberships = vec![
			("@left:example.org".to_owned(), Some("leave".to_owned())),
			("@joined:example.org".to_owned(), Some("join".to_owned())),
			("@invited:example.org".to_owned(), Some("invite".to_owned())),
		];

		let (joined_count, invited_count, heroes) = heroes_and_counts(&memberships);
		assert_eq!(joined_count, 1);
		assert_eq!(invited_count, 1);
		assert_eq!(heroes, vec!["@joined:example.org", "@invited:example.org", "@left:example.org"]);
	}

	#[test]
	fn heroes_and_counts_is_uncapped() {
		let memberships: Vec<_> = (0..10)
			.map(|i| (format!("@u{i}:example.org"), Some("join".to_owned())))
			.collect();
		let (_, _, heroes) = heroes_and_counts(&memberships);
		assert_eq!(heroes.len(), 10);
	}

	#[test]
	fn heroes_for_caps_at_five() {
		let memberships: Vec<_> = (0..10)
			.map(|i| (format!("@u{i}:example.org"), Some("join".to_owned())))
			.collect();
		let (_, _, heroes) = heroes_and_counts(&memberships);
		let metadata = RoomMetadata { heroes, ..RoomMetadata::default() };
		assert_eq!(metadata.heroes_for("@someone-else:example.org").len(), 5);
	}

	#[test]
	fn heroes_for_excludes_requester() {
		let memberships = vec![
			("@alice:example.org".to_owned(), Some("join".to_owned())),
			("@bob:example.org".to_owned(), Some("join".to_owned())),
		];
		let (_, _, heroes) = heroes_and_counts(&memberships);
		let metadata = RoomMetadata { heroes, ..RoomMetadata::default() };
		assert_eq!(metadata.heroes_for("@alice:example.org"), vec!["@bob:example.org"]);
	}

	#[test]
	fn empty_cache_returns_none() {
		let cache = Cache {
			rooms: RwLock::new(HashMap::new()),
		};
		let room_id = RoomId::parse("!abc:example.org").unwrap();
		assert!(cache.get(&room_id).is_none());
	}
}
