pub mod projection;

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use ruma::{OwnedDeviceId, OwnedRoomId, OwnedUserId, RoomId};
use ssync_core::{err, Error, Result};
use ssync_store::models::Nid;
use ssync_store::Store;
use tokio::sync::Notify;

pub use projection::{ListParams, RoomDelta, RoomSubscription, SlidingListUpdate, SlidingOp};

use crate::cache::Cache;

type ConnKey = (OwnedUserId, OwnedDeviceId, String);

/// Sticky per-connection parameters: lists/subscriptions persist across
/// requests, merged request-over-request, unless the client overrides
/// them.
#[derive(Default)]
struct ConnState {
	pos_counter: u64,
	lists: BTreeMap<String, ListParams>,
	subscriptions: BTreeMap<OwnedRoomId, RoomSubscription>,
	known_versions: BTreeMap<OwnedRoomId, Nid>,
	/// Each list's window as of the last response sent, keyed by absolute
	/// index — the baseline `diff_window` compares the next computed window
	/// against to decide what ops to emit.
	list_windows: BTreeMap<String, BTreeMap<u32, OwnedRoomId>>,
	destroyed: bool,
}

pub struct SyncRequest {
	pub conn_id: String,
	pub pos: Option<String>,
	pub lists: BTreeMap<String, ListParams>,
	pub room_subscriptions: BTreeMap<OwnedRoomId, RoomSubscription>,
	pub timeout: Duration,
}

pub struct SyncResponse {
	pub pos: String,
	pub list_ops: BTreeMap<String, Vec<SlidingListUpdate>>,
	pub rooms: BTreeMap<OwnedRoomId, RoomDelta>,
}

/// One server epoch per process start; a `pos` embeds that epoch plus a
/// per-conn load counter so a position from a previous process (or a
/// stale/concurrent one) is always rejected as `UNKNOWN_POS` rather than
/// silently misinterpreted.
pub struct ConnManager {
	store: Store,
	cache: Arc<Cache>,
	epoch: u64,
	connections: StdMutex<HashMap<ConnKey, Arc<StdMutex<ConnState>>>>,
	room_versions: StdMutex<HashMap<OwnedRoomId, Nid>>,
	changed: Notify,
}

impl ConnManager {
	#[must_use]
	pub fn new(store: Store, cache: Arc<Cache>) -> Self {
		let epoch = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
		Self {
			store,
			cache,
			epoch,
			connections: StdMutex::new(HashMap::new()),
			room_versions: StdMutex::new(HashMap::new()),
			changed: Notify::new(),
		}
	}

	/// Long-polls up to `request.timeout` for new data, merges sticky
	/// parameters, and enforces position discipline.
	#[tracing::instrument(skip(self, request))]
	pub async fn handle(
		&self,
		user_id: OwnedUserId,
		device_id: OwnedDeviceId,
		request: SyncRequest,
	) -> Result<SyncResponse> {
		let key = (user_id, device_id, request.conn_id.clone());
		let state = self.state_for(&key, request.pos.as_deref())?;
		let user_id = key.0.clone();

		{
			let mut state = state.lock().expect("conn state poisoned");
			for (name, params) in request.lists {
				state.lists.insert(name, params);
			}
			state.subscriptions.extend(request.room_subscriptions);
		}

		let deadline = Instant::now() + request.timeout;
		loop {
			let delta = self.compute_delta(&state, &user_id).await?;
			if !delta.rooms.is_empty() || request.timeout.is_zero() {
				let mut state = state.lock().expect("conn state poisoned");
				if state.destroyed {
					self.connections.lock().expect("conn map poisoned").remove(&key);
					return Err(err!(UnknownPos));
				}
				state.pos_counter += 1;
				for (room_id, _) in &delta.rooms {
					if let Some(&version) = self.room_versions.lock().expect("poisoned").get(room_id) {
						state.known_versions.insert(room_id.clone(), version);
					}
				}
				let pos = encode_pos(self.epoch, state.pos_counter);
				return Ok(SyncResponse {
					pos,
					list_ops: delta.list_ops,
					rooms: delta.rooms,
				});
			}

			let remaining = deadline.saturating_duration_since(Instant::now());
			if remaining.is_zero() {
				let mut state = state.lock().expect("conn state poisoned");
				state.pos_counter += 1;
				let pos = encode_pos(self.epoch, state.pos_counter);
				return Ok(SyncResponse {
					pos,
					list_ops: BTreeMap::new(),
					rooms: BTreeMap::new(),
				});
			}

			let _ = tokio::time::timeout(remaining, self.changed.notified()).await;
		}
	}

	fn state_for(&self, key: &ConnKey, pos: Option<&str>) -> Result<Arc<StdMutex<ConnState>>> {
		let mut connections = self.connections.lock().expect("conn map poisoned");

		match pos {
			None | Some("") => {
				let state = Arc::new(StdMutex::new(ConnState::default()));
				connections.insert(key.clone(), Arc::clone(&state));
				Ok(state)
			},
			Some(pos) => {
				let (epoch, counter) = decode_pos(pos)?;
				let Some(state) = connections.get(key) else {
					return Err(err!(UnknownPos));
				};
				let matches = {
					let guard = state.lock().expect("conn state poisoned");
					!guard.destroyed && epoch == self.epoch && counter == guard.pos_counter
				};
				if !matches {
					connections.remove(key);
					return Err(err!(UnknownPos));
				}
				Ok(Arc::clone(state))
			},
		}
	}

	/// For every list, diffs its newly-computed window against the window
	/// sent last response to produce `list_ops`; for every room whose
	/// version moved past what this conn last saw — whether surfaced by a
	/// list window or an explicit subscription — builds a [`RoomDelta`]
	/// carrying cache metadata plus the timeline/required-state event ids
	/// the room's effective subscription asks for. Bodies are hydrated back
	/// to JSON by the `api` layer.
	async fn compute_delta(
		&self,
		state: &Arc<StdMutex<ConnState>>,
		user_id: &ruma::UserId,
	) -> Result<DeltaAccum> {
		let sorted_room_ids = self.cache.sorted_room_ids();

		let (list_ops, changed): (BTreeMap<String, Vec<SlidingListUpdate>>, Vec<(OwnedRoomId, RoomSubscription)>) = {
			let mut state = state.lock().expect("conn state poisoned");
			let versions = self.room_versions.lock().expect("poisoned");

			let mut list_ops = BTreeMap::new();
			let mut from_lists: Vec<OwnedRoomId> = Vec::new();

			let list_names: Vec<String> = state.lists.keys().cloned().collect();
			for name in list_names {
				let ranges = state.lists.get(&name).map(|params| params.ranges.clone()).unwrap_or_default();
				let window = projection::windowed_rooms(&sorted_room_ids, &ranges);
				from_lists.extend(window.values().cloned());

				let previous = state.list_windows.get(&name).cloned().unwrap_or_default();
				let ops = projection::diff_window(&previous, &window);
				if !ops.is_empty() {
					list_ops.insert(name.clone(), ops);
				}
				state.list_windows.insert(name, window);
			}

			let mut candidates: Vec<OwnedRoomId> = state.subscriptions.keys().cloned().collect();
			candidates.extend(from_lists);
			candidates.sort();
			candidates.dedup();

			let changed = candidates
				.into_iter()
				.filter(|room_id| {
					let current_version = versions.get(room_id).copied();
					let known = state.known_versions.get(room_id).copied();
					current_version.is_some() && current_version != known
				})
				.filter_map(|room_id| {
					let subscription = effective_subscription(&state, &room_id);
					subscription.map(|sub| (room_id, sub))
				})
				.collect();

			(list_ops, changed)
		};

		let mut rooms = BTreeMap::new();
		for (room_id, subscription) in changed {
			let Some(mut metadata) = self.cache.get(&room_id) else { continue };
			metadata.heroes = metadata.heroes_for(user_id.as_str());

			let (timeline, limited) = ssync_store::events::timeline_tail(
				self.store.pool(),
				room_id.as_str(),
				subscription.timeline_limit,
			)
			.await?;
			let prev_batch = if limited {
				ssync_store::rooms::last_prev_batch(self.store.pool(), room_id.as_str()).await?
			} else {
				None
			};

			let required_state = ssync_store::events::required_state(
				self.store.pool(),
				room_id.as_str(),
				&subscription.required_state,
			)
			.await?;

			rooms.insert(
				room_id,
				RoomDelta {
					metadata,
					timeline_event_ids: timeline.into_iter().map(|row| row.event_id).collect(),
					required_state_event_ids: required_state.into_iter().map(|row| row.event_id).collect(),
					prev_batch,
					limited,
				},
			);
		}

		Ok(DeltaAccum { list_ops, rooms })
	}

	/// Called by the accumulator/poller whenever new timeline NIDs land for
	/// a room, and by `EnsurePolling`'s accelerated path. Bumps the room's
	/// version and wakes every long-polling conn.
	pub fn notify_room_nids(&self, room_id: &str, nids: &[Nid]) {
		let Ok(room_id) = RoomId::parse(room_id) else { return };
		let Some(&max_nid) = nids.iter().max() else { return };

		self.room_versions
			.lock()
			.expect("poisoned")
			.entry(room_id.to_owned())
			.and_modify(|v| *v = (*v).max(max_nid))
			.or_insert(max_nid);

		self.changed.notify_waiters();
	}

	/// Destroys every conn tracking `room_id` because `Initialise` replaced
	/// its snapshot from a gappy timeline. The
	/// client's next request carries a now-stale `pos`, forcing a full
	/// rebuild.
	pub fn invalidate_for_gap(&self, room_id: &RoomId) {
		let connections = self.connections.lock().expect("conn map poisoned");
		for (key, state) in connections.iter() {
			if key.0.as_str().is_empty() {
				continue;
			}
			let mut state = state.lock().expect("conn state poisoned");
			if state.subscriptions.contains_key(room_id) || !state.lists.is_empty() {
				state.destroyed = true;
			}
		}
		drop(connections);
		self.changed.notify_waiters();
	}

	/// Called when a device's upstream token expires — tears down every
	/// conn for that device.
	pub fn destroy_device_connections(&self, user_id: &ruma::UserId, device_id: &ruma::DeviceId) {
		let connections = self.connections.lock().expect("conn map poisoned");
		for (key, state) in connections.iter() {
			if key.0 == user_id && key.1 == device_id {
				state.lock().expect("conn state poisoned").destroyed = true;
			}
		}
		drop(connections);
		self.changed.notify_waiters();
	}
}

/// A room's effective [`RoomSubscription`]: an explicit `room_subscriptions`
/// entry wins outright; otherwise every list's subscription template that
/// mentions this conn is merged (timeline limit takes the max, required
/// state is unioned) since this engine doesn't track per-list window
/// membership precisely enough to pick a single owning list.
fn effective_subscription(state: &ConnState, room_id: &OwnedRoomId) -> Option<RoomSubscription> {
	if let Some(sub) = state.subscriptions.get(room_id) {
		return Some(sub.clone());
	}

	if state.lists.is_empty() {
		return None;
	}

	let mut merged = RoomSubscription::default();
	for params in state.lists.values() {
		merged.timeline_limit = merged.timeline_limit.max(params.room_subscription.timeline_limit);
		for entry in &params.room_subscription.required_state {
			if !merged.required_state.contains(entry) {
				merged.required_state.push(entry.clone());
			}
		}
	}

	Some(merged)
}

struct DeltaAccum {
	list_ops: BTreeMap<String, Vec<SlidingListUpdate>>,
	rooms: BTreeMap<OwnedRoomId, RoomDelta>,
}

fn encode_pos(epoch: u64, counter: u64) -> String { format!("{epoch}_{counter}") }

fn decode_pos(pos: &str) -> Result<(u64, u64)> {
	let (epoch, counter) = pos.split_once('_').ok_or_else(|| err!(UnknownPos))?;
	let epoch = epoch.parse().map_err(|_| err!(UnknownPos))?;
	let counter = counter.parse().map_err(|_| err!(UnknownPos))?;
	Ok((epoch, counter))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pos_roundtrips() {
		assert_eq!(decode_pos(&encode_pos(7, 42)).unwrap(), (7, 42));
	}

	#[test]
	fn malformed_pos_is_unknown_pos() {
		assert!(matches!(decode_pos("not-a-pos"), Err(Error::UnknownPos)));
	}
}
