use std::collections::BTreeMap;

use ruma::OwnedRoomId;

use crate::cache::RoomMetadata;

/// What a client asked to track for one room (from a list's
/// `RoomSubscription` template, or an explicit `room_subscriptions` entry).
#[derive(Debug, Clone, Default)]
pub struct RoomSubscription {
	pub timeline_limit: u32,
	/// `(type, state_key)`; `state_key == "*"` requested as `None` here
	/// means "any state key of this type".
	pub required_state: Vec<(String, Option<String>)>,
}

/// A ranged, sorted room list the client is windowing over.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
	pub ranges: Vec<(u32, u32)>,
	pub room_subscription: RoomSubscription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlidingOp {
	Sync,
	Insert,
	Delete,
	Invalidate,
}

#[derive(Debug, Clone)]
pub struct SlidingListUpdate {
	pub op: SlidingOp,
	pub range: Option<(u32, u32)>,
	pub room_ids: Vec<OwnedRoomId>,
}

#[derive(Debug, Clone, Default)]
pub struct RoomDelta {
	pub metadata: RoomMetadata,
	pub timeline_event_ids: Vec<String>,
	pub required_state_event_ids: Vec<String>,
	pub prev_batch: Option<String>,
	pub limited: bool,
}

/// Maps each absolute list index covered by `ranges` to the room id
/// currently sitting there in `sorted_room_ids`, clamped to the list's
/// actual length. The per-index form `diff_window` needs to tell which
/// positions actually changed.
#[must_use]
pub fn windowed_rooms(sorted_room_ids: &[OwnedRoomId], ranges: &[(u32, u32)]) -> BTreeMap<u32, OwnedRoomId> {
	let mut out = BTreeMap::new();
	for &(lo, hi) in ranges {
		let hi = (hi as usize).min(sorted_room_ids.len().saturating_sub(1));
		for idx in lo as usize..=hi {
			if let Some(room_id) = sorted_room_ids.get(idx) {
				out.insert(idx as u32, room_id.clone());
			}
		}
	}
	out
}

/// The room ids covered by `ranges`, in index order, flattened across every
/// range.
#[must_use]
pub fn rooms_in_window(sorted_room_ids: &[OwnedRoomId], ranges: &[(u32, u32)]) -> Vec<OwnedRoomId> {
	windowed_rooms(sorted_room_ids, ranges).into_values().collect()
}

/// Diffs the previous window against the new one, emitting SYNC for rooms
/// that entered a range and DELETE for indices that fell out of every
/// range — a minimal version of the op stream MSC3575 describes.
#[must_use]
pub fn diff_window(
	previous: &BTreeMap<u32, OwnedRoomId>,
	current: &BTreeMap<u32, OwnedRoomId>,
) -> Vec<SlidingListUpdate> {
	let mut ops = Vec::new();

	for (&idx, room_id) in current {
		if previous.get(&idx) != Some(room_id) {
			ops.push(SlidingListUpdate {
				op: SlidingOp::Sync,
				range: Some((idx, idx)),
				room_ids: vec![room_id.clone()],
			});
		}
	}

	for &idx in previous.keys() {
		if !current.contains_key(&idx) {
			ops.push(SlidingListUpdate {
				op: SlidingOp::Delete,
				range: Some((idx, idx)),
				room_ids: vec![],
			});
		}
	}

	ops
}

#[cfg(test)]
mod tests {
	use super::*;

	fn room(n: u32) -> OwnedRoomId { ruma::RoomId::parse(format!("!r{n}:example.org")).unwrap() }

	#[test]
	fn rooms_in_window_clamps_to_list_length() {
		let rooms = vec![room(0), room(1), room(2)];
		let got = rooms_in_window(&rooms, &[(0, 10)]);
		assert_eq!(got, rooms);
	}

	#[test]
	fn diff_window_emits_sync_for_changed_and_delete_for_dropped() {
		let mut previous = BTreeMap::new();
		previous.insert(0, room(1));
		previous.insert(1, room(2));

		let mut current = BTreeMap::new();
		current.insert(0, room(1));
		current.insert(1, room(3));

		let ops = diff_window(&previous, &current);
		assert_eq!(ops.len(), 1);
		assert_eq!(ops[0].op, SlidingOp::Sync);
	}
}
