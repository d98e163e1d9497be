use std::collections::HashSet;
use std::sync::Arc;

use ssync_core::utils::MutexMap;
use ssync_core::{err, Result};
use ssync_store::models::{InsertedEvent, NewEvent, Nid, SnapshotRow};
use ssync_store::{events, rooms, snapshots, Store};

use crate::cache::Cache;

/// One state or timeline event as seen by the accumulator, before it has a
/// NID.
#[derive(Debug, Clone)]
pub struct EventInput {
	pub event_id: String,
	pub event_type: String,
	pub state_key: Option<String>,
	pub sender: String,
	pub origin_server_ts: i64,
	pub content: serde_json::Value,
	pub is_state: bool,
}

impl EventInput {
	fn is_membership(&self) -> bool { self.event_type == "m.room.member" }

	fn as_new_event(&self) -> NewEvent<'_> {
		NewEvent {
			event_id: &self.event_id,
			event_type: &self.event_type,
			state_key: self.state_key.as_deref(),
			sender: &self.sender,
			origin_server_ts: self.origin_server_ts,
			content: &self.content,
			is_state: self.is_state,
		}
	}
}

#[derive(Debug, Clone)]
pub struct TimelineInput {
	pub events: Vec<EventInput>,
	pub limited: bool,
	pub prev_batch: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct InitialiseResult {
	pub added_events: bool,
	pub replaced_existing_snapshot: bool,
	pub snapshot_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct AccumulateResult {
	pub num_new: usize,
	pub timeline_nids: Vec<Nid>,
	pub includes_state_redaction: bool,
}

/// Serializes writes to one room with an in-process
/// [`MutexMap`] guard held for the duration of the store transaction, so
/// concurrent Accumulate/Initialise calls for the same room never race
/// each other even before the DB's row lock is taken.
pub struct Accumulator {
	store: Store,
	cache: Arc<Cache>,
	locks: MutexMap<String, ()>,
	max_timeline_limit: u32,
}

impl Accumulator {
	#[must_use]
	pub fn new(store: Store, cache: Arc<Cache>, max_timeline_limit: u32) -> Self {
		Self {
			store,
			cache,
			locks: MutexMap::new(),
			max_timeline_limit,
		}
	}

	/// Replaces a room's current snapshot wholesale from a fresh state block.
	#[tracing::instrument(skip(self, state), fields(room_id, num_state = state.len()))]
	pub async fn initialise(&self, room_id: &str, state: Vec<EventInput>) -> Result<InitialiseResult> {
		let _guard = self.locks.lock(&room_id.to_owned()).await;
		let mut txn = self.store.begin_room_txn(room_id).await?;

		let has_create = state.iter().any(|e| e.event_type == "m.room.create");
		let previous = rooms::get(&mut txn, room_id).await?;
		let room_known = previous.as_ref().is_some_and(|r| r.current_after_snapshot_id.is_some());

		if !room_known && !has_create {
			return Err(err!("cannot initialise unknown room without m.room.create"));
		}

		let inserted = events::insert_events(&mut txn, room_id, &new_events(&state)).await?;
		let any_new = inserted.iter().any(|e| e.newly_inserted);

		if !room_known {
			let (membership, other) = partition(&state, &inserted);
			let snapshot_id = snapshots::create_snapshot(&mut txn, room_id, &membership, &other).await?;
			snapshots::set_current_snapshot(&mut txn, room_id, snapshot_id).await?;
			txn.commit().await?;

			self.cache.on_room_touched(room_id, &self.store).await?;

			return Ok(InitialiseResult {
				added_events: true,
				replaced_existing_snapshot: false,
				snapshot_id,
			});
		}

		if !any_new {
			txn.commit().await?;
			return Ok(InitialiseResult {
				added_events: false,
				replaced_existing_snapshot: false,
				snapshot_id: previous
					.and_then(|r| r.current_after_snapshot_id)
					.unwrap_or_default(),
			});
		}

		let current_id = previous
			.and_then(|r| r.current_after_snapshot_id)
			.ok_or_else(|| err!("room marked known but has no current snapshot"))?;
		let current = snapshots::get_snapshot(&mut txn, current_id).await?;
		let (membership, other) = overlay(&mut txn, &current, &state, &inserted).await?;
		let snapshot_id = snapshots::create_snapshot(&mut txn, room_id, &membership, &other).await?;
		snapshots::set_current_snapshot(&mut txn, room_id, snapshot_id).await?;
		txn.commit().await?;

		self.cache.on_room_touched(room_id, &self.store).await?;

		Ok(InitialiseResult {
			added_events: true,
			replaced_existing_snapshot: true,
			snapshot_id,
		})
	}

	/// Appends a room's new timeline events and folds any new state into a
	/// fresh snapshot.
	#[tracing::instrument(skip(self, timeline), fields(room_id, limited = timeline.limited))]
	pub async fn accumulate(&self, room_id: &str, timeline: TimelineInput) -> Result<AccumulateResult> {
		let _guard = self.locks.lock(&room_id.to_owned()).await;
		let mut txn = self.store.begin_room_txn(room_id).await?;

		let inserted = events::insert_events(&mut txn, room_id, &new_events(&timeline.events)).await?;
		let timeline_nids: Vec<Nid> = inserted.iter().map(|e| e.nid).collect();
		let num_new = inserted.iter().filter(|e| e.newly_inserted).count();

		let new_state: Vec<EventInput> = timeline
			.events
			.iter()
			.zip(inserted.iter())
			.filter(|(e, ins)| e.is_state && ins.newly_inserted)
			.map(|(e, _)| e.clone())
			.collect();

		let current_id = snapshots::select_current_snapshot(&mut txn, room_id).await?;

		let (current_membership, current_other) = if !new_state.is_empty() {
			let new_inserted: Vec<InsertedEvent> = inserted
				.iter()
				.zip(timeline.events.iter())
				.filter(|(ins, e)| e.is_state && ins.newly_inserted)
				.map(|(ins, _)| *ins)
				.collect();

			let (membership, other) = if let Some(current_id) = current_id {
				let current = snapshots::get_snapshot(&mut txn, current_id).await?;
				overlay(&mut txn, &current, &new_state, &new_inserted).await?
			} else {
				partition(&new_state, &new_inserted)
			};

			let snapshot_id = snapshots::create_snapshot(&mut txn, room_id, &membership, &other).await?;
			snapshots::set_current_snapshot(&mut txn, room_id, snapshot_id).await?;

			(membership, other)
		} else if let Some(current_id) = current_id {
			let current = snapshots::get_snapshot(&mut txn, current_id).await?;
			(current.membership_nids, current.other_nids)
		} else {
			(Vec::new(), Vec::new())
		};

		let includes_state_redaction = includes_state_redaction(
			&mut txn,
			room_id,
			&timeline.events,
			&inserted,
			&current_membership,
			&current_other,
		)
		.await?;

		if timeline.limited {
			if let Some(first) = timeline.events.first() {
				events::mark_missing_previous(&mut txn, &first.event_id).await?;
			}
		}

		if let Some(prev_batch) = &timeline.prev_batch {
			rooms::set_prev_batch(&mut txn, room_id, prev_batch).await?;
		}

		snapshots::compact(&mut txn, room_id, self.max_timeline_limit).await?;

		txn.commit().await?;

		if includes_state_redaction || !new_state.is_empty() {
			self.cache.on_room_touched(room_id, &self.store).await?;
		}

		Ok(AccumulateResult {
			num_new,
			timeline_nids,
			includes_state_redaction,
		})
	}
}

/// True iff any newly-inserted event in `events` is a redaction whose
/// `content.redacts` targets an event that is part of the final current
/// snapshot (`current_membership`/`current_other`), not merely any
/// redaction seen in the timeline.
async fn includes_state_redaction(
	txn: &mut sqlx::Transaction<'_, sqlx::Postgres>,
	room_id: &str,
	events: &[EventInput],
	inserted: &[InsertedEvent],
	current_membership: &[Nid],
	current_other: &[Nid],
) -> Result<bool> {
	let redacted_targets: Vec<String> = events
		.iter()
		.zip(inserted.iter())
		.filter(|(event, ins)| ins.newly_inserted && event.event_type == "m.room.redaction")
		.filter_map(|(event, _)| event.content.get("redacts").and_then(serde_json::Value::as_str))
		.map(str::to_owned)
		.collect();

	if redacted_targets.is_empty() {
		return Ok(false);
	}

	let target_nids = events::nids_by_event_ids(txn, room_id, &redacted_targets).await?;
	let snapshot_nids: HashSet<Nid> = current_membership.iter().chain(current_other.iter()).copied().collect();
	Ok(target_nids.iter().any(|(_, nid)| snapshot_nids.contains(nid)))
}

fn new_events(input: &[EventInput]) -> Vec<NewEvent<'_>> {
	input.iter().map(EventInput::as_new_event).collect()
}

/// Builds the two sorted NID lists for a room seen for the first time:
/// every state event becomes current.
fn partition(state: &[EventInput], inserted: &[InsertedEvent]) -> (Vec<Nid>, Vec<Nid>) {
	let mut membership = Vec::new();
	let mut other = Vec::new();

	for (event, ins) in state.iter().zip(inserted.iter()) {
		if event.is_membership() {
			membership.push(ins.nid);
		} else {
			other.push(ins.nid);
		}
	}

	membership.sort_unstable();
	other.sort_unstable();
	(membership, other)
}

/// Overlays `state` onto `current`: the existing `(type, state_key)` entry
/// is replaced if present, otherwise appended — later-by-NID wins, and a
/// snapshot holds at most one entry per `(type, state_key)`.
async fn overlay(
	txn: &mut sqlx::Transaction<'_, sqlx::Postgres>,
	current: &SnapshotRow,
	state: &[EventInput],
	inserted: &[InsertedEvent],
) -> Result<(Vec<Nid>, Vec<Nid>)> {
	let mut membership = current.membership_nids.clone();
	let mut other = current.other_nids.clone();

	let mut existing_nids = membership.clone();
	existing_nids.extend_from_slice(&other);
	let existing = events::type_state_keys(txn, &existing_nids).await?;

	for (event, ins) in state.iter().zip(inserted.iter()) {
		let replaces = existing
			.iter()
			.find(|(_, ty, sk)| *ty == event.event_type && sk.as_deref() == event.state_key.as_deref())
			.map(|(nid, ..)| *nid);

		if let Some(old_nid) = replaces {
			membership.retain(|n| *n != old_nid);
			other.retain(|n| *n != old_nid);
		}

		if event.is_membership() {
			membership.push(ins.nid);
		} else {
			other.push(ins.nid);
		}
	}

	membership.sort_unstable();
	other.sort_unstable();
	Ok((membership, other))
}
