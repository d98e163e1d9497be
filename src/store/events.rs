use sqlx::{Postgres, Transaction};
use ssync_core::Result;

use crate::models::{EventRow, InsertedEvent, NewEvent, Nid};

/// Idempotently inserts events in call order, returning one [`InsertedEvent`]
/// per input preserving that order. A conflicting `event_id`
/// yields the already-stored NID with `newly_inserted: false` rather than
/// erroring, so replays of the same upstream timeline are no-ops.
pub async fn insert_events(
	txn: &mut Transaction<'_, Postgres>,
	room_id: &str,
	events: &[NewEvent<'_>],
) -> Result<Vec<InsertedEvent>> {
	let mut out = Vec::with_capacity(events.len());
	for event in events {
		let row: (Nid, bool) = sqlx::query_as(
			r"
			WITH ins AS (
				INSERT INTO events (
					room_id, event_id, type, state_key, sender,
					origin_server_ts, content, is_state
				)
				VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
				ON CONFLICT (event_id) DO NOTHING
				RETURNING nid
			)
			SELECT nid, true AS newly_inserted FROM ins
			UNION ALL
			SELECT nid, false AS newly_inserted FROM events
			WHERE event_id = $2 AND NOT EXISTS (SELECT 1 FROM ins)
			",
		)
		.bind(room_id)
		.bind(event.event_id)
		.bind(event.event_type)
		.bind(event.state_key)
		.bind(event.sender)
		.bind(event.origin_server_ts)
		.bind(event.content)
		.bind(event.is_state)
		.fetch_one(&mut **txn)
		.await?;

		out.push(InsertedEvent {
			nid: row.0,
			newly_inserted: row.1,
		});
	}

	Ok(out)
}

/// Marks `event_id` with `missing_previous=true`: the first newly-inserted
/// event of a limited timeline whose `prev_batch` didn't resolve.
pub async fn mark_missing_previous(
	txn: &mut Transaction<'_, Postgres>,
	event_id: &str,
) -> Result<()> {
	sqlx::query("UPDATE events SET missing_previous = true WHERE event_id = $1")
		.bind(event_id)
		.execute(&mut **txn)
		.await?;

	Ok(())
}

/// Clears `missing_previous` once a later, non-limited timeline is observed
/// to contain the same event id.
pub async fn clear_missing_previous(
	txn: &mut Transaction<'_, Postgres>,
	event_id: &str,
) -> Result<()> {
	sqlx::query("UPDATE events SET missing_previous = false WHERE event_id = $1")
		.bind(event_id)
		.execute(&mut **txn)
		.await?;

	Ok(())
}

/// NIDs for a batch of event ids, for events already stored in this room —
/// used by the accumulator to test a redaction's `redacts` target against
/// the current snapshot.
pub async fn nids_by_event_ids(
	txn: &mut Transaction<'_, Postgres>,
	room_id: &str,
	event_ids: &[String],
) -> Result<Vec<(String, Nid)>> {
	if event_ids.is_empty() {
		return Ok(Vec::new());
	}

	Ok(sqlx::query_as(
		"SELECT event_id, nid FROM events WHERE room_id = $1 AND event_id = ANY($2)",
	)
	.bind(room_id)
	.bind(event_ids)
	.fetch_all(&mut **txn)
	.await?)
}

/// `(type, state_key)` for a batch of NIDs — used by the accumulator to
/// find which entry in a snapshot a newly-inserted state event replaces.
pub async fn type_state_keys(
	txn: &mut Transaction<'_, Postgres>,
	nids: &[Nid],
) -> Result<Vec<(Nid, String, Option<String>)>> {
	Ok(sqlx::query_as(
		"SELECT nid, type, state_key FROM events WHERE nid = ANY($1)",
	)
	.bind(nids)
	.fetch_all(&mut **txn)
	.await?)
}

/// Hydrates a connection's delta event ids back into full rows for the
/// wire response, preserving none of the list's order — callers re-sort
/// against their own id list.
pub async fn by_ids(pool: &sqlx::PgPool, event_ids: &[String]) -> Result<Vec<EventRow>> {
	if event_ids.is_empty() {
		return Ok(Vec::new());
	}

	Ok(sqlx::query_as(
		r"
		SELECT nid, room_id, event_id, type, state_key, sender,
		       origin_server_ts, content, is_state, missing_previous
		FROM events WHERE event_id = ANY($1)
		",
	)
	.bind(event_ids)
	.fetch_all(pool)
	.await?)
}

/// Up to `limit` most recent events in a room, oldest first, plus whether
/// the window is limited: either there are more events before it, or the
/// oldest one included has `missing_previous` set, in which case the window
/// is truncated to end at that event — a client is never handed an event
/// without its predecessor known.
pub async fn timeline_tail(pool: &sqlx::PgPool, room_id: &str, limit: u32) -> Result<(Vec<EventRow>, bool)> {
	if limit == 0 {
		return Ok((Vec::new(), false));
	}

	let mut rows: Vec<EventRow> = sqlx::query_as(
		r"
		SELECT nid, room_id, event_id, type, state_key, sender,
		       origin_server_ts, content, is_state, missing_previous
		FROM events WHERE room_id = $1 ORDER BY nid DESC LIMIT $2
		",
	)
	.bind(room_id)
	.bind(i64::from(limit) + 1)
	.fetch_all(pool)
	.await?;

	let has_more = rows.len() > limit as usize;
	rows.truncate(limit as usize);

	let limited = match rows.iter().position(|row| row.missing_previous) {
		Some(gap_idx) => {
			rows.truncate(gap_idx + 1);
			true
		},
		None => has_more,
	};

	rows.reverse();
	Ok((rows, limited))
}

/// State events from a room's current snapshot matching a `required_state`
/// filter list; `state_key: None` in a filter matches any state key of that
/// type (the wire `"*"` wildcard, already resolved by the `api` layer).
pub async fn required_state(
	pool: &sqlx::PgPool,
	room_id: &str,
	filters: &[(String, Option<String>)],
) -> Result<Vec<EventRow>> {
	if filters.is_empty() {
		return Ok(Vec::new());
	}

	let types: Vec<String> = filters.iter().map(|(event_type, _)| event_type.clone()).collect();

	let rows: Vec<EventRow> = sqlx::query_as(
		r"
		SELECT e.nid, e.room_id, e.event_id, e.type, e.state_key, e.sender,
		       e.origin_server_ts, e.content, e.is_state, e.missing_previous
		FROM rooms r
		JOIN snapshots s ON s.id = r.current_after_snapshot_id
		JOIN events e ON e.nid = ANY(s.membership_nids || s.other_nids)
		WHERE r.room_id = $1 AND e.type = ANY($2)
		",
	)
	.bind(room_id)
	.bind(&types)
	.fetch_all(pool)
	.await?;

	Ok(rows
		.into_iter()
		.filter(|row| {
			filters.iter().any(|(event_type, state_key)| {
				*event_type == row.event_type
					&& match state_key {
						Some(sk) => Some(sk) == row.state_key.as_ref(),
						None => true,
					}
			})
		})
		.collect())
}
