use sqlx::{Postgres, Transaction};
use ssync_core::Result;

use crate::models::{Nid, SnapshotId, SnapshotRow};

/// Stores a new immutable snapshot. Membership and other NIDs are kept
/// pre-sorted by the caller as two sorted lists.
pub async fn create_snapshot(
	txn: &mut Transaction<'_, Postgres>,
	room_id: &str,
	membership_nids: &[Nid],
	other_nids: &[Nid],
) -> Result<SnapshotId> {
	let (id,): (SnapshotId,) = sqlx::query_as(
		"INSERT INTO snapshots (room_id, membership_nids, other_nids) VALUES ($1, $2, $3) RETURNING id",
	)
	.bind(room_id)
	.bind(membership_nids)
	.bind(other_nids)
	.fetch_one(&mut **txn)
	.await?;

	Ok(id)
}

pub async fn set_current_snapshot(
	txn: &mut Transaction<'_, Postgres>,
	room_id: &str,
	snapshot_id: SnapshotId,
) -> Result<()> {
	sqlx::query("UPDATE rooms SET current_after_snapshot_id = $2 WHERE room_id = $1")
		.bind(room_id)
		.bind(snapshot_id)
		.execute(&mut **txn)
		.await?;

	Ok(())
}

pub async fn select_current_snapshot(
	txn: &mut Transaction<'_, Postgres>,
	room_id: &str,
) -> Result<Option<SnapshotId>> {
	let row: Option<(Option<SnapshotId>,)> =
		sqlx::query_as("SELECT current_after_snapshot_id FROM rooms WHERE room_id = $1")
			.bind(room_id)
			.fetch_optional(&mut **txn)
			.await?;

	Ok(row.and_then(|(id,)| id))
}

pub async fn get_snapshot(
	txn: &mut Transaction<'_, Postgres>,
	snapshot_id: SnapshotId,
) -> Result<SnapshotRow> {
	Ok(
		sqlx::query_as("SELECT id, room_id, membership_nids, other_nids FROM snapshots WHERE id = $1")
			.bind(snapshot_id)
			.fetch_one(&mut **txn)
			.await?,
	)
}

/// `(state_key, membership)` pairs for a snapshot's membership events —
/// used by the cache to compute join/invite counts and heroes.
pub async fn membership_states(
	txn: &mut Transaction<'_, Postgres>,
	snapshot_id: SnapshotId,
) -> Result<Vec<(String, Option<String>)>> {
	Ok(sqlx::query_as(
		r"
		SELECT e.state_key, e.content ->> 'membership'
		FROM snapshots s, unnest(s.membership_nids) AS nid
		JOIN events e ON e.nid = nid
		WHERE s.id = $1 AND e.state_key IS NOT NULL
		",
	)
	.bind(snapshot_id)
	.fetch_all(&mut **txn)
	.await?)
}

/// Deletes snapshots that have fallen out of the reachable timeline window:
/// once a room has more than `max_timeline_limit + 1` snapshots, everything
/// older than the newest `max_timeline_limit + 1` (excluding whichever
/// snapshot is still current) is pruned.
pub async fn compact(
	txn: &mut Transaction<'_, Postgres>,
	room_id: &str,
	max_timeline_limit: u32,
) -> Result<u64> {
	let keep = i64::from(max_timeline_limit) + 1;

	let result = sqlx::query(
		r"
		DELETE FROM snapshots
		WHERE room_id = $1
		AND id NOT IN (
			SELECT id FROM snapshots WHERE room_id = $1 ORDER BY id DESC LIMIT $2
		)
		AND id <> COALESCE((SELECT current_after_snapshot_id FROM rooms WHERE room_id = $1), -1)
		",
	)
	.bind(room_id)
	.bind(keep)
	.execute(&mut **txn)
	.await?;

	Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
	#[test]
	fn compaction_keep_count_is_limit_plus_one() {
		// A client can walk back at most max_timeline_limit timeline
		// events, so that many plus the current snapshot stay reachable.
		let max_timeline_limit: u32 = 50;
		assert_eq!(i64::from(max_timeline_limit) + 1, 51);
	}
}
