use sqlx::{Postgres, Transaction};
use ssync_core::Result;

use crate::models::RoomRow;

pub async fn get(txn: &mut Transaction<'_, Postgres>, room_id: &str) -> Result<Option<RoomRow>> {
	Ok(sqlx::query_as(
		r"
		SELECT room_id, current_after_snapshot_id, last_prev_batch, encryption,
		       room_type, canonical_alias, predecessor_room_id, successor_room_id
		FROM rooms WHERE room_id = $1
		",
	)
	.bind(room_id)
	.fetch_optional(&mut **txn)
	.await?)
}

/// The upstream pagination token that accompanied the most recent limited
/// timeline for this room, if any — what a client's own `prev_batch` should
/// echo back when its response window ends at a gap.
pub async fn last_prev_batch(pool: &sqlx::PgPool, room_id: &str) -> Result<Option<String>> {
	let row: Option<(Option<String>,)> =
		sqlx::query_as("SELECT last_prev_batch FROM rooms WHERE room_id = $1")
			.bind(room_id)
			.fetch_optional(pool)
			.await?;

	Ok(row.and_then(|(prev_batch,)| prev_batch))
}

pub async fn set_prev_batch(
	txn: &mut Transaction<'_, Postgres>,
	room_id: &str,
	prev_batch: &str,
) -> Result<()> {
	sqlx::query("UPDATE rooms SET last_prev_batch = $2 WHERE room_id = $1")
		.bind(room_id)
		.bind(prev_batch)
		.execute(&mut **txn)
		.await?;

	Ok(())
}

/// Updates the small set of room-level metadata fields the cache
/// subscribes to. Pass `None` to leave a field unchanged.
pub async fn update_metadata(
	txn: &mut Transaction<'_, Postgres>,
	room_id: &str,
	encryption: Option<&str>,
	room_type: Option<&str>,
	canonical_alias: Option<&str>,
) -> Result<()> {
	sqlx::query(
		r"
		UPDATE rooms SET
			encryption = COALESCE($2, encryption),
			room_type = COALESCE($3, room_type),
			canonical_alias = COALESCE($4, canonical_alias)
		WHERE room_id = $1
		",
	)
	.bind(room_id)
	.bind(encryption)
	.bind(room_type)
	.bind(canonical_alias)
	.execute(&mut **txn)
	.await?;

	Ok(())
}

/// All room ids known to the store, used to rebuild the global cache
/// at startup.
pub async fn all_room_ids(pool: &sqlx::PgPool) -> Result<Vec<String>> {
	let rows: Vec<(String,)> = sqlx::query_as("SELECT room_id FROM rooms").fetch_all(pool).await?;
	Ok(rows.into_iter().map(|(id,)| id).collect())
}
