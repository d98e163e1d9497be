use serde_json::Value;
use ssync_core::Result;

/// Records the stripped-state `invite_state` block for a pending invite,
/// sourced from the upstream sync's invite block.
pub async fn upsert(pool: &sqlx::PgPool, room_id: &str, user_id: &str, invite_state: &Value) -> Result<()> {
	sqlx::query(
		r"
		INSERT INTO invites (room_id, user_id, invite_state)
		VALUES ($1, $2, $3)
		ON CONFLICT (room_id, user_id) DO UPDATE SET invite_state = EXCLUDED.invite_state
		",
	)
	.bind(room_id)
	.bind(user_id)
	.bind(invite_state)
	.execute(pool)
	.await?;

	Ok(())
}

pub async fn remove(pool: &sqlx::PgPool, room_id: &str, user_id: &str) -> Result<()> {
	sqlx::query("DELETE FROM invites WHERE room_id = $1 AND user_id = $2")
		.bind(room_id)
		.bind(user_id)
		.execute(pool)
		.await?;

	Ok(())
}

pub async fn for_user(pool: &sqlx::PgPool, user_id: &str) -> Result<Vec<(String, Value)>> {
	let rows: Vec<(String, Value)> =
		sqlx::query_as("SELECT room_id, invite_state FROM invites WHERE user_id = $1")
			.bind(user_id)
			.fetch_all(pool)
			.await?;

	Ok(rows)
}
