use serde_json::Value;
use ssync_core::Result;

/// Appends a to-device message to a device's FIFO queue. Persisted first,
/// ahead of Accumulate/Initialise.
pub async fn enqueue(pool: &sqlx::PgPool, user_id: &str, device_id: &str, content: &Value) -> Result<()> {
	sqlx::query("INSERT INTO to_device_events (user_id, device_id, content) VALUES ($1, $2, $3)")
		.bind(user_id)
		.bind(device_id)
		.bind(content)
		.execute(pool)
		.await?;

	Ok(())
}

/// Unsent messages for a device, oldest first — the connection manager
/// drains this and acks by position advance.
pub async fn unsent(pool: &sqlx::PgPool, user_id: &str, device_id: &str) -> Result<Vec<(i64, Value)>> {
	let rows: Vec<(i64, Value)> = sqlx::query_as(
		r"
		SELECT id, content FROM to_device_events
		WHERE user_id = $1 AND device_id = $2 AND sent_at IS NULL
		ORDER BY id ASC
		",
	)
	.bind(user_id)
	.bind(device_id)
	.fetch_all(pool)
	.await?;

	Ok(rows)
}

/// Marks every queued message up to and including `through_id` as sent,
/// mirroring the client's `pos` advance that acknowledged them.
pub async fn ack_through(pool: &sqlx::PgPool, user_id: &str, device_id: &str, through_id: i64) -> Result<()> {
	sqlx::query(
		r"
		UPDATE to_device_events SET sent_at = now()
		WHERE user_id = $1 AND device_id = $2 AND id <= $3 AND sent_at IS NULL
		",
	)
	.bind(user_id)
	.bind(device_id)
	.bind(through_id)
	.execute(pool)
	.await?;

	Ok(())
}
