use ssync_core::Result;

/// Device `since` cursor, defaulting to the empty string for a device the
/// poller has never synced before.
pub async fn get_since(pool: &sqlx::PgPool, user_id: &str, device_id: &str) -> Result<String> {
	let row: Option<(String,)> =
		sqlx::query_as("SELECT since FROM devices WHERE user_id = $1 AND device_id = $2")
			.bind(user_id)
			.bind(device_id)
			.fetch_optional(pool)
			.await?;

	Ok(row.map_or_else(String::new, |(since,)| since))
}

/// Persists the cursor for the response that was just fully committed —
/// commit-after-consume: this is called only after Accumulate/Initialise
/// for every room in that response has landed.
pub async fn set_since(pool: &sqlx::PgPool, user_id: &str, device_id: &str, since: &str) -> Result<()> {
	sqlx::query(
		r"
		INSERT INTO devices (user_id, device_id, since, since_updated_at)
		VALUES ($1, $2, $3, now())
		ON CONFLICT (user_id, device_id)
		DO UPDATE SET since = EXCLUDED.since, since_updated_at = now()
		",
	)
	.bind(user_id)
	.bind(device_id)
	.bind(since)
	.execute(pool)
	.await?;

	Ok(())
}

/// True if the user already has at least one other known device — used to
/// decide whether a fresh poller should take the accelerated initial sync
/// path.
pub async fn has_other_known_device(pool: &sqlx::PgPool, user_id: &str, device_id: &str) -> Result<bool> {
	let row: (bool,) = sqlx::query_as(
		"SELECT EXISTS(SELECT 1 FROM devices WHERE user_id = $1 AND device_id <> $2)",
	)
	.bind(user_id)
	.bind(device_id)
	.fetch_one(pool)
	.await?;

	Ok(row.0)
}
