use ssync_core::Result;

use crate::models::TokenRow;

/// Binds a freshly-seen bearer token to (user, device) after the upstream
/// `whoami` confirms it.
pub async fn insert(pool: &sqlx::PgPool, token: &str, user_id: &str, device_id: &str) -> Result<()> {
	sqlx::query(
		r"
		INSERT INTO tokens (token, user_id, device_id, last_seen)
		VALUES ($1, $2, $3, now())
		ON CONFLICT (token) DO UPDATE SET last_seen = now()
		",
	)
	.bind(token)
	.bind(user_id)
	.bind(device_id)
	.execute(pool)
	.await?;

	Ok(())
}

pub async fn lookup(pool: &sqlx::PgPool, token: &str) -> Result<Option<TokenRow>> {
	Ok(
		sqlx::query_as("SELECT token, user_id, device_id FROM tokens WHERE token = $1")
			.bind(token)
			.fetch_optional(pool)
			.await?,
	)
}

pub async fn touch(pool: &sqlx::PgPool, token: &str) -> Result<()> {
	sqlx::query("UPDATE tokens SET last_seen = now() WHERE token = $1")
		.bind(token)
		.execute(pool)
		.await?;

	Ok(())
}

pub async fn remove(pool: &sqlx::PgPool, token: &str) -> Result<()> {
	sqlx::query("DELETE FROM tokens WHERE token = $1")
		.bind(token)
		.execute(pool)
		.await?;

	Ok(())
}

/// Tokens whose `last_seen` has fallen further back than `expire_secs` —
/// candidates for the poller expiry sweep to stop.
pub async fn stale(pool: &sqlx::PgPool, expire_secs: i64) -> Result<Vec<TokenRow>> {
	Ok(sqlx::query_as(
		"SELECT token, user_id, device_id FROM tokens WHERE last_seen < now() - make_interval(secs => $1)",
	)
	.bind(expire_secs as f64)
	.fetch_all(pool)
	.await?)
}
