//! Relational event store. Owns the single `PgPool` and the per-room
//! transactional discipline every other service builds on.

pub mod devices;
pub mod events;
pub mod invites;
pub mod models;
pub mod rooms;
pub mod snapshots;
pub mod to_device;
pub mod tokens;

pub use models::*;

use ssync_core::{err, Result};

/// Handle to the Postgres-backed event store. Cheap to clone — `PgPool` is
/// itself a pool of connections behind an `Arc`.
#[derive(Clone)]
pub struct Store {
	pool: sqlx::PgPool,
}

impl Store {
	/// Connect and run any pending forward-only, numbered migrations under
	/// `migrations/`.
	pub async fn connect(database_url: &str) -> Result<Self> {
		let pool = sqlx::PgPool::connect(database_url)
			.await
			.map_err(|e| err!("failed to connect to store: {e}"))?;

		sqlx::migrate!("./migrations").run(&pool).await?;

		Ok(Self { pool })
	}

	#[must_use]
	pub fn pool(&self) -> &sqlx::PgPool { &self.pool }

	/// Wraps an already-connected, already-migrated pool — for integration
	/// tests that provision their database via `sqlx::test` rather than
	/// `connect`.
	#[must_use]
	pub fn from_pool(pool: sqlx::PgPool) -> Self { Self { pool } }

	/// Begin a transaction that also takes the per-room row lock (`SELECT
	/// ... FOR UPDATE` on `rooms`), creating the room row first if it
	/// doesn't exist yet. This is the relational half of per-room
	/// serialization — the in-process half is `ssync_core::utils::MutexMap`,
	/// held by the caller around this call.
	pub async fn begin_room_txn(
		&self,
		room_id: &str,
	) -> Result<sqlx::Transaction<'_, sqlx::Postgres>> {
		let mut txn = self.pool.begin().await?;

		sqlx::query("INSERT INTO rooms (room_id) VALUES ($1) ON CONFLICT DO NOTHING")
			.bind(room_id)
			.execute(&mut *txn)
			.await?;

		sqlx::query("SELECT room_id FROM rooms WHERE room_id = $1 FOR UPDATE")
			.bind(room_id)
			.fetch_one(&mut *txn)
			.await?;

		Ok(txn)
	}
}
