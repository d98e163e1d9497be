/// A store-assigned, strictly increasing event id. Doubles as the global
/// stream position.
pub type Nid = i64;

pub type SnapshotId = i64;

/// One row of a timeline or state block about to be inserted. `content` is
/// kept as an opaque JSON value so the store never has to understand event
/// shapes it doesn't need to.
pub struct NewEvent<'a> {
	pub event_id: &'a str,
	pub event_type: &'a str,
	pub state_key: Option<&'a str>,
	pub sender: &'a str,
	pub origin_server_ts: i64,
	pub content: &'a serde_json::Value,
	pub is_state: bool,
}

/// Result of inserting one event: its NID and whether this call is the one
/// that created the row (vs. an idempotent replay of an already-known
/// `event_id`).
#[derive(Debug, Clone, Copy)]
pub struct InsertedEvent {
	pub nid: Nid,
	pub newly_inserted: bool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
	pub nid: Nid,
	pub room_id: String,
	pub event_id: String,
	#[sqlx(rename = "type")]
	pub event_type: String,
	pub state_key: Option<String>,
	pub sender: String,
	pub origin_server_ts: i64,
	pub content: serde_json::Value,
	pub is_state: bool,
	pub missing_previous: bool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SnapshotRow {
	pub id: SnapshotId,
	pub room_id: String,
	pub membership_nids: Vec<Nid>,
	pub other_nids: Vec<Nid>,
}

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct RoomRow {
	pub room_id: String,
	pub current_after_snapshot_id: Option<SnapshotId>,
	pub last_prev_batch: Option<String>,
	pub encryption: Option<String>,
	pub room_type: Option<String>,
	pub canonical_alias: Option<String>,
	pub predecessor_room_id: Option<String>,
	pub successor_room_id: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DeviceRow {
	pub user_id: String,
	pub device_id: String,
	pub since: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TokenRow {
	pub token: String,
	pub user_id: String,
	pub device_id: String,
}
