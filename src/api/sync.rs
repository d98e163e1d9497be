//! `POST /_matrix/client/unstable/org.matrix.msc3575/sync` — the
//! downstream sliding-sync endpoint. Translates the wire JSON into
//! `service::conn::SyncRequest`, calls the connection manager, and
//! translates the result back, hydrating event ids against the store on
//! the way out.

use std::collections::BTreeMap;
use std::time::Duration;

use axum::extract::State;
use axum::Json;
use ruma::OwnedRoomId;
use serde::{Deserialize, Serialize};
use ssync_core::Result;
use ssync_service::conn::{ListParams, RoomSubscription, SlidingOp, SyncRequest};
use ssync_service::Services;
use std::sync::Arc;

use crate::extract::AuthenticatedDevice;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Request {
	#[serde(default)]
	pub conn_id: Option<String>,
	#[serde(default)]
	pub pos: Option<String>,
	#[serde(default)]
	pub timeout: Option<u64>,
	#[serde(default)]
	pub lists: BTreeMap<String, RequestList>,
	#[serde(default)]
	pub room_subscriptions: BTreeMap<OwnedRoomId, RequestRoomSubscription>,
}

#[derive(Debug, Deserialize)]
pub struct RequestList {
	#[serde(default)]
	pub ranges: Vec<(u32, u32)>,
	#[serde(default)]
	pub required_state: Vec<(String, String)>,
	#[serde(default)]
	pub timeline_limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct RequestRoomSubscription {
	#[serde(default)]
	pub required_state: Vec<(String, String)>,
	#[serde(default)]
	pub timeline_limit: u32,
}

#[derive(Debug, Serialize)]
pub struct Response {
	pub pos: String,
	pub lists: BTreeMap<String, ResponseList>,
	pub rooms: BTreeMap<OwnedRoomId, ResponseRoom>,
}

#[derive(Debug, Default, Serialize)]
pub struct ResponseList {
	pub count: u32,
	pub ops: Vec<ResponseOp>,
}

#[derive(Debug, Serialize)]
pub struct ResponseOp {
	pub op: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub range: Option<(u32, u32)>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub room_ids: Vec<OwnedRoomId>,
}

#[derive(Debug, Default, Serialize)]
pub struct ResponseRoom {
	pub joined_count: u64,
	pub invited_count: u64,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub heroes: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub timeline: Vec<serde_json::Value>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub required_state: Vec<serde_json::Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub prev_batch: Option<String>,
	pub limited: bool,
}

/// Default long-poll if the client omits `timeout`, bounded separately from
/// any single upstream poll timeout.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[tracing::instrument(skip(services, device, request))]
pub async fn handler(
	State(services): State<Arc<Services>>,
	device: AuthenticatedDevice,
	Json(request): Json<Request>,
) -> Result<Json<Response>> {
	let conn_id = request.conn_id.unwrap_or_default();
	let timeout = Duration::from_millis(request.timeout.unwrap_or(DEFAULT_TIMEOUT_MS));

	let lists = request
		.lists
		.into_iter()
		.map(|(name, list)| {
			let params = ListParams {
				ranges: list.ranges,
				room_subscription: RoomSubscription {
					timeline_limit: list.timeline_limit,
					required_state: list.required_state.into_iter().map(as_state_key).collect(),
				},
			};
			(name, params)
		})
		.collect();

	let room_subscriptions = request
		.room_subscriptions
		.into_iter()
		.map(|(room_id, sub)| {
			let sub = RoomSubscription {
				timeline_limit: sub.timeline_limit,
				required_state: sub.required_state.into_iter().map(as_state_key).collect(),
			};
			(room_id, sub)
		})
		.collect();

	let sync_request = SyncRequest {
		conn_id,
		pos: request.pos,
		lists,
		room_subscriptions,
		timeout,
	};

	let response = services.conn.handle(device.user_id, device.device_id, sync_request).await?;
	hydrate(&services, response).await.map(Json)
}

fn as_state_key((event_type, state_key): (String, String)) -> (String, Option<String>) {
	if state_key == "*" {
		(event_type, None)
	} else {
		(event_type, Some(state_key))
	}
}

async fn hydrate(services: &Services, response: ssync_service::conn::SyncResponse) -> Result<Response> {
	let mut rooms = BTreeMap::new();
	for (room_id, delta) in response.rooms {
		let timeline = ssync_store::events::by_ids(services.store.pool(), &delta.timeline_event_ids)
			.await?
			.into_iter()
			.map(|row| row.content)
			.collect();
		let required_state = ssync_store::events::by_ids(services.store.pool(), &delta.required_state_event_ids)
			.await?
			.into_iter()
			.map(|row| row.content)
			.collect();

		rooms.insert(
			room_id,
			ResponseRoom {
				joined_count: delta.metadata.joined_count,
				invited_count: delta.metadata.invited_count,
				heroes: delta.metadata.heroes,
				name: delta.metadata.name,
				timeline,
				required_state,
				prev_batch: delta.prev_batch,
				limited: delta.limited,
			},
		);
	}

	let lists = response
		.list_ops
		.into_iter()
		.map(|(name, ops)| {
			let count = ops.iter().filter_map(|op| op.range).map(|(_, hi)| hi + 1).max().unwrap_or(0);
			let ops = ops
				.into_iter()
				.map(|update| ResponseOp {
					op: sliding_op_name(update.op),
					range: update.range,
					room_ids: update.room_ids,
				})
				.collect();
			(name, ResponseList { count, ops })
		})
		.collect();

	Ok(Response {
		pos: response.pos,
		lists,
		rooms,
	})
}

fn sliding_op_name(op: SlidingOp) -> &'static str {
	match op {
		SlidingOp::Sync => "SYNC",
		SlidingOp::Insert => "INSERT",
		SlidingOp::Delete => "DELETE",
		SlidingOp::Invalidate => "INVALIDATE",
	}
}
