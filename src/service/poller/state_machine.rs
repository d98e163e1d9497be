use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ruma::{DeviceId, UserId};
use ssync_core::utils::backoff;

use super::PollerHandle;
use crate::accumulator::{EventInput, TimelineInput};
use crate::PollerPool;

const MIN_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Runs `Starting -> Polling -> Terminated` until an unauthorized response
/// is observed; transient failures retry with jittered exponential backoff
/// instead of terminating.
pub(super) async fn run(
	pool: Arc<PollerPool>,
	key: (ruma::OwnedUserId, ruma::OwnedDeviceId),
	token: String,
	handle: Arc<PollerHandle>,
) {
	let (user_id, device_id) = key.clone();
	let mut signaled = false;
	let mut tries: u32 = 0;
	let started = Instant::now();

	loop {
		if handle.stop.load(Ordering::Relaxed) {
			break;
		}

		match poll_once(&pool, &user_id, &device_id, &token).await {
			Ok(()) => {
				tries = 0;
				if !signaled {
					let _ = handle.outcome.send(Some(true));
					signaled = true;
				}
			},
			Err(PollError::Unauthorized) => {
				pool.on_expired_token(&user_id, &device_id, &token).await;
				// Retire before signaling failure: a concurrent `ensure_polling` for
				// this key must never observe this handle's already-resolved `false`
				// after the entry has logically expired — it should find the map
				// empty and spawn a fresh poller instead.
				pool.retire(&key, &handle);
				if !signaled {
					let _ = handle.outcome.send(Some(false));
				}
				break;
			},
			Err(PollError::Transient(e)) => {
				tries = tries.saturating_add(1);
				tracing::warn!(error = %e, tries, "poller transient failure, backing off");
				if !backoff::continue_exponential_backoff(MIN_BACKOFF, MAX_BACKOFF, started.elapsed(), tries) {
					tracing::debug!("poller backoff window exceeded, resuming anyway");
				}
				tokio::time::sleep(backoff::next_retry_delay(MIN_BACKOFF, MAX_BACKOFF, tries)).await;
			},
		}
	}

	pool.retire(&key, &handle);
}

enum PollError {
	Unauthorized,
	Transient(ssync_core::Error),
}

async fn poll_once(
	pool: &Arc<PollerPool>,
	user_id: &UserId,
	device_id: &DeviceId,
	token: &str,
) -> Result<(), PollError> {
	let since = ssync_store::devices::get_since(pool.store.pool(), user_id.as_str(), device_id.as_str())
		.await
		.map_err(PollError::Transient)?;

	let accelerate = since.is_empty()
		&& ssync_store::devices::has_other_known_device(pool.store.pool(), user_id.as_str(), device_id.as_str())
			.await
			.map_err(PollError::Transient)?;

	let timeout_ms = if since.is_empty() {
		0
	} else {
		pool.config.default_poll_timeout_ms
	};

	let response = pool
		.upstream
		.sync(token, &since, timeout_ms, false, accelerate, pool.config.max_timeline_limit)
		.await
		.map_err(|e| match e {
			ssync_core::Error::UpstreamUnauthorized => PollError::Unauthorized,
			other => PollError::Transient(other),
		})?;

	apply_response(pool, user_id, device_id, &response)
		.await
		.map_err(PollError::Transient)?;

	Ok(())
}

/// Persists to-device/invites first, then applies Accumulate/Initialise
/// per room, then commits the new `since` token last.
async fn apply_response(
	pool: &Arc<PollerPool>,
	user_id: &UserId,
	device_id: &DeviceId,
	response: &serde_json::Value,
) -> ssync_core::Result<()> {
	if let Some(events) = response.pointer("/to_device/events").and_then(|v| v.as_array()) {
		for event in events {
			ssync_store::to_device::enqueue(pool.store.pool(), user_id.as_str(), device_id.as_str(), event).await?;
		}
	}

	if let Some(invites) = response.pointer("/rooms/invite").and_then(|v| v.as_object()) {
		for (room_id, block) in invites {
			let invite_state = block
				.get("invite_state")
				.cloned()
				.unwrap_or_else(|| serde_json::json!({"events": []}));
			ssync_store::invites::upsert(pool.store.pool(), room_id, user_id.as_str(), &invite_state).await?;
		}
	}

	if let Some(joined) = response.pointer("/rooms/join").and_then(|v| v.as_object()) {
		for (room_id, block) in joined {
			let _ = ssync_store::invites::remove(pool.store.pool(), room_id, user_id.as_str()).await;

			if let Some(state_events) = block.pointer("/state/events").and_then(|v| v.as_array()) {
				if !state_events.is_empty() {
					let state = state_events.iter().filter_map(parse_event).collect();
					let result = pool.accumulator.initialise(room_id, state).await?;
					if result.replaced_existing_snapshot {
						if let Ok(parsed) = ruma::RoomId::parse(room_id) {
							pool.conn.invalidate_for_gap(&parsed);
						}
					}
				}
			}

			let timeline = block.get("timeline").cloned().unwrap_or_default();
			let events = timeline
				.get("events")
				.and_then(|v| v.as_array())
				.map(|events| events.iter().filter_map(parse_event).collect())
				.unwrap_or_default();
			let limited = timeline.get("limited").and_then(serde_json::Value::as_bool).unwrap_or(false);
			let prev_batch = timeline
				.get("prev_batch")
				.and_then(serde_json::Value::as_str)
				.map(str::to_owned);

			let result = pool
				.accumulator
				.accumulate(
					room_id,
					TimelineInput {
						events,
						limited,
						prev_batch,
					},
				)
				.await?;

			if result.num_new > 0 {
				pool.conn.notify_room_nids(room_id, &result.timeline_nids);
			}
		}
	}

	if let Some(next_batch) = response.get("next_batch").and_then(serde_json::Value::as_str) {
		ssync_store::devices::set_since(pool.store.pool(), user_id.as_str(), device_id.as_str(), next_batch).await?;
	}

	Ok(())
}

fn parse_event(raw: &serde_json::Value) -> Option<EventInput> {
	Some(EventInput {
		event_id: raw.get("event_id")?.as_str()?.to_owned(),
		event_type: raw.get("type")?.as_str()?.to_owned(),
		state_key: raw.get("state_key").and_then(serde_json::Value::as_str).map(str::to_owned),
		sender: raw.get("sender")?.as_str()?.to_owned(),
		origin_server_ts: raw.get("origin_server_ts").and_then(serde_json::Value::as_i64).unwrap_or_default(),
		content: raw.get("content").cloned().unwrap_or_default(),
		is_state: raw.get("state_key").is_some(),
	})
}
