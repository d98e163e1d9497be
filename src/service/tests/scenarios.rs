//! Integration tests against a disposable Postgres database (provisioned
//! per test by `sqlx::test`) reproducing the six end-to-end behaviors this
//! crate's components are built around. See `DESIGN.md`'s "Scenario
//! coverage" section for the mapping back to spec §8.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use ruma::{DeviceId, OwnedRoomId, RoomId, UserId};
use serde_json::json;
use sqlx::PgPool;
use ssync_core::{Config, Error};
use ssync_service::accumulator::{Accumulator, EventInput, TimelineInput};
use ssync_service::cache::Cache;
use ssync_service::conn::{ConnManager, RoomSubscription, SyncRequest};
use ssync_service::poller::PollerPool;
use ssync_service::upstream::UpstreamClient;
use ssync_store::{devices, events, tokens, Store};

fn test_config(upstream_base_url: &str) -> Config {
	Config {
		database_url: String::new(),
		upstream_base_url: upstream_base_url.to_owned(),
		listen_addr: "127.0.0.1:0".to_owned(),
		max_timeline_limit: 50,
		poller_idle_timeout_secs: 900,
		token_expire_secs: 3600,
		default_poll_timeout_ms: 50,
		log: "error".to_owned(),
	}
}

fn parse_query(raw: &str) -> HashMap<String, String> {
	reqwest::Url::parse(&format!("http://ignored/?{raw}"))
		.unwrap()
		.query_pairs()
		.map(|(k, v)| (k.into_owned(), v.into_owned()))
		.collect()
}

async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
	for _ in 0..200 {
		if condition() {
			return true;
		}
		tokio::time::sleep(Duration::from_millis(10)).await;
	}
	condition()
}

#[derive(Default)]
struct FakeUpstreamState {
	queries: Vec<(String, String)>,
	responses: HashMap<String, VecDeque<serde_json::Value>>,
	unauthorized: HashMap<String, u32>,
}

#[derive(Clone, Default)]
struct FakeUpstream(Arc<StdMutex<FakeUpstreamState>>);

impl FakeUpstream {
	fn push_response(&self, token: &str, value: serde_json::Value) {
		self.0.lock().unwrap().responses.entry(token.to_owned()).or_default().push_back(value);
	}

	fn fail_next(&self, token: &str, times: u32) {
		self.0.lock().unwrap().unauthorized.insert(token.to_owned(), times);
	}

	fn queries_for(&self, token: &str) -> Vec<String> {
		self.0
			.lock()
			.unwrap()
			.queries
			.iter()
			.filter(|(seen, _)| seen == token)
			.map(|(_, query)| query.clone())
			.collect()
	}
}

async fn fake_sync(State(state): State<FakeUpstream>, headers: HeaderMap, uri: Uri) -> Response {
	let token = headers
		.get(axum::http::header::AUTHORIZATION)
		.and_then(|v| v.to_str().ok())
		.unwrap_or("")
		.trim_start_matches("Bearer ")
		.to_owned();

	let mut state = state.0.lock().unwrap();
	state.queries.push((token.clone(), uri.query().unwrap_or("").to_owned()));

	if let Some(remaining) = state.unauthorized.get_mut(&token) {
		if *remaining > 0 {
			*remaining -= 1;
			return StatusCode::UNAUTHORIZED.into_response();
		}
	}

	let body = state
		.responses
		.get_mut(&token)
		.and_then(VecDeque::pop_front)
		.unwrap_or_else(|| json!({"next_batch": "", "rooms": {}}));

	Json(body).into_response()
}

/// Binds an ephemeral-port axum server standing in for the homeserver this
/// proxy polls, recording every `/sync` query by bearer token.
async fn spawn_fake_upstream() -> (String, FakeUpstream) {
	let state = FakeUpstream::default();
	let app = Router::new().route("/_matrix/client/v3/sync", get(fake_sync)).with_state(state.clone());
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		let _ = axum::serve(listener, app).await;
	});
	(format!("http://{addr}/"), state)
}

fn room(id: &str) -> OwnedRoomId { RoomId::parse(id).unwrap().to_owned() }

fn state_event(event_id: &str, event_type: &str, state_key: &str, sender: &str, ts: i64, content: serde_json::Value) -> EventInput {
	EventInput {
		event_id: event_id.to_owned(),
		event_type: event_type.to_owned(),
		state_key: Some(state_key.to_owned()),
		sender: sender.to_owned(),
		origin_server_ts: ts,
		content,
		is_state: true,
	}
}

fn message_event(event_id: &str, sender: &str, ts: i64) -> EventInput {
	EventInput {
		event_id: event_id.to_owned(),
		event_type: "m.room.message".to_owned(),
		state_key: None,
		sender: sender.to_owned(),
		origin_server_ts: ts,
		content: json!({"body": event_id}),
		is_state: false,
	}
}

/// Scenario 1: a second device's first poll takes the accelerated path
/// (`since=""`, `filter.room.rooms=[]`, `timeline.limit=1`); its second poll
/// is a normal poll that always carries `filter.room.timeline.limit` at the
/// configured max, with no `room.rooms` narrowing.
#[sqlx::test(migrations = "../store/migrations")]
async fn accelerated_filter_on_second_device(pool: PgPool) {
	let store = Store::from_pool(pool);
	let cache = Arc::new(Cache::rebuild(&store).await.unwrap());
	let accumulator = Arc::new(Accumulator::new(store.clone(), Arc::clone(&cache), 50));
	let conn = Arc::new(ConnManager::new(store.clone(), Arc::clone(&cache)));
	let (base_url, fake) = spawn_fake_upstream().await;
	let upstream = Arc::new(UpstreamClient::new(&base_url).unwrap());
	let config = Arc::new(test_config(&base_url));
	let pool_handle = Arc::new(PollerPool::new(store.clone(), accumulator, upstream, conn, config));

	let user = UserId::parse("@alice:example.org").unwrap().to_owned();
	let device_a = <&DeviceId>::try_from("AAAA").unwrap().to_owned();
	let device_b = <&DeviceId>::try_from("BBBB").unwrap().to_owned();

	fake.push_response("tok-a", json!({"next_batch": "a1", "rooms": {}}));
	assert!(pool_handle.ensure_polling(user.clone(), device_a, "tok-a".to_owned()).await);

	fake.push_response("tok-b", json!({"next_batch": "b1", "rooms": {}}));
	fake.push_response("tok-b", json!({"next_batch": "b2", "rooms": {}}));
	assert!(pool_handle.ensure_polling(user, device_b, "tok-b".to_owned()).await);

	assert!(wait_until(|| fake.queries_for("tok-b").len() >= 2).await);
	let queries = fake.queries_for("tok-b");

	let first = parse_query(&queries[0]);
	assert!(!first.contains_key("since"));
	assert_eq!(first.get("filter").unwrap(), r#"{"room":{"rooms":[],"timeline":{"limit":1}}}"#);

	let second = parse_query(&queries[1]);
	assert_eq!(second.get("since").unwrap(), "b1");
	assert_eq!(second.get("filter").unwrap(), r#"{"room":{"timeline":{"limit":50}}}"#);
}

/// Scenario 2: a gappy state block that lands on a snapshot a conn already
/// saw must invalidate that conn's `pos`, and a fresh conn must see the
/// post-gap state (including the event ids the new snapshot's required
/// state resolves to).
#[sqlx::test(migrations = "../store/migrations")]
async fn gappy_state_invalidates_session(pool: PgPool) {
	let store = Store::from_pool(pool);
	let cache = Arc::new(Cache::rebuild(&store).await.unwrap());
	let accumulator = Accumulator::new(store.clone(), Arc::clone(&cache), 50);
	let conn = ConnManager::new(store.clone(), Arc::clone(&cache));

	let room_id = room("!room:example.org");
	let alice = "@alice:example.org";
	let device = <&DeviceId>::try_from("ALIC").unwrap().to_owned();

	accumulator
		.initialise(
			room_id.as_str(),
			vec![
				state_event("$create", "m.room.create", "", alice, 1, json!({"creator": alice})),
				state_event("$join-alice", "m.room.member", alice, alice, 2, json!({"membership": "join"})),
				state_event("$power-v1", "m.room.power_levels", "", alice, 3, json!({"users_default": 0})),
			],
		)
		.await
		.unwrap();

	let first_msg =
		accumulator.accumulate(room_id.as_str(), TimelineInput { events: vec![message_event("$msg1", alice, 4)], limited: false, prev_batch: None }).await.unwrap();
	conn.notify_room_nids(room_id.as_str(), &first_msg.timeline_nids);

	let mut subscriptions = BTreeMap::new();
	subscriptions.insert(
		room_id.clone(),
		RoomSubscription { timeline_limit: 10, required_state: vec![("m.room.power_levels".to_owned(), Some(String::new()))] },
	);

	let response1 = conn
		.handle(
			UserId::parse(alice).unwrap().to_owned(),
			device.clone(),
			SyncRequest { conn_id: "c1".into(), pos: None, lists: BTreeMap::new(), room_subscriptions: subscriptions.clone(), timeout: Duration::ZERO },
		)
		.await
		.unwrap();
	assert!(response1.rooms.contains_key(&room_id));
	let pos1 = response1.pos;

	let gap = accumulator
		.initialise(
			room_id.as_str(),
			vec![
				state_event("$name-banana", "m.room.name", "", alice, 5, json!({"name": "banana"})),
				state_event("$power-v2", "m.room.power_levels", "", alice, 6, json!({"users_default": 50})),
			],
		)
		.await
		.unwrap();
	assert!(gap.replaced_existing_snapshot);
	conn.invalidate_for_gap(&room_id);

	let second_msg = accumulator
		.accumulate(
			room_id.as_str(),
			TimelineInput { events: vec![message_event("$msg2", alice, 7)], limited: true, prev_batch: Some("gap-token".to_owned()) },
		)
		.await
		.unwrap();
	conn.notify_room_nids(room_id.as_str(), &second_msg.timeline_nids);

	let stale = conn
		.handle(
			UserId::parse(alice).unwrap().to_owned(),
			device.clone(),
			SyncRequest { conn_id: "c1".into(), pos: Some(pos1), lists: BTreeMap::new(), room_subscriptions: BTreeMap::new(), timeout: Duration::ZERO },
		)
		.await;
	assert!(matches!(stale, Err(Error::UnknownPos)));

	let response2 = conn
		.handle(
			UserId::parse(alice).unwrap().to_owned(),
			device,
			SyncRequest { conn_id: "c1".into(), pos: None, lists: BTreeMap::new(), room_subscriptions: subscriptions, timeout: Duration::ZERO },
		)
		.await
		.unwrap();
	let delta = response2.rooms.get(&room_id).unwrap();
	let state_events = events::by_ids(store.pool(), &delta.required_state_event_ids).await.unwrap();
	let power_levels = state_events.iter().find(|e| e.event_type == "m.room.power_levels").unwrap();
	assert_eq!(power_levels.event_id, "$power-v2");
}

/// Scenario 3: the same gappy-invalidation path, with two members sharing a
/// room and the gap carrying a membership change for one of them — confirms
/// `invalidate_for_gap` doesn't care which state changed, only that the
/// snapshot was replaced.
#[sqlx::test(migrations = "../store/migrations")]
async fn membership_change_in_gap_invalidates_session(pool: PgPool) {
	let store = Store::from_pool(pool);
	let cache = Arc::new(Cache::rebuild(&store).await.unwrap());
	let accumulator = Accumulator::new(store.clone(), Arc::clone(&cache), 50);
	let conn = ConnManager::new(store.clone(), Arc::clone(&cache));

	let room_id = room("!shared:example.org");
	let alice = "@alice:example.org";
	let bob = "@bob:example.org";
	let bob_device = <&DeviceId>::try_from("BOBB").unwrap().to_owned();

	accumulator
		.initialise(
			room_id.as_str(),
			vec![
				state_event("$create", "m.room.create", "", alice, 1, json!({"creator": alice})),
				state_event("$join-alice", "m.room.member", alice, alice, 2, json!({"membership": "join"})),
				state_event("$join-bob", "m.room.member", bob, bob, 3, json!({"membership": "join"})),
			],
		)
		.await
		.unwrap();

	let first_msg =
		accumulator.accumulate(room_id.as_str(), TimelineInput { events: vec![message_event("$msg1", alice, 4)], limited: false, prev_batch: None }).await.unwrap();
	conn.notify_room_nids(room_id.as_str(), &first_msg.timeline_nids);

	let mut subscriptions = BTreeMap::new();
	subscriptions.insert(room_id.clone(), RoomSubscription { timeline_limit: 10, required_state: vec![] });

	let bob_response = conn
		.handle(
			UserId::parse(bob).unwrap().to_owned(),
			bob_device.clone(),
			SyncRequest { conn_id: "bob-conn".into(), pos: None, lists: BTreeMap::new(), room_subscriptions: subscriptions, timeout: Duration::ZERO },
		)
		.await
		.unwrap();
	let bob_pos = bob_response.pos;

	let gap = accumulator.initialise(room_id.as_str(), vec![state_event("$leave-bob", "m.room.member", bob, bob, 5, json!({"membership": "leave"}))]).await.unwrap();
	assert!(gap.replaced_existing_snapshot);
	conn.invalidate_for_gap(&room_id);

	let second_msg = accumulator
		.accumulate(room_id.as_str(), TimelineInput { events: vec![message_event("$msg2", alice, 6)], limited: true, prev_batch: Some("gap-token-2".to_owned()) })
		.await
		.unwrap();
	conn.notify_room_nids(room_id.as_str(), &second_msg.timeline_nids);

	let stale = conn
		.handle(
			UserId::parse(bob).unwrap().to_owned(),
			bob_device,
			SyncRequest { conn_id: "bob-conn".into(), pos: Some(bob_pos), lists: BTreeMap::new(), room_subscriptions: BTreeMap::new(), timeout: Duration::ZERO },
		)
		.await;
	assert!(matches!(stale, Err(Error::UnknownPos)));
}

/// Scenario 4: `ExpireOldPollers` never itself advances a device's `since` —
/// it only flags the matching active poller (if any) to stop.
#[sqlx::test(migrations = "../store/migrations")]
async fn expire_old_pollers_never_advances_since(pool: PgPool) {
	let store = Store::from_pool(pool);
	devices::set_since(store.pool(), "@dora:example.org", "DDDD", "r1").await.unwrap();
	tokens::insert(store.pool(), "tok-d", "@dora:example.org", "DDDD").await.unwrap();
	sqlx::query("UPDATE tokens SET last_seen = now() - interval '1 hour' WHERE token = $1")
		.bind("tok-d")
		.execute(store.pool())
		.await
		.unwrap();

	let cache = Arc::new(Cache::rebuild(&store).await.unwrap());
	let accumulator = Arc::new(Accumulator::new(store.clone(), Arc::clone(&cache), 50));
	let conn = Arc::new(ConnManager::new(store.clone(), Arc::clone(&cache)));
	let upstream = Arc::new(UpstreamClient::new("http://127.0.0.1:1").unwrap());
	let config = Arc::new(test_config("http://127.0.0.1:1"));
	let pool_handle = PollerPool::new(store.clone(), accumulator, upstream, conn, config);

	pool_handle.expire_old_pollers().await.unwrap();

	assert_eq!(devices::get_since(store.pool(), "@dora:example.org", "DDDD").await.unwrap(), "r1");
}

/// Scenario 5: a poller that fails with an unauthorized upstream response
/// before committing must not wedge `ensure_polling` for a subsequent,
/// valid token on the same (user, device).
#[sqlx::test(migrations = "../store/migrations")]
async fn expired_token_does_not_wedge_pending_map(pool: PgPool) {
	let store = Store::from_pool(pool);
	let cache = Arc::new(Cache::rebuild(&store).await.unwrap());
	let accumulator = Arc::new(Accumulator::new(store.clone(), Arc::clone(&cache), 50));
	let conn = Arc::new(ConnManager::new(store.clone(), Arc::clone(&cache)));
	let (base_url, fake) = spawn_fake_upstream().await;
	let upstream = Arc::new(UpstreamClient::new(&base_url).unwrap());
	let config = Arc::new(test_config(&base_url));
	let pool_handle = Arc::new(PollerPool::new(store.clone(), accumulator, upstream, conn, config));

	let user = UserId::parse("@erin:example.org").unwrap().to_owned();
	let device = <&DeviceId>::try_from("EEEE").unwrap().to_owned();

	fake.fail_next("tok-old", 1);
	let first = pool_handle.ensure_polling(user.clone(), device.clone(), "tok-old".to_owned()).await;
	assert!(!first);

	fake.push_response("tok-new", json!({"next_batch": "r1", "rooms": {}}));
	let second = pool_handle.ensure_polling(user, device, "tok-new".to_owned()).await;
	assert!(second);
}

/// Scenario 6: a client's timeline window must stop at the gap boundary and
/// echo the real upstream pagination token, not an event id standing in
/// for one.
#[sqlx::test(migrations = "../store/migrations")]
async fn timeline_stops_at_gap_boundary(pool: PgPool) {
	let store = Store::from_pool(pool);
	let cache = Arc::new(Cache::rebuild(&store).await.unwrap());
	let accumulator = Accumulator::new(store.clone(), Arc::clone(&cache), 50);
	let conn = ConnManager::new(store.clone(), Arc::clone(&cache));

	let room_id = room("!gap:example.org");
	let alice = "@alice:example.org";
	let device = <&DeviceId>::try_from("ALIC").unwrap().to_owned();

	accumulator
		.initialise(
			room_id.as_str(),
			vec![
				state_event("$create", "m.room.create", "", alice, 1, json!({"creator": alice})),
				state_event("$join-alice", "m.room.member", alice, alice, 2, json!({"membership": "join"})),
			],
		)
		.await
		.unwrap();

	accumulator
		.accumulate(
			room_id.as_str(),
			TimelineInput {
				events: vec![message_event("$e1", alice, 3), message_event("$e2", alice, 4), message_event("$e3", alice, 5)],
				limited: false,
				prev_batch: None,
			},
		)
		.await
		.unwrap();

	let gap = accumulator
		.accumulate(
			room_id.as_str(),
			TimelineInput { events: vec![message_event("$e4", alice, 6)], limited: true, prev_batch: Some("upstream-gap-token".to_owned()) },
		)
		.await
		.unwrap();
	conn.notify_room_nids(room_id.as_str(), &gap.timeline_nids);

	let mut subscriptions = BTreeMap::new();
	subscriptions.insert(room_id.clone(), RoomSubscription { timeline_limit: 10, required_state: vec![] });

	let response = conn
		.handle(
			UserId::parse(alice).unwrap().to_owned(),
			device,
			SyncRequest { conn_id: "c1".into(), pos: None, lists: BTreeMap::new(), room_subscriptions: subscriptions, timeout: Duration::ZERO },
		)
		.await
		.unwrap();

	let delta = response.rooms.get(&room_id).unwrap();
	assert_eq!(delta.timeline_event_ids, vec!["$e4".to_owned()]);
	assert!(delta.limited);
	assert_eq!(delta.prev_batch, Some("upstream-gap-token".to_owned()));
}
