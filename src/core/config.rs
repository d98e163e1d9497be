use std::path::PathBuf;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

use crate::{err, Result};

fn default_listen_addr() -> String { "0.0.0.0:8008".to_owned() }

fn default_max_timeline_limit() -> u32 { 50 }

fn default_poller_idle_timeout_secs() -> u64 { 15 * 60 }

fn default_token_expire_secs() -> u64 { 60 * 60 }

fn default_poll_timeout_ms() -> u64 { 30_000 }

fn default_log() -> String { "info".to_owned() }

/// Deserialized once at startup and handed to every component as an
/// `Arc<Config>`; there is no hot-reload path, unlike the file this was
/// adapted from.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	/// `postgres://...` connection string for the event store.
	pub database_url: String,

	/// Base URL of the homeserver this proxy polls on behalf of clients.
	pub upstream_base_url: String,

	/// Address the proxy's own HTTP listener binds to.
	#[serde(default = "default_listen_addr")]
	pub listen_addr: String,

	/// Largest `timeline_limit` a sliding-sync list request may request;
	/// larger values are clamped down to this.
	#[serde(default = "default_max_timeline_limit")]
	pub max_timeline_limit: u32,

	/// How long a poller may sit with no active connection referencing it
	/// before `ExpireOldPollers` tears it down.
	#[serde(default = "default_poller_idle_timeout_secs")]
	pub poller_idle_timeout_secs: u64,

	/// How long an issued proxy token remains valid with no upstream
	/// confirmation before it is treated as expired.
	#[serde(default = "default_token_expire_secs")]
	pub token_expire_secs: u64,

	/// Default `timeout` forwarded on upstream long-poll requests when the
	/// client didn't specify one.
	#[serde(default = "default_poll_timeout_ms")]
	pub default_poll_timeout_ms: u64,

	/// `tracing_subscriber::EnvFilter` directive string.
	#[serde(default = "default_log")]
	pub log: String,
}

impl Config {
	/// Load configuration from (in ascending priority) an optional TOML file
	/// and `SSYNC_`-prefixed environment variables.
	pub fn load(path: Option<PathBuf>) -> Result<Self> {
		let raw = if let Some(config_file_env) = Env::var("SSYNC_CONFIG") {
			Figment::new()
				.merge(Toml::file(config_file_env).nested())
				.merge(Env::prefixed("SSYNC_").global())
		} else if let Some(config_file_arg) = path {
			Figment::new()
				.merge(Toml::file(config_file_arg).nested())
				.merge(Env::prefixed("SSYNC_").global())
		} else {
			Figment::new().merge(Env::prefixed("SSYNC_").global())
		};

		raw.extract()
			.map_err(|e| err!("bad configuration: {e}"))
	}
}
