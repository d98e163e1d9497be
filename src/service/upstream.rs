use ruma::api::client::session::whoami;
use ssync_core::{err, Error, Result};

/// Thin wrapper around the homeserver the proxy polls on behalf of clients,
/// built on reqwest for outbound sync/whoami calls.
pub struct UpstreamClient {
	http: reqwest::Client,
	base_url: reqwest::Url,
}

impl UpstreamClient {
	pub fn new(base_url: &str) -> Result<Self> {
		let base_url = reqwest::Url::parse(base_url).map_err(|e| err!("bad upstream_base_url: {e}"))?;
		let http = reqwest::Client::builder()
			.build()
			.map_err(Error::Reqwest)?;

		Ok(Self { http, base_url })
	}

	/// Resolves a bearer token to `(user_id, device_id)` via the upstream
	/// `whoami` endpoint. A 401 maps to [`Error::UpstreamUnauthorized`].
	#[tracing::instrument(skip(self, token))]
	pub async fn whoami(&self, token: &str) -> Result<(String, String)> {
		let url = self
			.base_url
			.join("_matrix/client/v3/account/whoami")
			.map_err(|e| err!("bad whoami url: {e}"))?;

		let response = self
			.http
			.get(url)
			.bearer_auth(token)
			.send()
			.await
			.map_err(|e| Error::UpstreamTransient(e.to_string()))?;

		if response.status() == reqwest::StatusCode::UNAUTHORIZED {
			return Err(Error::UpstreamUnauthorized);
		}

		let body: whoami::v3::Response = response
			.error_for_status()
			.map_err(|e| Error::UpstreamTransient(e.to_string()))?
			.json()
			.await
			.map_err(|e| Error::UpstreamTransient(e.to_string()))?;

		let device_id = body
			.device_id
			.ok_or_else(|| err!("upstream whoami did not return a device_id"))?;

		Ok((body.user_id.to_string(), device_id.to_string()))
	}

	/// Issues one `/sync` long-poll against upstream. `since` empty means an
	/// initial sync. Returns the raw JSON body for the poller to decompose
	/// into timeline/state/to_device blocks, since this crate does not need
	/// every field `ruma`'s typed sync response models.
	#[tracing::instrument(skip(self, token))]
	pub async fn sync(
		&self,
		token: &str,
		since: &str,
		timeout_ms: u64,
		full_state: bool,
		exclude_room_timelines: bool,
		timeline_limit: u32,
	) -> Result<serde_json::Value> {
		let mut url = self
			.base_url
			.join("_matrix/client/v3/sync")
			.map_err(|e| err!("bad sync url: {e}"))?;

		{
			let mut query = url.query_pairs_mut();
			if !since.is_empty() {
				query.append_pair("since", since);
			}
			query.append_pair("timeout", &timeout_ms.to_string());
			if full_state {
				query.append_pair("full_state", "true");
			}
			let filter = if exclude_room_timelines {
				r#"{"room":{"rooms":[],"timeline":{"limit":1}}}"#.to_owned()
			} else {
				format!(r#"{{"room":{{"timeline":{{"limit":{timeline_limit}}}}}}}"#)
			};
			query.append_pair("filter", &filter);
		}

		let response = self
			.http
			.get(url)
			.bearer_auth(token)
			.send()
			.await
			.map_err(|e| Error::UpstreamTransient(e.to_string()))?;

		if response.status() == reqwest::StatusCode::UNAUTHORIZED {
			return Err(Error::UpstreamUnauthorized);
		}

		response
			.error_for_status()
			.map_err(|e| Error::UpstreamTransient(e.to_string()))?
			.json()
			.await
			.map_err(|e| Error::UpstreamTransient(e.to_string()))
	}
}
