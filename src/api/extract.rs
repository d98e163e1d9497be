//! Bearer-token auth extractor. The wire-facing half of `EnsurePolling`:
//! resolves a token to a `(user_id, device_id)` pair, falling back to the
//! upstream homeserver the first time a token is seen, then blocks the
//! request on the device's poller having completed at least one sync
//! before letting it through to the handler.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::{Authorization, Bearer};
use axum_extra::headers::HeaderMapExt;
use ruma::{OwnedDeviceId, OwnedUserId, UserId};
use ssync_core::{err, Error, Result};
use ssync_service::Services;

/// The authenticated identity behind an incoming sliding-sync request.
/// Handlers take this as an extractor argument ahead of the request body.
pub struct AuthenticatedDevice {
	pub user_id: OwnedUserId,
	pub device_id: OwnedDeviceId,
	pub token: String,
}

impl FromRequestParts<Arc<Services>> for AuthenticatedDevice {
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, services: &Arc<Services>) -> Result<Self> {
		let token = bearer_token(parts)?;
		let (user_id, device_id) = resolve_identity(services, &token).await?;

		if !services
			.poller
			.ensure_polling(user_id.clone(), device_id.clone(), token.clone())
			.await
		{
			return Err(err!(UpstreamUnauthorized));
		}

		Ok(Self {
			user_id,
			device_id,
			token,
		})
	}
}

fn bearer_token(parts: &Parts) -> Result<String> {
	parts
		.headers
		.typed_get::<Authorization<Bearer>>()
		.map(|auth| auth.token().to_owned())
		.ok_or_else(|| err!(UnknownToken))
}

/// Local-first token resolution: a token already bound to a device in
/// `tokens` skips the upstream round trip entirely; a token seen for the
/// first time is confirmed via `whoami` and persisted.
async fn resolve_identity(services: &Services, token: &str) -> Result<(OwnedUserId, OwnedDeviceId)> {
	if let Some(row) = ssync_store::tokens::lookup(services.store.pool(), token).await? {
		let user_id = UserId::parse(&row.user_id)?;
		let device_id: OwnedDeviceId = row.device_id.as_str().into();
		return Ok((user_id, device_id));
	}

	let (user_id, device_id) = services.upstream.whoami(token).await?;
	let user_id = UserId::parse(&user_id)?;
	let device_id: OwnedDeviceId = device_id.as_str().into();

	ssync_store::tokens::insert(services.store.pool(), token, user_id.as_str(), device_id.as_str()).await?;

	Ok((user_id, device_id))
}

#[cfg(test)]
mod tests {
	use http::header::AUTHORIZATION;

	use super::*;

	fn parts_with_authorization(value: Option<&str>) -> Parts {
		let mut builder = http::Request::builder();
		if let Some(value) = value {
			builder = builder.header(AUTHORIZATION, value);
		}
		builder.body(()).expect("valid request").into_parts().0
	}

	#[test]
	fn bearer_token_extracts_from_authorization_header() {
		let parts = parts_with_authorization(Some("Bearer abc123"));
		assert_eq!(bearer_token(&parts).unwrap(), "abc123");
	}

	#[test]
	fn bearer_token_rejects_missing_header() {
		let parts = parts_with_authorization(None);
		assert!(matches!(bearer_token(&parts), Err(Error::UnknownToken)));
	}

	#[test]
	fn bearer_token_rejects_non_bearer_scheme() {
		let parts = parts_with_authorization(Some("Basic abc123"));
		assert!(matches!(bearer_token(&parts), Err(Error::UnknownToken)));
	}
}
