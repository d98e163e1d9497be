use bytes::BytesMut;
use http::StatusCode;
use http_body_util::Full;
use ruma::api::client::error::{ErrorBody, ErrorKind};
use ruma::api::client::uiaa::UiaaResponse;
use ruma::api::OutgoingResponse;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure mode reachable from the public API surface. Variants that
/// cross into a wire response carry enough to pick both an `ErrorKind` and
/// an HTTP status; everything else is an opaque `Err(String)` produced by
/// the `err!`/`Err!` macros.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{0}")]
	Err(String),

	#[error("unrecognized access token")]
	UnknownToken,

	#[error("unrecognized sync position")]
	UnknownPos,

	#[error("upstream homeserver rejected the access token")]
	UpstreamUnauthorized,

	#[error("upstream homeserver request failed: {0}")]
	UpstreamTransient(String),

	#[error("invalid request: {0}")]
	Validation(&'static str),

	#[error("store error: {0}")]
	Database(String),

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	#[error("sqlx error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("sqlx migration error: {0}")]
	Migrate(#[from] sqlx::migrate::MigrateError),

	#[error("upstream http error: {0}")]
	Reqwest(#[from] reqwest::Error),

	#[error("invalid matrix identifier: {0}")]
	RumaIdParse(#[from] ruma::IdParseError),

	#[error("background task failed: {0}")]
	Join(#[from] tokio::task::JoinError),
}

impl Error {
	/// Matrix error kind this failure should be reported as on the wire.
	#[must_use]
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::UnknownToken | Self::UpstreamUnauthorized => ErrorKind::UnknownToken {
				soft_logout: false,
			},
			Self::UnknownPos => ErrorKind::Unknown,
			Self::Validation(_) => ErrorKind::MissingParam,
			_ => ErrorKind::Unknown,
		}
	}

	#[must_use]
	pub fn message(&self) -> String {
		self.to_string()
	}

	#[must_use]
	pub fn status_code(&self) -> StatusCode {
		match self {
			Self::UnknownToken | Self::UpstreamUnauthorized => StatusCode::UNAUTHORIZED,
			Self::UnknownPos | Self::Validation(_) => StatusCode::BAD_REQUEST,
			Self::UpstreamTransient(_) => StatusCode::BAD_GATEWAY,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<Error> for UiaaResponse {
	fn from(error: Error) -> Self {
		let body = ErrorBody::Standard {
			kind: error.kind(),
			message: error.message(),
		};

		Self::MatrixError(ruma::api::client::error::Error {
			status_code: error.status_code(),
			body,
		})
	}
}

impl axum::response::IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		if self.status_code().is_server_error() {
			tracing::error!(error = %self, "request failed");
		} else {
			tracing::debug!(error = %self, "request rejected");
		}

		let response: UiaaResponse = self.into();
		response
			.try_into_http_response::<BytesMut>()
			.inspect_err(|e| tracing::error!("error response error: {e}"))
			.map_or_else(
				|_| StatusCode::INTERNAL_SERVER_ERROR.into_response(),
				|r| r.map(BytesMut::freeze).map(Full::new).into_response(),
			)
	}
}
