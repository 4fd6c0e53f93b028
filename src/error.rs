use axum::{extract::rejection::{JsonRejection, PathRejection, QueryRejection}, http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use derive_more::From;
use serde_json::json;
use serde_with::{serde_as, DisplayFromStr};
use nanoid::nanoid;

use crate::tools::log::{log_error, LogServiceType};

pub type Result<T> = core::result::Result<T, Error>;

#[serde_as]
#[derive(Debug, Serialize, From, strum_macros::AsRefStr)]
#[serde(tag = "type", content = "data")]
pub enum Error {
	// -- Request errors.
	InvalidRequest(String),

    // -- Servers errors.
	ServerMalformatedConfigFile,
	ServerUnableToAccessServerLocalFolder,
	ServerUnableToBind(String),

	// -- Externals

	#[from]
	Model(#[serde_as(as = "DisplayFromStr")] crate::model::error::Error),

	#[from]
	Io(#[serde_as(as = "DisplayFromStr")] std::io::Error),

	#[from]
	Serde(#[serde_as(as = "DisplayFromStr")] serde_json::Error),
}

// region:    --- Error Boilerplate
impl core::fmt::Display for Error {
	fn fmt(
		&self,
		fmt: &mut core::fmt::Formatter,
	) -> core::result::Result<(), core::fmt::Error> {
		write!(fmt, "{self:?}")
	}
}

impl std::error::Error for Error {}
// endregion: --- Error Boilerplate

// region:    --- Extractor rejections
impl From<JsonRejection> for Error {
	fn from(rejection: JsonRejection) -> Self {
		Self::InvalidRequest(rejection.body_text())
	}
}

impl From<PathRejection> for Error {
	fn from(rejection: PathRejection) -> Self {
		Self::InvalidRequest(rejection.body_text())
	}
}

impl From<QueryRejection> for Error {
	fn from(rejection: QueryRejection) -> Self {
		Self::InvalidRequest(rejection.body_text())
	}
}
// endregion: --- Extractor rejections

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let nanoid = nanoid!();
		log_error(LogServiceType::Other, format!("{} - {:?}", nanoid, self));
		let (status_code, client_error) = self.client_status_and_error();

		// -- If client error, build the new reponse.
		let error_json = json!({
						"error": {
							"type": client_error.as_ref(),
							"req_uuid": nanoid.to_string(),
						}
					});

		(status_code, Json(error_json)).into_response()
	}
}

impl Error {
	pub fn client_status_and_error(&self) -> (StatusCode, ClientError) {
		#[allow(unreachable_patterns)]
		match self {
			Self::InvalidRequest(_) => (StatusCode::BAD_REQUEST, ClientError::INVALID_PARAMS),
			Self::Model(err) => err.client_status_and_error(),

			// -- Fallback.
			_ => (
				StatusCode::INTERNAL_SERVER_ERROR,
				ClientError::SERVICE_ERROR,
			),
		}
	}
}


#[derive(Debug, strum_macros::AsRefStr)]
#[allow(non_camel_case_types)]
pub enum ClientError {
	NOT_FOUND,
	INVALID_PARAMS,
	SERVICE_ERROR,
}
