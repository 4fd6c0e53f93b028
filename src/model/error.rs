use derive_more::From;
use hyper::StatusCode;
use serde::Serialize;
use serde_with::{serde_as, DisplayFromStr};

use crate::error::ClientError;


pub type Result<T> = core::result::Result<T, Error>;

#[serde_as]
#[derive(Debug, Serialize, From, strum_macros::AsRefStr)]
pub enum Error {
	RatingRequestNotFound(i64),
	NonFiniteAverageStars,

    CannotOpenDatabase,

	// -- Externals
	#[from]
	TokioRusqlite(#[serde_as(as = "DisplayFromStr")] tokio_rusqlite::Error),

	#[from]
	Rusqlite(#[serde_as(as = "DisplayFromStr")] rusqlite::Error),
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


impl Error {
	pub fn client_status_and_error(&self) -> (StatusCode, ClientError) {
		match self {
			Error::RatingRequestNotFound(_) => (StatusCode::NOT_FOUND, ClientError::NOT_FOUND),
			Error::NonFiniteAverageStars => (StatusCode::BAD_REQUEST, ClientError::INVALID_PARAMS),

			Error::CannotOpenDatabase => (StatusCode::INTERNAL_SERVER_ERROR, ClientError::SERVICE_ERROR),
			Error::Rusqlite(_) | Error::TokioRusqlite(_) => (StatusCode::INTERNAL_SERVER_ERROR, ClientError::SERVICE_ERROR),
		}
	}
}
