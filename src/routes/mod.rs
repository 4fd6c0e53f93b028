use axum::extract::{FromRequest, FromRequestParts};

use crate::Error;

pub mod ping;
pub mod rating_requests;

// Extractors whose rejections answer with the crate's JSON error body.

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct PathParam<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct QueryParams<T>(pub T);
