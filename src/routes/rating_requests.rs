
use crate::{model::{rating_requests::{RatingRequestForAdd, RatingRequestForUpdate, RatingRequestQuery}, ModelController}, Result};
use axum::{extract::State, routing::{delete, get, patch, post}, Json, Router};
use serde_json::{json, Value};

use super::{JsonBody, PathParam, QueryParams};



pub fn routes(mc: ModelController) -> Router {
	Router::new()
		.route("/", get(handler_list))
		.route("/", post(handler_post))
		.route("/:id", get(handler_get))
		.route("/:id", patch(handler_patch))
		.route("/:id", delete(handler_delete))
		.with_state(mc)
}

async fn handler_list(State(mc): State<ModelController>, QueryParams(query): QueryParams<RatingRequestQuery>) -> Result<Json<Value>> {
	let ratings = mc.get_rating_requests(query).await?;
	let body = Json(json!(ratings));
	Ok(body)
}

async fn handler_get(PathParam(id): PathParam<i64>, State(mc): State<ModelController>) -> Result<Json<Value>> {
	let rating = mc.get_rating_request(id).await?;
	let body = Json(json!(rating));
	Ok(body)
}

async fn handler_patch(PathParam(id): PathParam<i64>, State(mc): State<ModelController>, JsonBody(update): JsonBody<RatingRequestForUpdate>) -> Result<Json<Value>> {
	let updated = mc.update_rating_request(id, update).await?;
	Ok(Json(json!(updated)))
}

async fn handler_delete(PathParam(id): PathParam<i64>, State(mc): State<ModelController>) -> Result<Json<Value>> {
	let removed = mc.remove_rating_request(id).await?;
	let body = Json(json!(removed));
	Ok(body)
}

async fn handler_post(State(mc): State<ModelController>, JsonBody(rating): JsonBody<RatingRequestForAdd>) -> Result<Json<Value>> {
	let rating = mc.add_rating_request(rating).await?;
	let body = Json(json!(rating));
	Ok(body)
}
