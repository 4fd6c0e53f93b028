#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]

use axum::{http::Method, Router};
use clap::Parser;
use hyper::header::{ACCEPT, CONTENT_TYPE};
use model::{store::SqliteStore, ModelController};
use server::{get_server_host, get_server_port, Args};
use tokio::net::TcpListener;
use tools::log::{init_logging, log_info, LogServiceType};
use tower::ServiceBuilder;
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};
pub use self::error::{Result, Error};

mod model;
mod routes;
mod error;
mod tools;
mod server;
mod domain;


#[tokio::main]
async fn main() ->  Result<()> {
    init_logging();
    log_info(LogServiceType::Register, "Starting star ratings server".to_string());
    let args = Args::parse();
    log_info(LogServiceType::Register, "Initializing config".to_string());
    server::initialize_config(args).await?;

    let store = SqliteStore::new().await?;
    let mc = ModelController::new(store);

    let local_port = get_server_port().await?;
    let host = get_server_host().await?;
    let listener = TcpListener::bind(format!("{}:{}", host, local_port)).await
        .map_err(|e| Error::ServerUnableToBind(format!("{}:{} {}", host, local_port, e)))?;
    log_info(LogServiceType::Register, format!("->> LISTENING on {:?}", listener.local_addr()));

    axum::serve(listener, app(mc)).await?;

	Ok(())
}



fn app(mc: ModelController) -> Router {
    let cors: CorsLayer = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::PATCH, Method::DELETE, Method::HEAD, Method::OPTIONS, Method::POST])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        // allow requests from any origin
        .allow_origin(Any);

    Router::new()
        .nest("/ping", routes::ping::routes())
        .nest("/ratings", routes::rating_requests::routes(mc))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
        )
}



#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{self, Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt; // for `call`, `oneshot`, and `ready`

    async fn test_app() -> Router {
        let mc = ModelController::new_in_memory().await.unwrap();
        app(mc)
    }

    async fn send(app: &Router, method: http::Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(value) => Body::from(serde_json::to_vec(&value).unwrap()),
            None => Body::empty(),
        };
        let response = app.clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = if body.is_empty() { Value::Null } else { serde_json::from_slice(&body).unwrap() };
        (status, body)
    }

    #[tokio::test]
    async fn json() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method(http::Method::GET)
                    .uri("/ping")
                    .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*",
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["result"]["success"], json!(true));
    }

    #[tokio::test]
    async fn not_found() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn ratings_lifecycle() {
        let app = test_app().await;

        let (status, created) = send(&app, http::Method::POST, "/ratings", Some(json!({"id": 77, "givenStars": 4, "totalGivenStars": 9, "totalMaxStars": 10, "averageStars": 4.5}))).await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_i64().unwrap();
        assert_ne!(id, 77);
        assert_eq!(created["givenStars"], json!(4));
        assert_eq!(created["averageStars"], json!(4.5));

        let (status, fetched) = send(&app, http::Method::GET, &format!("/ratings/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, updated) = send(&app, http::Method::PATCH, &format!("/ratings/{}", id), Some(json!({"totalMaxStars": 15}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["totalMaxStars"], json!(15));
        assert_eq!(updated["totalGivenStars"], json!(9));

        let (status, list) = send(&app, http::Method::GET, "/ratings?givenStars=4", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, removed) = send(&app, http::Method::DELETE, &format!("/ratings/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(removed, updated);

        let (status, error) = send(&app, http::Method::GET, &format!("/ratings/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["error"]["type"], json!("NOT_FOUND"));
    }

    #[tokio::test]
    async fn ratings_list_query() {
        let app = test_app().await;
        let mut ids = vec![];
        for stars in [5, 3, 5] {
            let (_, created) = send(&app, http::Method::POST, "/ratings", Some(json!({"givenStars": stars, "totalMaxStars": 5}))).await;
            ids.push(created["id"].as_i64().unwrap());
        }

        let (status, latest) = send(&app, http::Method::GET, "/ratings?order=DESC&limit=1", None).await;
        assert_eq!(status, StatusCode::OK);
        let latest = latest.as_array().unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0]["id"], json!(ids[2]));

        let (status, after) = send(&app, http::Method::GET, &format!("/ratings?after={}", ids[0]), None).await;
        assert_eq!(status, StatusCode::OK);
        let after_ids = after.as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect::<Vec<_>>();
        assert_eq!(after_ids, vec![ids[1], ids[2]]);

        let (status, fives) = send(&app, http::Method::GET, "/ratings?givenStars=5&order=DESC", None).await;
        assert_eq!(status, StatusCode::OK);
        let five_ids = fives.as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect::<Vec<_>>();
        assert_eq!(five_ids, vec![ids[2], ids[0]]);
    }

    #[tokio::test]
    async fn ratings_invalid_input() {
        let app = test_app().await;

        // order values are case sensitive
        let (status, error) = send(&app, http::Method::GET, "/ratings?order=desc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["type"], json!("INVALID_PARAMS"));

        let (status, error) = send(&app, http::Method::GET, "/ratings/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["type"], json!("INVALID_PARAMS"));
        assert!(error["error"]["req_uuid"].is_string());

        let (status, error) = send(&app, http::Method::PATCH, "/ratings/abc", Some(json!({"givenStars": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["type"], json!("INVALID_PARAMS"));

        let response = app.clone()
            .oneshot(
                Request::builder()
                    .method(http::Method::POST)
                    .uri("/ratings")
                    .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["type"], json!("INVALID_PARAMS"));

        let (status, list) = send(&app, http::Method::GET, "/ratings", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(list.as_array().unwrap().is_empty());
    }
}
