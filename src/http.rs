//! HTTP transport — maps the three read/create routes onto the service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /temporal/:id` — record for `id`, or JSON `null` when absent.
//! - `GET /temporal/all` — every record.
//! - `GET /temporal/create` — persist and return a now-stamped record built
//!   from the host's default zone.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tzweb::{http, SqliteRepository, TemporalService};
//!
//! let service = Arc::new(TemporalService::new(SqliteRepository::open("tzweb.db")?));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone());
//!
//! // Or serve directly
//! http::serve(service, "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::error::RepositoryError;
use crate::repository::Repository;
use crate::service::TemporalService;
use crate::temporal::Temporal;

/// Build an axum `Router` over the given service.
pub fn router<R>(service: Arc<TemporalService<R>>) -> Router
where
    R: Repository + Send + Sync + 'static,
{
    Router::new()
        .route("/temporal/all", get(all_handler::<R>))
        .route("/temporal/create", get(create_handler::<R>))
        .route("/temporal/:id", get(get_handler::<R>))
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<R>(
    service: Arc<TemporalService<R>>,
    addr: &str,
) -> Result<(), std::io::Error>
where
    R: Repository + Send + Sync + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// `GET /temporal/:id` — an unknown id serializes as `null` with status 200;
/// not-found is an empty result, not an error, at every layer.
async fn get_handler<R>(
    State(service): State<Arc<TemporalService<R>>>,
    Path(id): Path<i64>,
) -> Response
where
    R: Repository + Send + Sync + 'static,
{
    match service.get_temporal(id) {
        Ok(found) => Json(found).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /temporal/all` — every record as a JSON array.
async fn all_handler<R>(State(service): State<Arc<TemporalService<R>>>) -> Response
where
    R: Repository + Send + Sync + 'static,
{
    match service.get_temporals() {
        Ok(all) => Json(all).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /temporal/create` — build a record stamped with the current moment
/// in the host's default zone, persist it, and return the stored form.
async fn create_handler<R>(State(service): State<Arc<TemporalService<R>>>) -> Response
where
    R: Repository + Send + Sync + 'static,
{
    match service.save(&Temporal::now()) {
        Ok(saved) => Json(saved).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(e: RepositoryError) -> Response {
    let body = json!({ "error": e.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
