//! HTTP routes.

use axum::{Json, Router, routing::get};
use serde_json::Value;
use tower_http::trace::TraceLayer;

use crate::schema::{self, EndpointSchema};

use super::error::AppError;
use super::state::AppState;
use super::{bus, train};

/// Title of the generated API description.
const API_TITLE: &str = "Transit Gateway";

/// Create the application router.
///
/// Every endpoint is mounted at the path its schema declares.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/docs/openapi.json", get(openapi))
        .merge(bus_routes())
        .merge(train_routes())
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn bus_routes() -> Router<AppState> {
    use schema::bus::*;

    Router::new()
        .route(&path(&TIME), get(bus::time))
        .route(&path(&VEHICLES), get(bus::vehicles))
        .route(&path(&ROUTES), get(bus::routes))
        .route(&path(&DIRECTIONS), get(bus::directions))
        .route(&path(&STOPS), get(bus::stops))
        .route(&path(&ROUTE_PATTERNS), get(bus::route_patterns))
        .route(&path(&PATTERNS), get(bus::patterns))
        .route(&path(&STOP_PREDICTIONS), get(bus::stop_predictions))
        .route(&path(&VEHICLE_PREDICTIONS), get(bus::vehicle_predictions))
        .route(&path(&BULLETINS), get(bus::bulletins))
}

fn train_routes() -> Router<AppState> {
    use schema::train::*;

    Router::new()
        .route(&path(&STATION_ARRIVALS), get(train::station_arrivals))
        .route(&path(&STOP_ARRIVALS), get(train::stop_arrivals))
        .route(&path(&RUN), get(train::run))
        .route(&path(&LOCATIONS), get(train::locations))
}

fn path(schema: &EndpointSchema) -> String {
    schema.route_path()
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// API description generated from the endpoint schemas.
async fn openapi() -> Json<Value> {
    Json(schema::describe(
        &schema::all(),
        API_TITLE,
        env!("CARGO_PKG_VERSION"),
    ))
}

async fn not_found() -> AppError {
    AppError::NotFound
}
