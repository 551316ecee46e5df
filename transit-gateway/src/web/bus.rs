//! Bus tracker routes.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection},
};

use crate::bus::{
    BulletinFilter, BusTime, Direction, Pattern, PatternFilter, Prediction, PredictionTarget,
    Route, ServiceBulletin, Stop, TimeResolution, Vehicle, VehicleFilter,
};
use crate::schema::{self, ValidationError, validate};

use super::error::AppError;
use super::state::AppState;

type Params = HashMap<String, String>;

pub async fn time(
    State(state): State<AppState>,
    Query(query): Query<Params>,
) -> Result<Json<BusTime>, AppError> {
    validate(&schema::bus::TIME, &Params::new(), &query)?;
    let time = state.bus.get_time().await.map_err(AppError::bus)?;
    Ok(Json(time))
}

pub async fn vehicles(
    State(state): State<AppState>,
    Query(query): Query<Params>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let params = validate(&schema::bus::VEHICLES, &Params::new(), &query)?;

    // Exclusive and AtLeastOne rules on vid/rt make this infallible after validation
    let filter = VehicleFilter::from_params(params.text("vid"), params.text("rt"))
        .ok_or_else(|| ValidationError::single("vid,rt", "exactly one is required"))?;
    let tmres = params.text("tmres").and_then(TimeResolution::parse);

    let vehicles = state
        .bus
        .get_vehicles(&filter, tmres)
        .await
        .map_err(AppError::bus)?;
    Ok(Json(vehicles))
}

pub async fn routes(
    State(state): State<AppState>,
    Query(query): Query<Params>,
) -> Result<Json<Vec<Route>>, AppError> {
    validate(&schema::bus::ROUTES, &Params::new(), &query)?;
    let routes = state.bus.get_routes().await.map_err(AppError::bus)?;
    Ok(Json(routes))
}

pub async fn directions(
    State(state): State<AppState>,
    path: Result<Path<Params>, PathRejection>,
    Query(query): Query<Params>,
) -> Result<Json<Vec<Direction>>, AppError> {
    let Path(path) = path?;
    let params = validate(&schema::bus::DIRECTIONS, &path, &query)?;
    let directions = state
        .bus
        .get_directions(params.required_text("rt")?)
        .await
        .map_err(AppError::bus)?;
    Ok(Json(directions))
}

pub async fn stops(
    State(state): State<AppState>,
    path: Result<Path<Params>, PathRejection>,
    Query(query): Query<Params>,
) -> Result<Json<Vec<Stop>>, AppError> {
    let Path(path) = path?;
    let params = validate(&schema::bus::STOPS, &path, &query)?;
    let stops = state
        .bus
        .get_stops(params.required_text("rt")?, params.required_text("dir")?)
        .await
        .map_err(AppError::bus)?;
    Ok(Json(stops))
}

pub async fn route_patterns(
    State(state): State<AppState>,
    path: Result<Path<Params>, PathRejection>,
    Query(query): Query<Params>,
) -> Result<Json<Vec<Pattern>>, AppError> {
    let Path(path) = path?;
    let params = validate(&schema::bus::ROUTE_PATTERNS, &path, &query)?;
    let filter = PatternFilter::Route(params.required_text("rt")?.to_string());
    let patterns = state
        .bus
        .get_patterns(&filter)
        .await
        .map_err(AppError::bus)?;
    Ok(Json(patterns))
}

pub async fn patterns(
    State(state): State<AppState>,
    path: Result<Path<Params>, PathRejection>,
    Query(query): Query<Params>,
) -> Result<Json<Vec<Pattern>>, AppError> {
    let Path(path) = path?;
    let params = validate(&schema::bus::PATTERNS, &path, &query)?;
    let filter = PatternFilter::Patterns(params.required_text("pid")?.to_string());
    let patterns = state
        .bus
        .get_patterns(&filter)
        .await
        .map_err(AppError::bus)?;
    Ok(Json(patterns))
}

pub async fn stop_predictions(
    State(state): State<AppState>,
    path: Result<Path<Params>, PathRejection>,
    Query(query): Query<Params>,
) -> Result<Json<Vec<Prediction>>, AppError> {
    let Path(path) = path?;
    let params = validate(&schema::bus::STOP_PREDICTIONS, &path, &query)?;
    let target = PredictionTarget::Stops {
        stpid: params.required_text("stpid")?.to_string(),
        rt: params.text("rt").map(str::to_string),
    };
    let predictions = state
        .bus
        .get_predictions(&target, params.integer("top"))
        .await
        .map_err(AppError::bus)?;
    Ok(Json(predictions))
}

pub async fn vehicle_predictions(
    State(state): State<AppState>,
    path: Result<Path<Params>, PathRejection>,
    Query(query): Query<Params>,
) -> Result<Json<Vec<Prediction>>, AppError> {
    let Path(path) = path?;
    let params = validate(&schema::bus::VEHICLE_PREDICTIONS, &path, &query)?;
    let target = PredictionTarget::Vehicles {
        vid: params.required_text("vid")?.to_string(),
    };
    let predictions = state
        .bus
        .get_predictions(&target, params.integer("top"))
        .await
        .map_err(AppError::bus)?;
    Ok(Json(predictions))
}

pub async fn bulletins(
    State(state): State<AppState>,
    Query(query): Query<Params>,
) -> Result<Json<Vec<ServiceBulletin>>, AppError> {
    let params = validate(&schema::bus::BULLETINS, &Params::new(), &query)?;
    let filter = BulletinFilter {
        rt: params.text("rt").map(str::to_string),
        rtdir: params.text("rtdir").map(str::to_string),
        stpid: params.text("stpid").map(str::to_string),
    };
    let bulletins = state
        .bus
        .get_service_bulletins(&filter)
        .await
        .map_err(AppError::bus)?;
    Ok(Json(bulletins))
}
