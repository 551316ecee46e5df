//! Train tracker routes.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection},
};

use crate::schema::{self, validate};
use crate::train::{Arrival, ArrivalTarget, RouteTrains, RunFollow};

use super::error::AppError;
use super::state::AppState;

type Params = HashMap<String, String>;

pub async fn station_arrivals(
    State(state): State<AppState>,
    path: Result<Path<Params>, PathRejection>,
    Query(query): Query<Params>,
) -> Result<Json<Vec<Arrival>>, AppError> {
    let Path(path) = path?;
    let params = validate(&schema::train::STATION_ARRIVALS, &path, &query)?;
    let target = ArrivalTarget::Station(params.required_integer("mapid")?);
    let arrivals = state
        .train
        .get_arrivals(target, params.integer("max"), params.text("rt"))
        .await
        .map_err(AppError::train)?;
    Ok(Json(arrivals))
}

pub async fn stop_arrivals(
    State(state): State<AppState>,
    path: Result<Path<Params>, PathRejection>,
    Query(query): Query<Params>,
) -> Result<Json<Vec<Arrival>>, AppError> {
    let Path(path) = path?;
    let params = validate(&schema::train::STOP_ARRIVALS, &path, &query)?;
    let target = ArrivalTarget::Stop(params.required_integer("stpid")?);
    let arrivals = state
        .train
        .get_arrivals(target, params.integer("max"), params.text("rt"))
        .await
        .map_err(AppError::train)?;
    Ok(Json(arrivals))
}

pub async fn run(
    State(state): State<AppState>,
    path: Result<Path<Params>, PathRejection>,
    Query(query): Query<Params>,
) -> Result<Json<RunFollow>, AppError> {
    let Path(path) = path?;
    let params = validate(&schema::train::RUN, &path, &query)?;
    let follow = state
        .train
        .get_follow(params.required_integer("runnumber")?)
        .await
        .map_err(AppError::train)?;
    Ok(Json(follow))
}

pub async fn locations(
    State(state): State<AppState>,
    path: Result<Path<Params>, PathRejection>,
    Query(query): Query<Params>,
) -> Result<Json<Vec<RouteTrains>>, AppError> {
    let Path(path) = path?;
    let params = validate(&schema::train::LOCATIONS, &path, &query)?;
    let routes = state
        .train
        .get_locations(params.required_text("rt")?)
        .await
        .map_err(AppError::train)?;
    Ok(Json(routes))
}
