//! Bus tracker client.
//!
//! This module provides an HTTP client for the bus tracking provider, which
//! reports live vehicle positions, route metadata, and arrival predictions.
//!
//! Key characteristics of the provider:
//! - Every response is wrapped in a `bustime-response` object holding either
//!   the named payload or an `error` list
//! - Timestamps are local-time strings ("YYYYMMDD HH:MM" or "YYYYMMDD HH:MM:SS")
//! - Multi-id parameters are comma-joined, up to 10 ids (enforced upstream)

mod client;
mod types;

pub use client::{BusClient, BusConfig, parse_bus_time};
pub use types::{
    AffectedService, BulletinFilter, BusTime, Direction, Pattern, PatternFilter, PatternPoint,
    Prediction, PredictionTarget, Route, ServiceBulletin, Stop, TimeResolution, Vehicle,
    VehicleFilter,
};
