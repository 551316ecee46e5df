//! Bus provider request shapes and response records.
//!
//! Records mirror the provider's documented field sets exactly. Every field
//! is optional and decoded leniently; fields the provider omits (such as
//! `dly`, which only appears when a vehicle is delayed) stay omitted.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::provider::lenient;

/// Which vehicles to report on. The provider processes only one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleFilter {
    /// Comma-joined vehicle ids
    Vehicles(String),
    /// Comma-joined route designators
    Routes(String),
}

impl VehicleFilter {
    /// Build from the two optional request parameters; exactly one must be set.
    pub fn from_params(vid: Option<&str>, rt: Option<&str>) -> Option<Self> {
        match (vid, rt) {
            (Some(vid), None) => Some(VehicleFilter::Vehicles(vid.to_string())),
            (None, Some(rt)) => Some(VehicleFilter::Routes(rt.to_string())),
            _ => None,
        }
    }
}

/// Resolution of timestamps in vehicle responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeResolution {
    Seconds,
    Minutes,
}

impl TimeResolution {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "s" => Some(TimeResolution::Seconds),
            "m" => Some(TimeResolution::Minutes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeResolution::Seconds => "s",
            TimeResolution::Minutes => "m",
        }
    }
}

/// Which patterns to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternFilter {
    /// Comma-joined pattern ids
    Patterns(String),
    /// All active patterns of one route
    Route(String),
}

/// What to fetch predictions for.
///
/// Stops and vehicles cannot be combined in one provider request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionTarget {
    /// Comma-joined stop ids, optionally narrowed to routes
    Stops { stpid: String, rt: Option<String> },
    /// Comma-joined vehicle ids
    Vehicles { vid: String },
}

/// Filter for service bulletins. At least one of `rt` or `stpid` is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletinFilter {
    pub rt: Option<String>,
    pub rtdir: Option<String>,
    pub stpid: Option<String>,
}

/// Current provider time, parsed from its local-time string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusTime {
    pub tm: DateTime<Local>,
}

/// A tracked vehicle.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Vehicle {
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub vid: Option<String>,
    /// "YYYYMMDD HH:MM" local time of the last position update
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub tmstmp: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub lon: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub hdg: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub pid: Option<i64>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub rt: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub des: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub pdist: Option<i64>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub dly: Option<bool>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub tatripid: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub tablockid: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

/// A route serviced by the system.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Route {
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub rt: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub rtnm: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub rtclr: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub rtdd: Option<String>,
}

/// A direction served by a route, e.g. "Eastbound".
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Direction {
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// A stop on a route/direction pair.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Stop {
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub stpid: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub stpnm: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

/// A route variation: an ordered sequence of points, some of them stops.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Pattern {
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub pid: Option<i64>,
    /// Length in feet
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub ln: Option<f64>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub rtdir: Option<String>,
    /// Points in provider order
    #[serde(default, deserialize_with = "lenient::one_or_many")]
    pub pt: Vec<PatternPoint>,
}

/// One point of a pattern.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PatternPoint {
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub seq: Option<i64>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    /// 'S' for a stop, 'W' for a waypoint
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub stpid: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub stpnm: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub pdist: Option<f64>,
}

/// An arrival or departure prediction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Prediction {
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub tmstmp: Option<String>,
    /// 'A' for arrival, 'D' for departure
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub stpid: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub stpnm: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub vid: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub dstp: Option<i64>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub rt: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub rtdd: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub rtdir: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub des: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub prdtm: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub dly: Option<bool>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub tablockid: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub tatripid: Option<String>,
    /// Minutes until arrival, or "DUE"/"DLY"
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub prdctdn: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

/// A service bulletin affecting routes or stops.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ServiceBulletin {
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub nm: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub sbj: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub dtl: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub brf: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub prty: Option<String>,
    #[serde(default, deserialize_with = "lenient::one_or_many")]
    pub srvc: Vec<AffectedService>,
}

/// A route/direction/stop combination a bulletin applies to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AffectedService {
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub rt: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub rtdir: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub stpid: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub stpnm: Option<String>,
}
