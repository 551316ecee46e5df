//! Train endpoint schemas.

use super::{EndpointSchema, FieldSpec, ParamKind, ParamSpec, Shape};

const ARRIVALS_NOTES: &str = "Produces arrival predictions for all platforms at a station, or for a \
single platform.";

const TIMESTAMP_NOTE: &str = "yyyyMMdd HH:mm:ss, 24-hour clock, local time.";

const MAX: ParamSpec = ParamSpec::query(
    "max",
    ParamKind::Integer,
    "Maximum number of results (all available results if omitted).",
);

const ROUTE_FILTER: ParamSpec = ParamSpec::query(
    "rt",
    ParamKind::String,
    "Restrict results to a single route (all routes if omitted).",
);

const ARRIVAL: Shape = Shape::Object(&[
    FieldSpec::new("staId", Shape::String, "Parent station ID (4xxxx), matches mapid."),
    FieldSpec::new("stpId", Shape::String, "Platform stop ID (3xxxx)."),
    FieldSpec::new("staNm", Shape::String, "Proper name of the parent station."),
    FieldSpec::new("stpDe", Shape::String, "Description of the platform."),
    FieldSpec::new("rn", Shape::String, "Run number of the train."),
    FieldSpec::new("rt", Shape::String, "Abbreviated route name."),
    FieldSpec::new("destSt", Shape::String, "Stop ID where the run is expected to end."),
    FieldSpec::new("destNm", Shape::String, "Friendly destination description."),
    FieldSpec::new("trDr", Shape::String, "Numeric train route direction code."),
    FieldSpec::new("prdt", Shape::String, TIMESTAMP_NOTE),
    FieldSpec::new("arrT", Shape::String, TIMESTAMP_NOTE),
    FieldSpec::new("isApp", Shape::String, "\"1\" if the train is approaching or due."),
    FieldSpec::new("isSch", Shape::String, "\"1\" if the prediction is schedule-based."),
    FieldSpec::new("isFlt", Shape::String, "\"1\" if a potential fault was detected."),
    FieldSpec::new("isDly", Shape::String, "\"1\" if the train is considered delayed."),
    FieldSpec::new("flags", Shape::String, "Train flags (not presently in use)."),
    FieldSpec::new("lat", Shape::String, "Latitude in decimal degrees."),
    FieldSpec::new("lon", Shape::String, "Longitude in decimal degrees."),
    FieldSpec::new("heading", Shape::String, "Bearing in degrees, 0 is North."),
]);

const POSITION: Shape = Shape::Object(&[
    FieldSpec::new("lat", Shape::String, "Latitude in decimal degrees."),
    FieldSpec::new("lon", Shape::String, "Longitude in decimal degrees."),
    FieldSpec::new("heading", Shape::String, "Bearing in degrees, 0 is North."),
]);

const LOCATED_TRAIN: Shape = Shape::Object(&[
    FieldSpec::new("rn", Shape::String, "Run number."),
    FieldSpec::new("destSt", Shape::String, "Stop ID where the run is expected to end."),
    FieldSpec::new("destNm", Shape::String, "Friendly destination description."),
    FieldSpec::new("trDr", Shape::String, "Numeric train route direction code."),
    FieldSpec::new("nextStaId", Shape::String, "Next parent station ID."),
    FieldSpec::new("nextStpId", Shape::String, "Next platform stop ID."),
    FieldSpec::new("nextStaNm", Shape::String, "Proper name of the next station."),
    FieldSpec::new("prdt", Shape::String, TIMESTAMP_NOTE),
    FieldSpec::new("arrT", Shape::String, TIMESTAMP_NOTE),
    FieldSpec::new("isApp", Shape::String, "\"1\" if the train is approaching or due."),
    FieldSpec::new("isDly", Shape::String, "\"1\" if the train is considered delayed."),
    FieldSpec::new("flags", Shape::String, "Train flags (not presently in use)."),
    FieldSpec::new("lat", Shape::String, "Latitude in decimal degrees."),
    FieldSpec::new("lon", Shape::String, "Longitude in decimal degrees."),
    FieldSpec::new("heading", Shape::String, "Bearing in degrees, 0 is North."),
]);

const ROUTE_TRAINS: Shape = Shape::Object(&[
    FieldSpec::new("@name", Shape::String, "Route identifier (ex. \"red\")."),
    FieldSpec::new("train", Shape::ArrayOf(&LOCATED_TRAIN), "In-service trains on the route."),
]);

pub static STATION_ARRIVALS: EndpointSchema = EndpointSchema {
    id: "getTrainArrivalsByStation",
    path: "/train/stations/{mapid}/arrivals",
    tag: "train",
    summary: "Get arrivals by station",
    notes: ARRIVALS_NOTES,
    params: &[
        ParamSpec::path(
            "mapid",
            ParamKind::Integer,
            "Five-digit parent station ID (4xxxx range).",
        ),
        MAX,
        ROUTE_FILTER,
    ],
    rules: &[],
    response_label: "arrivals",
    response: Shape::ArrayOf(&ARRIVAL),
};

pub static STOP_ARRIVALS: EndpointSchema = EndpointSchema {
    id: "getTrainArrivalsByStop",
    path: "/train/stops/{stpid}/arrivals",
    tag: "train",
    summary: "Get arrivals by stop",
    notes: ARRIVALS_NOTES,
    params: &[
        ParamSpec::path(
            "stpid",
            ParamKind::Integer,
            "Five-digit platform stop ID (3xxxx range).",
        ),
        MAX,
        ROUTE_FILTER,
    ],
    rules: &[],
    response_label: "arrivals",
    response: Shape::ArrayOf(&ARRIVAL),
};

pub static RUN: EndpointSchema = EndpointSchema {
    id: "getTrainRun",
    path: "/train/runs/{runnumber}",
    tag: "train",
    summary: "Get run",
    notes: "Produces a train's position and its predicted arrivals at every subsequent station, up to \
20 minutes ahead or to the end of its trip.",
    params: &[ParamSpec::path(
        "runnumber",
        ParamKind::Integer,
        "Run number of the train to follow.",
    )],
    rules: &[],
    response_label: "follow",
    response: Shape::Object(&[
        FieldSpec::new("position", POSITION, "Latest known position of the train."),
        FieldSpec::new("arrivals", Shape::ArrayOf(&ARRIVAL), "Upcoming arrivals."),
    ]),
};

pub static LOCATIONS: EndpointSchema = EndpointSchema {
    id: "getTrainLocations",
    path: "/train/routes/{rt}/locations",
    tag: "train",
    summary: "Get locations",
    notes: "Produces the in-service trains on one or more routes with their coordinates, heading, \
and next stop.",
    params: &[ParamSpec::path(
        "rt",
        ParamKind::String,
        "One or more comma-joined route identifiers (ex. \"red,blue\").",
    )],
    rules: &[],
    response_label: "locations",
    response: Shape::ArrayOf(&ROUTE_TRAINS),
};

pub static ENDPOINTS: &[&EndpointSchema] =
    &[&STATION_ARRIVALS, &STOP_ARRIVALS, &RUN, &LOCATIONS];
