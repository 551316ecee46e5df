//! Bus endpoint schemas.

use super::{EndpointSchema, FieldSpec, ParamKind, ParamSpec, Rule, Shape};

const VEHICLES_NOTES: &str = "Retrieves the most recent status of vehicles currently being tracked. \
Use vid for one or more vehicles, or rt for every vehicle running one or more routes. \
The vid and rt parameters cannot be combined.";

const PATTERNS_NOTES: &str = "Retrieves the geo-positional points and stops that, connected in \
sequence, describe a pattern (route variation). By route, every pattern currently executed by at \
least one vehicle on the route is returned.";

const PREDICTIONS_NOTES: &str = "Retrieves predictions for one or more stops or one or more \
vehicles, always in ascending order of prdtm. A maximum of 10 identifiers can be specified. Use top \
to limit the number of predictions returned.";

const RT: ParamSpec = ParamSpec::path(
    "rt",
    ParamKind::String,
    "Alphanumeric designator of a route (ex. \"20\" or \"X20\").",
);

const RTS: ParamSpec = ParamSpec::query(
    "rt",
    ParamKind::String,
    "One or more comma-joined route designators (ex. \"X3,4,20\"). A maximum of 10 identifiers can be specified.",
);

const TOP: ParamSpec = ParamSpec::query(
    "top",
    ParamKind::Integer,
    "Maximum number of predictions to be returned.",
);

const TIMESTAMP_NOTE: &str = "Local date and time in the format YYYYMMDD HH:MM.";

const VEHICLE: Shape = Shape::Object(&[
    FieldSpec::new("vid", Shape::String, "Vehicle ID (bus number)."),
    FieldSpec::new("tmstmp", Shape::String, TIMESTAMP_NOTE),
    FieldSpec::new("lat", Shape::String, "Latitude in decimal degrees (WGS 84)."),
    FieldSpec::new("lon", Shape::String, "Longitude in decimal degrees (WGS 84)."),
    FieldSpec::new("hdg", Shape::String, "Heading as a 360 degree value, 0 is North."),
    FieldSpec::new("pid", Shape::Integer, "Pattern ID of the trip being executed."),
    FieldSpec::new("rt", Shape::String, "Route being executed (ex. \"20\")."),
    FieldSpec::new("des", Shape::String, "Destination of the trip (ex. \"Austin\")."),
    FieldSpec::new("pdist", Shape::Integer, "Distance in feet travelled into the pattern."),
    FieldSpec::new("dly", Shape::Boolean, "Present and true only if the vehicle is delayed."),
    FieldSpec::new("tatripid", Shape::String, "Scheduled trip identifier."),
    FieldSpec::new("tablockid", Shape::String, "Scheduled block identifier."),
    FieldSpec::new("zone", Shape::String, "Zone name if the vehicle is in a defined zone, otherwise blank."),
]);

const ROUTE: Shape = Shape::Object(&[
    FieldSpec::new("rt", Shape::String, "Alphanumeric designator of a route."),
    FieldSpec::new("rtnm", Shape::String, "Common name of the route (ex. \"Madison\")."),
    FieldSpec::new("rtclr", Shape::String, "Route color (ex. \"#336633\")."),
    FieldSpec::new("rtdd", Shape::String, "Route designator for display."),
]);

const DIRECTION: Shape = Shape::Object(&[FieldSpec::new(
    "dir",
    Shape::String,
    "Direction valid for the route (ex. \"Eastbound\").",
)]);

const STOP: Shape = Shape::Object(&[
    FieldSpec::new("stpid", Shape::String, "Unique stop identifier."),
    FieldSpec::new("stpnm", Shape::String, "Display name (ex. \"Madison and Clark\")."),
    FieldSpec::new("lat", Shape::Number, "Latitude in decimal degrees (WGS 84)."),
    FieldSpec::new("lon", Shape::Number, "Longitude in decimal degrees (WGS 84)."),
]);

const POINT: Shape = Shape::Object(&[
    FieldSpec::new("seq", Shape::Integer, "Position of the point in the sequence."),
    FieldSpec::new("lat", Shape::Number, "Latitude in decimal degrees (WGS 84)."),
    FieldSpec::new("lon", Shape::Number, "Longitude in decimal degrees (WGS 84)."),
    FieldSpec::new("typ", Shape::String, "'S' for a stop, 'W' for a waypoint."),
    FieldSpec::new("stpid", Shape::String, "Stop identifier, for stops."),
    FieldSpec::new("stpnm", Shape::String, "Stop display name, for stops."),
    FieldSpec::new("pdist", Shape::Number, "Distance in feet of the point into the pattern."),
]);

const PATTERN: Shape = Shape::Object(&[
    FieldSpec::new("pid", Shape::Integer, "Pattern ID."),
    FieldSpec::new("ln", Shape::Number, "Length of the pattern in feet."),
    FieldSpec::new("rtdir", Shape::String, "Direction of the pattern (ex. \"Eastbound\")."),
    FieldSpec::new("pt", Shape::ArrayOf(&POINT), "Ordered points defining the pattern."),
]);

const PREDICTION: Shape = Shape::Object(&[
    FieldSpec::new("tmstmp", Shape::String, "When the prediction was generated. YYYYMMDD HH:MM local."),
    FieldSpec::new("typ", Shape::String, "'A' for an arrival prediction, 'D' for a departure prediction."),
    FieldSpec::new("stpid", Shape::String, "Stop the prediction is for."),
    FieldSpec::new("stpnm", Shape::String, "Display name of the stop."),
    FieldSpec::new("vid", Shape::String, "Vehicle the prediction is for."),
    FieldSpec::new("dstp", Shape::Integer, "Distance in feet left before the vehicle reaches the stop."),
    FieldSpec::new("rt", Shape::String, "Route designator."),
    FieldSpec::new("rtdd", Shape::String, "Route designator for display."),
    FieldSpec::new("rtdir", Shape::String, "Direction of travel (ex. \"East Bound\")."),
    FieldSpec::new("des", Shape::String, "Final destination of the vehicle."),
    FieldSpec::new("prdtm", Shape::String, "Predicted arrival or departure. YYYYMMDD HH:MM local."),
    FieldSpec::new("dly", Shape::Boolean, "Present and true only if the vehicle is delayed."),
    FieldSpec::new("tablockid", Shape::String, "Scheduled block identifier."),
    FieldSpec::new("tatripid", Shape::String, "Scheduled trip identifier."),
    FieldSpec::new("prdctdn", Shape::String, "Minutes until the bus arrives at the stop."),
    FieldSpec::new("zone", Shape::String, "Zone name if the vehicle is in a defined zone, otherwise blank."),
]);

const AFFECTED_SERVICE: Shape = Shape::Object(&[
    FieldSpec::new("rt", Shape::String, "Affected route."),
    FieldSpec::new("rtdir", Shape::String, "Affected direction."),
    FieldSpec::new("stpid", Shape::String, "Affected stop."),
    FieldSpec::new("stpnm", Shape::String, "Display name of the affected stop."),
]);

const BULLETIN: Shape = Shape::Object(&[
    FieldSpec::new("nm", Shape::String, "Unique name of the bulletin."),
    FieldSpec::new("sbj", Shape::String, "Subject."),
    FieldSpec::new("dtl", Shape::String, "Full text."),
    FieldSpec::new("brf", Shape::String, "Short text."),
    FieldSpec::new("prty", Shape::String, "Priority: \"High\", \"Medium\" or \"Low\"."),
    FieldSpec::new("srvc", Shape::ArrayOf(&AFFECTED_SERVICE), "Services the bulletin applies to."),
]);

pub static TIME: EndpointSchema = EndpointSchema {
    id: "getBusTime",
    path: "/bus/time",
    tag: "bus",
    summary: "Get time",
    notes: "Retrieves the provider's current system date and local time.",
    params: &[],
    rules: &[],
    response_label: "time",
    response: Shape::Object(&[FieldSpec::new(
        "tm",
        Shape::DateTime,
        "Current system date and local time.",
    )]),
};

pub static VEHICLES: EndpointSchema = EndpointSchema {
    id: "getBusVehicles",
    path: "/bus/vehicles",
    tag: "bus",
    summary: "Get vehicles",
    notes: VEHICLES_NOTES,
    params: &[
        ParamSpec::query(
            "vid",
            ParamKind::String,
            "One or more comma-joined vehicle IDs (ex. \"509,392\"). A maximum of 10 identifiers can be specified.",
        ),
        RTS,
        ParamSpec::query(
            "tmres",
            ParamKind::OneOf(&["s", "m"]),
            "Resolution of timestamps: \"s\" for seconds, \"m\" for minutes.",
        ),
    ],
    rules: &[
        Rule::Exclusive(&["vid", "rt"]),
        Rule::AtLeastOne(&["vid", "rt"]),
    ],
    response_label: "vehicles",
    response: Shape::ArrayOf(&VEHICLE),
};

pub static ROUTES: EndpointSchema = EndpointSchema {
    id: "getBusRoutes",
    path: "/bus/routes",
    tag: "bus",
    summary: "Get routes",
    notes: "Retrieves the set of routes serviced by the system.",
    params: &[],
    rules: &[],
    response_label: "routes",
    response: Shape::ArrayOf(&ROUTE),
};

pub static DIRECTIONS: EndpointSchema = EndpointSchema {
    id: "getBusDirections",
    path: "/bus/routes/{rt}/directions",
    tag: "bus",
    summary: "Get directions",
    notes: "Retrieves the set of directions serviced by the route.",
    params: &[RT],
    rules: &[],
    response_label: "directions",
    response: Shape::ArrayOf(&DIRECTION),
};

pub static STOPS: EndpointSchema = EndpointSchema {
    id: "getBusStops",
    path: "/bus/routes/{rt}/directions/{dir}/stops",
    tag: "bus",
    summary: "Get stops",
    notes: "Retrieves the stops for a route and direction. Stops are only available for a valid route/direction pair.",
    params: &[
        RT,
        ParamSpec::path(
            "dir",
            ParamKind::String,
            "Direction of the route (ex. \"Eastbound\").",
        ),
    ],
    rules: &[],
    response_label: "stops",
    response: Shape::ArrayOf(&STOP),
};

pub static ROUTE_PATTERNS: EndpointSchema = EndpointSchema {
    id: "getBusPatternsByRoute",
    path: "/bus/routes/{rt}/patterns",
    tag: "bus",
    summary: "Get patterns by route",
    notes: PATTERNS_NOTES,
    params: &[RT],
    rules: &[],
    response_label: "patterns",
    response: Shape::ArrayOf(&PATTERN),
};

pub static PATTERNS: EndpointSchema = EndpointSchema {
    id: "getBusPatternsById",
    path: "/bus/patterns/{pid}",
    tag: "bus",
    summary: "Get patterns by id",
    notes: PATTERNS_NOTES,
    params: &[ParamSpec::path(
        "pid",
        ParamKind::String,
        "One or more comma-joined pattern IDs (ex. \"56,436,1221\"). A maximum of 10 identifiers can be specified.",
    )],
    rules: &[],
    response_label: "patterns",
    response: Shape::ArrayOf(&PATTERN),
};

pub static STOP_PREDICTIONS: EndpointSchema = EndpointSchema {
    id: "getBusPredictionsByStop",
    path: "/bus/stops/{stpid}/predictions",
    tag: "bus",
    summary: "Get predictions by stop",
    notes: PREDICTIONS_NOTES,
    params: &[
        ParamSpec::path(
            "stpid",
            ParamKind::String,
            "One or more comma-joined stop IDs (ex. \"5029,1392\"). A maximum of 10 identifiers can be specified.",
        ),
        RTS,
        TOP,
    ],
    rules: &[],
    response_label: "predictions",
    response: Shape::ArrayOf(&PREDICTION),
};

pub static VEHICLE_PREDICTIONS: EndpointSchema = EndpointSchema {
    id: "getBusPredictionsByVehicle",
    path: "/bus/vehicles/{vid}/predictions",
    tag: "bus",
    summary: "Get predictions by vehicle",
    notes: PREDICTIONS_NOTES,
    params: &[
        ParamSpec::path(
            "vid",
            ParamKind::String,
            "One or more comma-joined vehicle IDs. A maximum of 10 identifiers can be specified.",
        ),
        TOP,
    ],
    rules: &[],
    response_label: "predictions",
    response: Shape::ArrayOf(&PREDICTION),
};

pub static BULLETINS: EndpointSchema = EndpointSchema {
    id: "getBusServiceBulletins",
    path: "/bus/bulletins",
    tag: "bus",
    summary: "Get service bulletins",
    notes: "Retrieves service bulletins for routes, route directions, or stops. At least one of rt or stpid is required.",
    params: &[
        RTS,
        ParamSpec::query(
            "rtdir",
            ParamKind::String,
            "Direction of the route; only meaningful together with rt.",
        ),
        ParamSpec::query(
            "stpid",
            ParamKind::String,
            "One or more comma-joined stop IDs.",
        ),
    ],
    rules: &[Rule::AtLeastOne(&["rt", "stpid"])],
    response_label: "bulletins",
    response: Shape::ArrayOf(&BULLETIN),
};

pub static ENDPOINTS: &[&EndpointSchema] = &[
    &TIME,
    &VEHICLES,
    &ROUTES,
    &DIRECTIONS,
    &STOPS,
    &ROUTE_PATTERNS,
    &PATTERNS,
    &STOP_PREDICTIONS,
    &VEHICLE_PREDICTIONS,
    &BULLETINS,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{Direction, Pattern, Prediction, Route, ServiceBulletin, Stop, Vehicle};
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use serde_json::{Value, json};
    use std::collections::BTreeSet;

    /// Decode a full provider record and check its serialized field set
    /// against the schema.
    fn assert_fields_declared<T: DeserializeOwned + Serialize>(schema: &EndpointSchema, raw: Value) {
        let record: T = serde_json::from_value(raw).unwrap();
        let serialized = serde_json::to_value(&record).unwrap();
        let keys: BTreeSet<&str> = serialized
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let declared: BTreeSet<&str> = schema.response_fields().iter().map(|f| f.name).collect();
        assert_eq!(keys, declared, "{}", schema.id);
    }

    #[test]
    fn vehicle_fields_match_schema() {
        assert_fields_declared::<Vehicle>(
            &VEHICLES,
            json!({
                "vid": "1", "tmstmp": "20240101 13:45", "lat": "41.8", "lon": "-87.6",
                "hdg": "90", "pid": 1, "rt": "20", "des": "Austin", "pdist": 10, "dly": true,
                "tatripid": "1", "tablockid": "1", "zone": ""
            }),
        );
    }

    #[test]
    fn route_direction_stop_fields_match_schema() {
        assert_fields_declared::<Route>(
            &ROUTES,
            json!({ "rt": "20", "rtnm": "Madison", "rtclr": "#336633", "rtdd": "20" }),
        );
        assert_fields_declared::<Direction>(&DIRECTIONS, json!({ "dir": "Eastbound" }));
        assert_fields_declared::<Stop>(
            &STOPS,
            json!({ "stpid": "1", "stpnm": "Madison & Clark", "lat": 41.8, "lon": -87.6 }),
        );
    }

    #[test]
    fn pattern_fields_match_schema() {
        assert_fields_declared::<Pattern>(
            &PATTERNS,
            json!({ "pid": 1, "ln": 100.0, "rtdir": "Eastbound", "pt": [] }),
        );
    }

    #[test]
    fn prediction_fields_match_schema() {
        assert_fields_declared::<Prediction>(
            &STOP_PREDICTIONS,
            json!({
                "tmstmp": "20240101 13:45", "typ": "A", "stpid": "1", "stpnm": "x", "vid": "1",
                "dstp": 100, "rt": "20", "rtdd": "20", "rtdir": "Eastbound", "des": "Austin",
                "prdtm": "20240101 13:50", "dly": true, "tablockid": "1", "tatripid": "1",
                "prdctdn": "5", "zone": ""
            }),
        );
    }

    #[test]
    fn bulletin_fields_match_schema() {
        assert_fields_declared::<ServiceBulletin>(
            &BULLETINS,
            json!({
                "nm": "n", "sbj": "s", "dtl": "d", "brf": "b", "prty": "Low",
                "srvc": [{ "rt": "20" }]
            }),
        );
    }

    #[test]
    fn vehicles_params_are_exclusive() {
        assert!(VEHICLES.rules.contains(&Rule::Exclusive(&["vid", "rt"])));
        assert!(VEHICLES.params.iter().all(|p| !p.required));
    }
}
