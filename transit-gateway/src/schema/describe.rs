//! OpenAPI rendering of the endpoint schemas.

use serde_json::{Map, Value, json};

use super::{EndpointSchema, ParamKind, ParamLocation, ParamSpec, Shape};

/// Render `schemas` as an OpenAPI 3.0 document.
pub fn describe(schemas: &[&EndpointSchema], title: &str, version: &str) -> Value {
    let mut paths = Map::new();
    let mut components = Map::new();
    let mut tags: Vec<&str> = Vec::new();

    for schema in schemas {
        if !tags.contains(&schema.tag) {
            tags.push(schema.tag);
        }

        components.insert(schema.response_label.to_string(), shape(&schema.response));

        let operation = json!({
            "operationId": schema.id,
            "summary": schema.summary,
            "description": schema.notes,
            "tags": [schema.tag],
            "parameters": schema.params.iter().map(parameter).collect::<Vec<_>>(),
            "responses": {
                "200": {
                    "description": "Success",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": format!("#/components/schemas/{}", schema.response_label) }
                        }
                    }
                },
                "400": error_response("Request parameters failed validation"),
                "502": error_response("The provider reported an error"),
                "503": error_response("The provider could not be reached"),
                "504": error_response("The provider did not answer in time")
            }
        });

        paths.insert(schema.path.to_string(), json!({ "get": operation }));
    }

    components.insert(
        "error".to_string(),
        json!({
            "type": "object",
            "required": ["error"],
            "properties": {
                "error": { "type": "string" },
                "fields": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "field": { "type": "string" },
                            "message": { "type": "string" }
                        }
                    }
                }
            }
        }),
    );

    json!({
        "openapi": "3.0.3",
        "info": { "title": title, "version": version },
        "tags": tags.iter().map(|t| json!({ "name": t })).collect::<Vec<_>>(),
        "paths": paths,
        "components": { "schemas": components }
    })
}

fn parameter(spec: &ParamSpec) -> Value {
    let location = match spec.location {
        ParamLocation::Path => "path",
        ParamLocation::Query => "query",
    };

    let mut schema = match spec.kind {
        ParamKind::String => json!({ "type": "string" }),
        ParamKind::Integer => json!({ "type": "integer", "minimum": 0 }),
        ParamKind::OneOf(values) => json!({ "type": "string", "enum": values }),
    };
    if let (Some(default), Value::Object(obj)) = (spec.default, &mut schema) {
        obj.insert("default".to_string(), Value::from(default));
    }

    json!({
        "name": spec.name,
        "in": location,
        "required": spec.required || spec.location == ParamLocation::Path,
        "description": spec.description,
        "schema": schema
    })
}

fn shape(shape: &Shape) -> Value {
    match shape {
        Shape::String => json!({ "type": "string" }),
        Shape::Integer => json!({ "type": "integer" }),
        Shape::Number => json!({ "type": "number" }),
        Shape::Boolean => json!({ "type": "boolean" }),
        Shape::DateTime => json!({ "type": "string", "format": "date-time" }),
        Shape::ArrayOf(item) => json!({ "type": "array", "items": self::shape(item) }),
        Shape::Object(fields) => {
            let properties: Map<String, Value> = fields
                .iter()
                .map(|f| {
                    let mut value = self::shape(&f.shape);
                    if let Value::Object(obj) = &mut value {
                        obj.insert("description".to_string(), Value::from(f.description));
                    }
                    (f.name.to_string(), value)
                })
                .collect();
            json!({ "type": "object", "properties": properties })
        }
    }
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/error" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{all, bus, train};

    #[test]
    fn documents_every_endpoint() {
        let schemas = all();
        let doc = describe(&schemas, "Transit Gateway", "0.1.0");

        assert_eq!(doc["openapi"], "3.0.3");
        let paths = doc["paths"].as_object().unwrap();
        assert_eq!(paths.len(), schemas.len());
        assert!(paths.contains_key("/bus/routes/{rt}/directions/{dir}/stops"));
        assert!(paths.contains_key("/train/runs/{runnumber}"));

        let tags: Vec<&str> = doc["tags"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(tags, vec!["bus", "train"]);
    }

    #[test]
    fn parameters_carry_location_and_type() {
        let doc = describe(&[&train::STATION_ARRIVALS], "t", "v");
        let params = doc["paths"]["/train/stations/{mapid}/arrivals"]["get"]["parameters"]
            .as_array()
            .unwrap();

        assert_eq!(params[0]["name"], "mapid");
        assert_eq!(params[0]["in"], "path");
        assert_eq!(params[0]["required"], true);
        assert_eq!(params[0]["schema"]["type"], "integer");

        assert_eq!(params[1]["name"], "max");
        assert_eq!(params[1]["in"], "query");
        assert_eq!(params[1]["required"], false);
    }

    #[test]
    fn enum_params_list_allowed_values() {
        let doc = describe(&[&bus::VEHICLES], "t", "v");
        let tmres = &doc["paths"]["/bus/vehicles"]["get"]["parameters"][2];
        assert_eq!(tmres["schema"]["enum"], json!(["s", "m"]));
    }

    #[test]
    fn nested_shapes_are_rendered() {
        let doc = describe(&[&bus::PATTERNS], "t", "v");
        let pattern = &doc["components"]["schemas"]["patterns"]["items"];
        assert_eq!(pattern["type"], "object");
        assert_eq!(pattern["properties"]["pt"]["type"], "array");
        assert_eq!(pattern["properties"]["pt"]["items"]["properties"]["seq"]["type"], "integer");

        let doc = describe(&[&bus::TIME], "t", "v");
        assert_eq!(
            doc["components"]["schemas"]["time"]["properties"]["tm"]["format"],
            "date-time"
        );
    }
}
