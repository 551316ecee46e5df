//! Request validation against an endpoint schema.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::{EndpointSchema, ParamKind, ParamLocation, ParamSpec, Rule};

/// A problem with one request parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Inbound request parameters that failed their schema.
///
/// Carries every problem found, not only the first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid request: {}", list(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            fields: vec![FieldError {
                field: field.into(),
                message: message.into(),
            }],
        }
    }
}

fn list(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A parameter value that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParamValue {
    Text(String),
    Integer(u32),
}

/// Parameters that passed validation, with defaults applied.
///
/// Omitted optional parameters are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedParams {
    values: BTreeMap<&'static str, ParamValue>,
}

impl ValidatedParams {
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<u32> {
        match self.values.get(name) {
            Some(ParamValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// A required text parameter.
    pub fn required_text(&self, name: &str) -> Result<&str, ValidationError> {
        self.text(name)
            .ok_or_else(|| ValidationError::single(name, "is required"))
    }

    /// A required integer parameter.
    pub fn required_integer(&self, name: &str) -> Result<u32, ValidationError> {
        self.integer(name)
            .ok_or_else(|| ValidationError::single(name, "is required"))
    }

    #[cfg(test)]
    fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.values.len()
    }
}

/// Check path and query parameters against `schema`.
///
/// Empty values count as omitted. Query parameters the schema does not
/// declare are rejected.
pub fn validate(
    schema: &EndpointSchema,
    path: &HashMap<String, String>,
    query: &HashMap<String, String>,
) -> Result<ValidatedParams, ValidationError> {
    let mut errors = Vec::new();
    let mut values = BTreeMap::new();

    let mut unknown: Vec<&String> = query
        .keys()
        .filter(|k| {
            !schema
                .params
                .iter()
                .any(|p| p.location == ParamLocation::Query && p.name == k.as_str())
        })
        .collect();
    unknown.sort();
    for name in unknown {
        errors.push(FieldError {
            field: name.clone(),
            message: "is not allowed".to_string(),
        });
    }

    for spec in schema.params {
        let source = match spec.location {
            ParamLocation::Path => path,
            ParamLocation::Query => query,
        };
        let raw = source
            .get(spec.name)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .or(spec.default);

        let Some(raw) = raw else {
            if spec.required {
                errors.push(field_error(spec, "is required"));
            }
            continue;
        };

        match parse(spec, raw) {
            Ok(value) => {
                values.insert(spec.name, value);
            }
            Err(message) => errors.push(field_error(spec, &message)),
        }
    }

    for rule in schema.rules {
        match rule {
            Rule::Exclusive(names) => {
                let given: Vec<&str> = names
                    .iter()
                    .copied()
                    .filter(|n| values.contains_key(*n))
                    .collect();
                if given.len() > 1 {
                    errors.push(FieldError {
                        field: given.join(","),
                        message: "cannot be combined".to_string(),
                    });
                }
            }
            Rule::AtLeastOne(names) => {
                if !names.iter().any(|n| values.contains_key(*n)) {
                    errors.push(FieldError {
                        field: names.join(","),
                        message: format!("one of {} is required", names.join(", ")),
                    });
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(ValidatedParams { values })
    } else {
        Err(ValidationError { fields: errors })
    }
}

fn parse(spec: &ParamSpec, raw: &str) -> Result<ParamValue, String> {
    match spec.kind {
        ParamKind::String => Ok(ParamValue::Text(raw.to_string())),
        ParamKind::Integer => raw
            .parse::<u32>()
            .map(ParamValue::Integer)
            .map_err(|_| "must be a non-negative integer".to_string()),
        ParamKind::OneOf(allowed) => {
            if allowed.contains(&raw) {
                Ok(ParamValue::Text(raw.to_string()))
            } else {
                Err(format!("must be one of {}", allowed.join(", ")))
            }
        }
    }
}

fn field_error(spec: &ParamSpec, message: &str) -> FieldError {
    FieldError {
        field: spec.name.to_string(),
        message: message.to_string(),
    }
}
