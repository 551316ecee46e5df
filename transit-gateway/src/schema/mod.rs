//! Declarative endpoint schemas.
//!
//! Each endpoint is described once as `'static` data: its path, accepted
//! parameters, and response shape. Two independent interpreters read these
//! descriptions: [`validate`] checks an inbound request before any provider
//! call, and [`describe`] renders the OpenAPI document.

pub mod bus;
mod describe;
pub mod train;
mod validate;

pub use describe::describe;
pub use validate::{FieldError, ValidatedParams, ValidationError, validate};

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
}

/// Accepted type of a request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Any non-empty text, including comma-joined id lists
    String,
    /// Non-negative integer
    Integer,
    /// One of a fixed set of values
    OneOf(&'static [&'static str]),
}

/// A request parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub location: ParamLocation,
    pub kind: ParamKind,
    /// Path parameters are always required.
    pub required: bool,
    pub default: Option<&'static str>,
    pub description: &'static str,
}

impl ParamSpec {
    pub const fn path(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            location: ParamLocation::Path,
            kind,
            required: true,
            default: None,
            description,
        }
    }

    pub const fn query(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            location: ParamLocation::Query,
            kind,
            required: false,
            default: None,
            description,
        }
    }
}

/// Cross-parameter constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// At most one of these may be given.
    Exclusive(&'static [&'static str]),
    /// At least one of these must be given.
    AtLeastOne(&'static [&'static str]),
}

/// Shape of a response value.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    String,
    Integer,
    Number,
    Boolean,
    /// ISO 8601 date-time
    DateTime,
    Object(&'static [FieldSpec]),
    ArrayOf(&'static Shape),
}

/// One field of an object shape.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: Shape,
    pub description: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, shape: Shape, description: &'static str) -> Self {
        Self {
            name,
            shape,
            description,
        }
    }
}

/// Full description of one `GET` endpoint.
#[derive(Debug, Clone, Copy)]
pub struct EndpointSchema {
    /// Unique operation name
    pub id: &'static str,
    /// Path with `{name}` placeholders
    pub path: &'static str,
    /// Grouping tag ("bus" or "train")
    pub tag: &'static str,
    pub summary: &'static str,
    pub notes: &'static str,
    pub params: &'static [ParamSpec],
    pub rules: &'static [Rule],
    /// Name of the response type in the generated document
    pub response_label: &'static str,
    pub response: Shape,
}

impl EndpointSchema {
    /// The path in axum's `:name` capture syntax.
    pub fn route_path(&self) -> String {
        let mut out = String::with_capacity(self.path.len());
        for c in self.path.chars() {
            match c {
                '{' => out.push(':'),
                '}' => {}
                c => out.push(c),
            }
        }
        out
    }

    #[cfg(test)]
    fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Declared field names of the response items (or of the object itself).
    #[cfg(test)]
    pub(crate) fn response_fields(&self) -> &'static [FieldSpec] {
        match self.response {
            Shape::Object(fields) => fields,
            Shape::ArrayOf(&Shape::Object(fields)) => fields,
            _ => &[],
        }
    }
}

/// Every endpoint served by the gateway.
pub fn all() -> Vec<&'static EndpointSchema> {
    bus::ENDPOINTS
        .iter()
        .chain(train::ENDPOINTS.iter())
        .copied()
        .collect()
}
