//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` domain error whose `details`
//! name the offending wire field, so clients can point at the exact input.

use serde_json::json;

use crate::domain::{AgeParam, Error, FilterError};

const INVALID_AGE_MESSAGE: &str = "La edad debe ser un número válido";
const MISSING_CRITERIA_MESSAGE: &str = "Faltan criterios de eliminación";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidAge,
    InvalidBody,
    MissingCriteria,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidAge => "invalid_age",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::MissingCriteria => "missing_criteria",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const RUT: FieldName = FieldName::new("rut");
pub(crate) const NOMBRE: FieldName = FieldName::new("nombre");
pub(crate) const EDAD: FieldName = FieldName::new("edad");
pub(crate) const EDAD_MIN: FieldName = FieldName::new("edadMin");
pub(crate) const EDAD_MAX: FieldName = FieldName::new("edadMax");

fn age_field(param: AgeParam) -> FieldName {
    match param {
        AgeParam::Exact => EDAD,
        AgeParam::Min => EDAD_MIN,
        AgeParam::Max => EDAD_MAX,
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("Falta el campo requerido: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_age_error(field: FieldName, value: impl Into<serde_json::Value>) -> Error {
    Error::invalid_request(INVALID_AGE_MESSAGE).with_details(json!({
        "field": field.as_str(),
        "value": value.into(),
        "code": ErrorCode::InvalidAge.as_str(),
    }))
}

pub(crate) fn invalid_body_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("Solicitud inválida: {reason}"))
        .with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }))
}

pub(crate) fn missing_criteria_error() -> Error {
    Error::invalid_request(MISSING_CRITERIA_MESSAGE).with_details(json!({
        "accepted": [RUT.as_str(), EDAD.as_str(), EDAD_MIN.as_str(), EDAD_MAX.as_str()],
        "code": ErrorCode::MissingCriteria.as_str(),
    }))
}

/// Translate filter resolution failures into request errors.
pub(crate) fn map_filter_error(error: FilterError) -> Error {
    match error {
        FilterError::InvalidAge { param, value } => invalid_age_error(age_field(param), value),
        FilterError::MissingCriteria => missing_criteria_error(),
    }
}

/// Accept an `edad` body value only when it is an integral JSON number that
/// fits an `i32`.
pub(crate) fn parse_body_age(value: Option<serde_json::Value>) -> Result<i32, Error> {
    let value = value.ok_or_else(|| missing_field_error(EDAD))?;
    value
        .as_i64()
        .and_then(|age| i32::try_from(age).ok())
        .ok_or_else(|| invalid_age_error(EDAD, value))
}
