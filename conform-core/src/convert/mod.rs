//! Converters from untyped [`serde_json::Value`]s to the basic types and enums.
//!
//! The free functions here are what [`Validator`](crate::Validator) dispatches
//! to; they are public so callers can use them directly, e.g. from inside a
//! custom conversion rule.

mod basic;
mod date;
mod enumeration;

pub use basic::{
    convert_boolean, convert_nullable_boolean, convert_nullable_number, convert_nullable_string,
    convert_number, convert_string,
};
pub use date::DateParser;
pub use enumeration::{convert_enum, convert_enum_mappings};

use chrono::{DateTime, Utc};
use serde_json::{Number, Value};

use crate::{BasicType, FromFieldValue};

/// Rust types produced by the basic-type converters.
///
/// Lets typed array conversions pick their converter from the element type
/// instead of a separate [`BasicType`] argument.
pub trait BasicValue: FromFieldValue {
    const BASIC_TYPE: BasicType;
}

impl BasicValue for String {
    const BASIC_TYPE: BasicType = BasicType::String;
}

impl BasicValue for f64 {
    const BASIC_TYPE: BasicType = BasicType::Number;
}

impl BasicValue for bool {
    const BASIC_TYPE: BasicType = BasicType::Boolean;
}

impl BasicValue for DateTime<Utc> {
    const BASIC_TYPE: BasicType = BasicType::Date;
}

/// Name of a value's dynamic kind, for error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Plain-text rendering of a value: strings unquoted, numbers without a
/// trailing `.0`, everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => display_number(n),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

pub(crate) fn display_number(number: &Number) -> String {
    if let Some(i) = number.as_i64() {
        i.to_string()
    } else if let Some(u) = number.as_u64() {
        u.to_string()
    } else {
        number
            .as_f64()
            .map_or_else(|| number.to_string(), display_float)
    }
}

fn display_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    let scientific = format!("{f:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => scientific,
    }
}
