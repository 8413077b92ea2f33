use std::any::Any;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{ConversionError, ConversionResult};

/// A converted property value, on its way to a target's setter.
pub enum FieldValue {
    /// A permitted null on a nullable property.
    Null,
    String(String),
    Number(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
    /// The internal value selected by an enum mapping.
    Enum(String),
    /// Whatever a custom converter produced.
    Custom(Box<dyn Any>),
}

impl FieldValue {
    pub fn custom<V: Any>(value: V) -> Self {
        Self::Custom(Box::new(value))
    }

    /// Short name of the variant, for diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Date(_) => "date",
            Self::Enum(_) => "enum",
            Self::Custom(_) => "custom",
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Takes the value out of a `Custom` variant if it holds a `V`.
    pub fn downcast<V: Any>(self) -> Result<V, Self> {
        match self {
            Self::Custom(boxed) => boxed.downcast::<V>().map(|v| *v).map_err(Self::Custom),
            other => Err(other),
        }
    }

    /// Shorthand for the string payload of `String` and `Enum` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Self::Date(d) => f.debug_tuple("Date").field(d).finish(),
            Self::Enum(s) => f.debug_tuple("Enum").field(s).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::String(s) | Self::Enum(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Custom(_) => f.write_str("<custom>"),
        }
    }
}

/// Custom values never compare equal, not even to themselves.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::String(a), Self::String(b)) | (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            _ => false,
        }
    }
}

/// Extraction of a typed value from a [`FieldValue`], used by
/// [`Binding`](crate::Binding) setters.
pub trait FromFieldValue: Sized {
    fn from_field_value(value: FieldValue) -> ConversionResult<Self>;
}

fn unexpected(expected: &str, value: &FieldValue) -> ConversionError {
    ConversionError::Assignment(format!(
        "expected a {expected} value but the conversion rule produced a {} value",
        value.kind()
    ))
}

impl FromFieldValue for FieldValue {
    fn from_field_value(value: FieldValue) -> ConversionResult<Self> {
        Ok(value)
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: FieldValue) -> ConversionResult<Self> {
        match value {
            FieldValue::String(s) | FieldValue::Enum(s) => Ok(s),
            other => Err(unexpected("string", &other)),
        }
    }
}

impl FromFieldValue for f64 {
    fn from_field_value(value: FieldValue) -> ConversionResult<Self> {
        match value {
            FieldValue::Number(n) => Ok(n),
            other => Err(unexpected("number", &other)),
        }
    }
}

impl FromFieldValue for bool {
    fn from_field_value(value: FieldValue) -> ConversionResult<Self> {
        match value {
            FieldValue::Boolean(b) => Ok(b),
            other => Err(unexpected("boolean", &other)),
        }
    }
}

impl FromFieldValue for DateTime<Utc> {
    fn from_field_value(value: FieldValue) -> ConversionResult<Self> {
        match value {
            FieldValue::Date(d) => Ok(d),
            other => Err(unexpected("date", &other)),
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Option<T> {
    fn from_field_value(value: FieldValue) -> ConversionResult<Self> {
        match value {
            FieldValue::Null => Ok(None),
            other => T::from_field_value(other).map(Some),
        }
    }
}

/// Setter argument for values produced by custom converters.
#[derive(Debug, Clone, PartialEq)]
pub struct Custom<V>(pub V);

impl<V: Any> FromFieldValue for Custom<V> {
    fn from_field_value(value: FieldValue) -> ConversionResult<Self> {
        value
            .downcast::<V>()
            .map(Custom)
            .map_err(|other| unexpected(std::any::type_name::<V>(), &other))
    }
}

/// Setter argument parsed with [`FromStr`] from a string or enum value.
///
/// Typical use is mapping an enum rule's internal value onto a Rust enum.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<V>(pub V);

impl<V> FromFieldValue for Parsed<V>
where
    V: FromStr,
    V::Err: fmt::Display,
{
    fn from_field_value(value: FieldValue) -> ConversionResult<Self> {
        let raw = String::from_field_value(value)?;
        raw.parse::<V>().map(Parsed).map_err(|e| {
            ConversionError::Assignment(format!("value '{raw}' could not be parsed: {e}"))
        })
    }
}
