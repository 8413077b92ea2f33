use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConversionResult;
use crate::{EnumSpec, FieldValue, Model, Validator};

/// The primitive kinds the built-in converters produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicType {
    String,
    Number,
    Boolean,
    Date,
}

impl BasicType {
    /// Lowercase name, as used in schema documents.
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type ConvertFn = dyn Fn(&Value) -> ConversionResult<FieldValue> + Send + Sync;

/// A caller-supplied conversion function.
///
/// Cloning is cheap; clones share the same closure.
#[derive(Clone)]
pub struct CustomConverter(Arc<ConvertFn>);

impl CustomConverter {
    pub fn new<F>(convert: F) -> Self
    where
        F: Fn(&Value) -> ConversionResult<FieldValue> + Send + Sync + 'static,
    {
        Self(Arc::new(convert))
    }

    /// Runs the converter against a raw input value.
    pub fn call(&self, value: &Value) -> ConversionResult<FieldValue> {
        (self.0)(value)
    }
}

impl fmt::Debug for CustomConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomConverter(..)")
    }
}

/// How a single schema property is validated and converted.
#[derive(Debug, Clone)]
pub enum ConversionRule {
    /// One of the built-in basic-type converters.
    Basic(BasicType),
    /// Match against an enum mapping and yield the internal value.
    Enum(EnumSpec),
    /// Hand the raw value to a caller-supplied function.
    Custom(CustomConverter),
}

impl ConversionRule {
    /// A custom rule producing a [`FieldValue`] directly.
    pub fn custom<F>(convert: F) -> Self
    where
        F: Fn(&Value) -> ConversionResult<FieldValue> + Send + Sync + 'static,
    {
        Self::Custom(CustomConverter::new(convert))
    }

    /// A custom rule producing an arbitrary value, delivered to setters as
    /// [`Custom<V>`](crate::Custom).
    pub fn custom_typed<V, F>(convert: F) -> Self
    where
        V: Any,
        F: Fn(&Value) -> ConversionResult<V> + Send + Sync + 'static,
    {
        Self::custom(move |value| convert(value).map(FieldValue::custom))
    }

    /// Converts the property as a nested `T` object.
    pub fn nested<T: Model>(validator: Validator) -> Self {
        Self::custom_typed(move |value| validator.convert_model::<T>(value))
    }

    /// Converts the property as an array of nested `T` objects.
    pub fn nested_array<T: Model>(validator: Validator) -> Self {
        Self::custom_typed(move |value| validator.convert_model_array::<T>(value))
    }

    pub fn as_basic(&self) -> Option<BasicType> {
        match self {
            Self::Basic(basic) => Some(*basic),
            _ => None,
        }
    }
}

impl From<BasicType> for ConversionRule {
    fn from(basic: BasicType) -> Self {
        Self::Basic(basic)
    }
}

impl From<EnumSpec> for ConversionRule {
    fn from(spec: EnumSpec) -> Self {
        Self::Enum(spec)
    }
}
