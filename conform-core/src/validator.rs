use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::{ConfigError, ValidatorConfig};
use crate::convert::{self, BasicValue, DateParser};
use crate::error::{ConversionError, ConversionResult};
use crate::{
    BasicType, Binding, ConversionRule, EnumSpec, FieldValue, FromFieldValue, Model, Schema,
};

/// The conversion engine.
///
/// Holds only read-only configuration, so a single instance (or cheap clones
/// of it) can be shared by any number of callers and threads.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    dates: Arc<DateParser>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ValidatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_date_parser(DateParser::from_config(config)?))
    }

    pub fn with_date_parser(dates: DateParser) -> Self {
        Self {
            dates: Arc::new(dates),
        }
    }

    pub fn date_parser(&self) -> &DateParser {
        &self.dates
    }

    // ── Basic types ──────────────────────────────────────────────

    pub fn convert_string(&self, value: &Value) -> ConversionResult<String> {
        convert::convert_string(value)
    }

    pub fn convert_number(&self, value: &Value) -> ConversionResult<f64> {
        convert::convert_number(value)
    }

    pub fn convert_boolean(&self, value: &Value) -> ConversionResult<bool> {
        convert::convert_boolean(value)
    }

    pub fn convert_date(&self, value: &Value) -> ConversionResult<DateTime<Utc>> {
        self.dates.convert_date(value)
    }

    pub fn convert_nullable_string(&self, value: &Value) -> ConversionResult<Option<String>> {
        convert::convert_nullable_string(value)
    }

    pub fn convert_nullable_number(&self, value: &Value) -> ConversionResult<Option<f64>> {
        convert::convert_nullable_number(value)
    }

    pub fn convert_nullable_boolean(&self, value: &Value) -> ConversionResult<Option<bool>> {
        convert::convert_nullable_boolean(value)
    }

    pub fn convert_nullable_date(&self, value: &Value) -> ConversionResult<Option<DateTime<Utc>>> {
        self.dates.convert_nullable_date(value)
    }

    /// Runs the converter for `basic`.
    pub fn convert_basic(&self, value: &Value, basic: BasicType) -> ConversionResult<FieldValue> {
        Ok(match basic {
            BasicType::String => FieldValue::String(self.convert_string(value)?),
            BasicType::Number => FieldValue::Number(self.convert_number(value)?),
            BasicType::Boolean => FieldValue::Boolean(self.convert_boolean(value)?),
            BasicType::Date => FieldValue::Date(self.convert_date(value)?),
        })
    }

    /// Like [`convert_basic`](Self::convert_basic), but null becomes [`FieldValue::Null`].
    pub fn convert_nullable_basic(
        &self,
        value: &Value,
        basic: BasicType,
    ) -> ConversionResult<FieldValue> {
        if value.is_null() {
            Ok(FieldValue::Null)
        } else {
            self.convert_basic(value, basic)
        }
    }

    pub fn convert_enum(&self, value: &Value, spec: &EnumSpec) -> ConversionResult<String> {
        convert::convert_enum(value, spec)
    }

    // ── Objects ──────────────────────────────────────────────────

    /// Validates `source` against `schema` and builds a `T` from it.
    ///
    /// The binding's fields drive the conversion: each one is skipped if the
    /// schema excludes it, and otherwise must exist on `source` and have a
    /// schema rule. A null is accepted only for nullable properties. The
    /// first failure aborts the call and the partially built `T` is dropped.
    pub fn validate_and_convert_object<T: 'static>(
        &self,
        source: &Value,
        binding: &Binding<T>,
        schema: &Schema,
    ) -> ConversionResult<T> {
        let mut target = binding.instantiate();
        let input = source.as_object();

        for (name, setter) in binding.fields() {
            if schema.property_is_excluded(name) {
                trace!("Skipping excluded property '{}'", name);
                continue;
            }

            let Some(raw) = input.and_then(|object| object.get(name)) else {
                return Err(ConversionError::MissingProperty(name.to_string()));
            };
            let rule = schema.get_definition(name)?;

            if raw.is_null() {
                if !schema.property_is_nullable(name) {
                    return Err(ConversionError::Nullability(name.to_string()));
                }
                setter(&mut target, FieldValue::Null)
                    .map_err(|e| e.in_property(name))?;
                continue;
            }

            self.apply_rule(rule, raw)
                .and_then(|value| setter(&mut target, value))
                .map_err(|e| e.in_property(name))?;
            trace!("Converted property '{}'", name);
        }

        Ok(target)
    }

    /// Converts every element of `source` with
    /// [`validate_and_convert_object`](Self::validate_and_convert_object).
    ///
    /// Nothing is returned unless every element converts.
    pub fn validate_and_convert_object_array<T: 'static>(
        &self,
        source: &Value,
        binding: &Binding<T>,
        schema: &Schema,
    ) -> ConversionResult<Vec<T>> {
        let elements = expect_array(source)?;
        let converted = elements
            .iter()
            .map(|element| {
                self.validate_and_convert_object(element, binding, schema)
                    .map_err(|e| e.in_element(element.to_string()))
            })
            .collect::<ConversionResult<Vec<T>>>()?;
        debug!(
            "Converted {} array elements into {}",
            converted.len(),
            std::any::type_name::<T>()
        );
        Ok(converted)
    }

    pub fn convert_model<T: Model>(&self, source: &Value) -> ConversionResult<T> {
        self.validate_and_convert_object(source, T::binding(), T::schema())
    }

    pub fn convert_model_array<T: Model>(&self, source: &Value) -> ConversionResult<Vec<T>> {
        self.validate_and_convert_object_array(source, T::binding(), T::schema())
    }

    // ── Basic-type arrays ────────────────────────────────────────

    /// Converts every element of `source` to `basic`.
    pub fn validate_and_convert_basic_array(
        &self,
        source: &Value,
        basic: BasicType,
    ) -> ConversionResult<Vec<FieldValue>> {
        self.map_elements(source, |element| self.convert_basic(element, basic))
    }

    /// Converts every element of `source` to `basic`, passing nulls through.
    pub fn validate_and_convert_nullable_basic_array(
        &self,
        source: &Value,
        basic: BasicType,
    ) -> ConversionResult<Vec<FieldValue>> {
        self.map_elements(source, |element| self.convert_nullable_basic(element, basic))
    }

    /// Typed form of [`validate_and_convert_basic_array`](Self::validate_and_convert_basic_array);
    /// the element type selects the converter.
    pub fn validate_and_convert_basic_type_array<T: BasicValue>(
        &self,
        source: &Value,
    ) -> ConversionResult<Vec<T>> {
        self.map_elements(source, |element| {
            self.convert_basic(element, T::BASIC_TYPE)
                .and_then(T::from_field_value)
        })
    }

    /// Typed form of
    /// [`validate_and_convert_nullable_basic_array`](Self::validate_and_convert_nullable_basic_array).
    pub fn validate_and_convert_nullable_type_array<T: BasicValue>(
        &self,
        source: &Value,
    ) -> ConversionResult<Vec<Option<T>>> {
        self.map_elements(source, |element| {
            self.convert_nullable_basic(element, T::BASIC_TYPE)
                .and_then(Option::<T>::from_field_value)
        })
    }

    fn map_elements<T>(
        &self,
        source: &Value,
        convert: impl Fn(&Value) -> ConversionResult<T>,
    ) -> ConversionResult<Vec<T>> {
        expect_array(source)?
            .iter()
            .map(|element| {
                convert(element).map_err(|e| e.in_element(convert::display_value(element)))
            })
            .collect()
    }

    fn apply_rule(&self, rule: &ConversionRule, raw: &Value) -> ConversionResult<FieldValue> {
        match rule {
            ConversionRule::Basic(basic) => self.convert_basic(raw, *basic),
            ConversionRule::Enum(spec) => self.convert_enum(raw, spec).map(FieldValue::Enum),
            ConversionRule::Custom(converter) => converter.call(raw),
        }
    }
}

fn expect_array(source: &Value) -> ConversionResult<&Vec<Value>> {
    source
        .as_array()
        .ok_or_else(|| ConversionError::Shape(convert::kind_name(source)))
}
