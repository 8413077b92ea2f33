use serde_json::Value;

use super::display_value;
use crate::error::{ConversionError, ConversionResult};
use crate::EnumSpec;

/// Matches the value's text form against the external keys of `spec` and
/// returns the mapped internal value.
pub fn convert_enum(value: &Value, spec: &EnumSpec) -> ConversionResult<String> {
    let key = display_value(value);
    match spec.lookup(&key) {
        Some(internal) => Ok(internal.to_string()),
        None => Err(ConversionError::EnumMismatch {
            value: key,
            valid: spec.external_keys().collect::<Vec<_>>().join(","),
        }),
    }
}

/// [`convert_enum`] against ad-hoc `(external, internal)` pairs.
///
/// The pairs are validated first, so an empty list or an empty component
/// fails with [`ConversionError::Schema`].
pub fn convert_enum_mappings<I, K, V>(value: &Value, pairs: I) -> ConversionResult<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let spec = EnumSpec::mapped(pairs)?;
    convert_enum(value, &spec)
}
