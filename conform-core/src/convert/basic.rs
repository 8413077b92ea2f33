use serde_json::Value;

use super::{display_number, kind_name};
use crate::error::{ConversionError, ConversionResult};

/// Strings pass through; numbers and booleans are rendered as text.
///
/// Floats render the way JavaScript prints them: `-0.0` is `"0"`, and
/// magnitudes at or above `1e21` or below `1e-6` use exponent form
/// (`"1e+21"`, `"1e-7"`).
pub fn convert_string(value: &Value) -> ConversionResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(display_number(n)),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ConversionError::TypeMismatch {
            parameter: "untypedString",
            expected: "'string', 'boolean', or 'number'",
            actual: kind_name(other),
        }),
    }
}

/// Numbers pass through. Strings convert to the longest numeric prefix after
/// leading whitespace, so `"12abc"` is `12.0`. Strings with no leading number,
/// or whose number is not finite, fail.
pub fn convert_number(value: &Value) -> ConversionResult<f64> {
    let failed = || ConversionError::ConversionFailed {
        parameter: "untypedNumber",
        value: super::display_value(value),
        target: "number",
    };

    match value {
        Value::Number(n) => n.as_f64().ok_or_else(failed),
        Value::String(s) => {
            let s = s.trim_start();
            numeric_prefix_len(s)
                .and_then(|len| s[..len].parse::<f64>().ok())
                .filter(|n| n.is_finite())
                .ok_or_else(failed)
        }
        other => Err(ConversionError::TypeMismatch {
            parameter: "untypedNumber",
            expected: "'string' or 'number'",
            actual: kind_name(other),
        }),
    }
}

/// Byte length of the decimal float literal at the start of `s`: an optional
/// sign, digits with an optional fraction, then an optional exponent. `None`
/// if there is no mantissa digit.
fn numeric_prefix_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = digits_from(end);
    end += whole;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if whole + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole + fraction == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let digits = digits_from(exponent);
        if digits > 0 {
            end = exponent + digits;
        }
    }
    Some(end)
}

/// Booleans pass through; strings must be `true` or `false` in any case,
/// ignoring surrounding whitespace.
pub fn convert_boolean(value: &Value) -> ConversionResult<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(ConversionError::ConversionFailed {
                    parameter: "untypedBoolean",
                    value: s.clone(),
                    target: "boolean",
                })
            }
        }
        other => Err(ConversionError::TypeMismatch {
            parameter: "untypedBoolean",
            expected: "'string' or 'boolean'",
            actual: kind_name(other),
        }),
    }
}

pub fn convert_nullable_string(value: &Value) -> ConversionResult<Option<String>> {
    nullable(value, convert_string)
}

pub fn convert_nullable_number(value: &Value) -> ConversionResult<Option<f64>> {
    nullable(value, convert_number)
}

pub fn convert_nullable_boolean(value: &Value) -> ConversionResult<Option<bool>> {
    nullable(value, convert_boolean)
}

pub(super) fn nullable<T>(
    value: &Value,
    convert: impl FnOnce(&Value) -> ConversionResult<T>,
) -> ConversionResult<Option<T>> {
    if value.is_null() {
        Ok(None)
    } else {
        convert(value).map(Some)
    }
}
