use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use serde_json::Value;

use super::basic::nullable;
use super::kind_name;
use crate::config::{ConfigError, ValidatorConfig};
use crate::error::{ConversionError, ConversionResult};

/// Parses date strings into UTC timestamps.
///
/// Tries RFC 3339 first, then RFC 2822, then each naive date-time format, then each
/// date-only format (midnight). Naive values are read as wall-clock time at
/// the configured UTC offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParser {
    date_formats: Vec<String>,
    date_only_formats: Vec<String>,
    offset: FixedOffset,
}

impl DateParser {
    pub fn new(date_formats: Vec<String>, date_only_formats: Vec<String>, offset: FixedOffset) -> Self {
        Self {
            date_formats,
            date_only_formats,
            offset,
        }
    }

    pub fn from_config(config: &ValidatorConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.date_formats.clone(),
            config.date_only_formats.clone(),
            config.utc_offset()?,
        ))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Strings are parsed; objects and arrays are accepted as date-like
    /// kinds but never hold a parseable date.
    pub fn convert_date(&self, value: &Value) -> ConversionResult<DateTime<Utc>> {
        match value {
            Value::String(s) => self.parse(s).ok_or_else(|| ConversionError::ConversionFailed {
                parameter: "untypedDate",
                value: s.clone(),
                target: "Date",
            }),
            Value::Object(_) | Value::Array(_) => Err(ConversionError::ConversionFailed {
                parameter: "untypedDate",
                value: value.to_string(),
                target: "Date",
            }),
            other => Err(ConversionError::TypeMismatch {
                parameter: "untypedDate",
                expected: "'string' or 'object'",
                actual: kind_name(other),
            }),
        }
    }

    pub fn convert_nullable_date(&self, value: &Value) -> ConversionResult<Option<DateTime<Utc>>> {
        nullable(value, |v| self.convert_date(v))
    }

    pub fn parse(&self, raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
            return Some(parsed.with_timezone(&Utc));
        }

        if let Some(naive) = self
            .date_formats
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        {
            return self.localize(naive);
        }

        self.date_only_formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
            .and_then(|date| self.localize(date.and_time(NaiveTime::MIN)))
    }

    fn localize(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.offset
            .from_local_datetime(&naive)
            .single()
            .map(|local| local.with_timezone(&Utc))
    }
}

impl Default for DateParser {
    fn default() -> Self {
        let config = ValidatorConfig::default();
        Self::new(config.date_formats, config.date_only_formats, Utc.fix())
    }
}
