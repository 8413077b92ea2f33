//! Schema-driven validation and conversion for conform.
//!
//! Maps untyped values (anything parsed into a [`serde_json::Value`], e.g. an
//! HTTP response body) onto typed Rust objects:
//! - [`Schema`]: property name to [`ConversionRule`], plus excluded and nullable sets
//! - [`Binding`]: a target type's factory and its ordered `(field, setter)` list
//! - [`Validator`]: converts objects, object arrays and basic-type arrays
//! - [`convert`]: the basic-type and enum converters the validator dispatches to
//!
//! Schemas, bindings and validators are immutable once built and can be shared
//! freely across threads. Every conversion either returns a fully populated
//! value or a [`ConversionError`] whose message reads as a breadcrumb from the
//! outermost array element or property down to the root cause.

mod binding;
mod config;
pub mod convert;
mod document;
mod enum_spec;
mod error;
mod record;
mod rule;
mod schema;
mod validator;
mod value;

pub use binding::{Binding, Model};
pub use config::{ConfigError, ValidatorConfig};
pub use convert::BasicValue;
pub use document::{DocumentError, PropertyDocument, PropertyKind, SchemaDocument};
pub use enum_spec::EnumSpec;
pub use error::{ConversionError, ConversionResult, ErrorContext, ErrorKind, SchemaError};
pub use record::Record;
pub use rule::{BasicType, ConversionRule, CustomConverter};
pub use schema::{Schema, SchemaBuilder};
pub use validator::Validator;
pub use value::{Custom, FieldValue, FromFieldValue, Parsed};
