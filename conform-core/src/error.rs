//! Error types for schema construction and conversion.

use thiserror::Error;

/// Result type for conversion operations.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Errors raised while building a [`Schema`](crate::Schema) or an
/// [`EnumSpec`](crate::EnumSpec).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A schema needs at least one property definition.
    #[error("property definitions cannot be empty")]
    EmptyDefinitions,

    /// A property name list contains a blank entry.
    #[error("'{0}' contains a blank or empty property name")]
    BlankPropertyName(&'static str),

    /// The same property was given two conversion rules.
    #[error("property '{0}' is defined more than once")]
    DuplicateProperty(String),

    /// A nullable property has no conversion rule.
    #[error("nullable property '{0}' is not defined in the property definitions")]
    UnknownNullableProperty(String),

    /// An enum mapping needs at least one entry.
    #[error("enum mappings cannot be empty")]
    EmptyEnum,

    /// An enum mapping entry has an empty external key.
    #[error("enum mappings contain an empty mapping value")]
    EmptyEnumKey,

    /// An enum mapping entry has an empty internal value.
    #[error("enum mapping '{0}' has an empty local value")]
    EmptyEnumValue(String),

    /// Two enum mapping entries share an external key.
    #[error("enum mapping value '{0}' is defined more than once")]
    DuplicateEnumKey(String),
}

/// Coarse classification of a [`ConversionError`], taken from its innermost
/// cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Schema,
    Shape,
    MissingProperty,
    MissingSchema,
    Nullability,
    TypeMismatch,
    ConversionFailed,
    EnumMismatch,
    Custom,
    Assignment,
}

/// One frame of the breadcrumb carried by a nested [`ConversionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorContext<'a> {
    /// The named property of an object was being converted.
    Property(&'a str),
    /// The array element with this rendering was being converted.
    Element(&'a str),
}

/// Errors raised while validating and converting untyped values.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Malformed schema or enum mapping.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// An array was expected.
    #[error("parameter 'inputArray' is not an array but was '{0}'")]
    Shape(&'static str),

    /// The input object lacks a property the target declares.
    #[error("inputObject does not contain property '{0}'")]
    MissingProperty(String),

    /// The schema lacks a rule for a property the target declares.
    #[error("schema does not contain a type conversion definition for object property '{0}'")]
    MissingSchema(String),

    /// A null was supplied for a property that is not nullable.
    #[error("property '{0}' is not defined as nullable but has a null value")]
    Nullability(String),

    /// The value has the wrong dynamic kind for a basic converter.
    #[error("parameter '{parameter}' was expected to be of type {expected} but was '{actual}'")]
    TypeMismatch {
        parameter: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// The value has the right kind but could not be parsed.
    #[error("value '{value}' of parameter '{parameter}' could not be converted to a {target}")]
    ConversionFailed {
        parameter: &'static str,
        value: String,
        target: &'static str,
    },

    /// The value is not one of the enum's external keys.
    #[error(
        "parameter 'untypedEnumValue' with value '{value}' could not be matched to an enum mapping value in '{valid}'"
    )]
    EnumMismatch { value: String, valid: String },

    /// Raised by a caller-supplied converter.
    #[error("{0}")]
    Custom(String),

    /// The target's setter rejected the converted value.
    #[error("{0}")]
    Assignment(String),

    /// Failure while converting a property of an object.
    #[error("Error attempting to validate and convert property '{property}': {source}")]
    Property {
        property: String,
        source: Box<ConversionError>,
    },

    /// Failure while converting an element of an array.
    #[error("Error attempting to validate and convert array element '{element}': {source}")]
    Element {
        element: String,
        source: Box<ConversionError>,
    },
}

impl ConversionError {
    /// Error for use inside custom converters.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Wraps `self` as the cause of a failure on `property`.
    #[must_use]
    pub fn in_property(self, property: impl Into<String>) -> Self {
        Self::Property {
            property: property.into(),
            source: Box::new(self),
        }
    }

    /// Wraps `self` as the cause of a failure on the array element rendered as `element`.
    #[must_use]
    pub fn in_element(self, element: impl Into<String>) -> Self {
        Self::Element {
            element: element.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all property and element frames removed.
    pub fn root_cause(&self) -> &ConversionError {
        let mut current = self;
        while let Self::Property { source, .. } | Self::Element { source, .. } = current {
            current = source.as_ref();
        }
        current
    }

    /// Classification of the innermost error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Property { source, .. } | Self::Element { source, .. } => source.kind(),
            Self::Schema(_) => ErrorKind::Schema,
            Self::Shape(_) => ErrorKind::Shape,
            Self::MissingProperty(_) => ErrorKind::MissingProperty,
            Self::MissingSchema(_) => ErrorKind::MissingSchema,
            Self::Nullability(_) => ErrorKind::Nullability,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::ConversionFailed { .. } => ErrorKind::ConversionFailed,
            Self::EnumMismatch { .. } => ErrorKind::EnumMismatch,
            Self::Custom(_) => ErrorKind::Custom,
            Self::Assignment(_) => ErrorKind::Assignment,
        }
    }

    /// Breadcrumb frames, outermost first.
    pub fn context(&self) -> Vec<ErrorContext<'_>> {
        let mut frames = Vec::new();
        let mut current = self;
        loop {
            match current {
                Self::Property { property, source } => {
                    frames.push(ErrorContext::Property(property));
                    current = source.as_ref();
                }
                Self::Element { element, source } => {
                    frames.push(ErrorContext::Element(element));
                    current = source.as_ref();
                }
                _ => return frames,
            }
        }
    }
}
