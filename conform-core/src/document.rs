//! Declarative schema documents (TOML or JSON).
//!
//! ```toml
//! nullable = ["dateAdded"]
//!
//! [[properties]]
//! name = "displayName"
//! type = "string"
//!
//! [[properties]]
//! name = "unit"
//! type = "enum"
//! mappings = [["0", "Bunch"], ["1", "Piece"]]
//! ```
//!
//! Custom converters cannot be expressed in a document; schemas that need
//! them are built in code.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::SchemaError;
use crate::{BasicType, ConversionRule, EnumSpec, Schema};

/// Errors loading a [`SchemaDocument`] or turning it into a [`Schema`].
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read schema document {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML schema document: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON schema document: {0}")]
    Json(#[from] serde_json::Error),

    /// Only `.toml` and `.json` documents are recognised.
    #[error("unrecognised schema document format: {0:?}")]
    UnknownFormat(PathBuf),

    #[error("enum property '{0}' must declare exactly one of 'values' or 'mappings'")]
    EnumValues(String),

    #[error("property '{0}' is not an enum but declares enum values")]
    UnexpectedEnumValues(String),

    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),
}

/// The `type` of a documented property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    String,
    Number,
    Boolean,
    Date,
    Enum,
}

/// One property of a [`SchemaDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    /// Allowed values of a direct enum.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// `[external, internal]` pairs of a mapped enum.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mappings: Vec<(String, String)>,
    /// Shorthand for listing the property under the top-level `nullable`.
    #[serde(default)]
    pub nullable: bool,
}

impl PropertyDocument {
    fn to_rule(&self) -> Result<ConversionRule, DocumentError> {
        let has_enum_values = !self.values.is_empty() || !self.mappings.is_empty();
        let basic = match self.kind {
            PropertyKind::String => BasicType::String,
            PropertyKind::Number => BasicType::Number,
            PropertyKind::Boolean => BasicType::Boolean,
            PropertyKind::Date => BasicType::Date,
            PropertyKind::Enum => {
                let spec = match (self.values.is_empty(), self.mappings.is_empty()) {
                    (false, true) => EnumSpec::direct(self.values.iter().cloned())?,
                    (true, false) => EnumSpec::mapped(self.mappings.iter().cloned())?,
                    _ => return Err(DocumentError::EnumValues(self.name.clone())),
                };
                return Ok(ConversionRule::Enum(spec));
            }
        };

        if has_enum_values {
            return Err(DocumentError::UnexpectedEnumValues(self.name.clone()));
        }
        Ok(ConversionRule::Basic(basic))
    }
}

/// A schema described as data rather than code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub properties: Vec<PropertyDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nullable: Vec<String>,
}

impl SchemaDocument {
    pub fn from_toml_str(contents: &str) -> Result<Self, DocumentError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Reads a `.toml` or `.json` document, chosen by file extension.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, DocumentError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(DocumentError::UnknownFormat(path.to_path_buf())),
        };

        let contents = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = parse(&contents)?;
        debug!(
            "Loaded schema document {:?} with {} properties",
            path,
            document.properties.len()
        );
        Ok(document)
    }

    /// Validates the document and builds the [`Schema`] it describes.
    pub fn into_schema(self) -> Result<Schema, DocumentError> {
        let rules = self
            .properties
            .iter()
            .map(|property| Ok((property.name.clone(), property.to_rule()?)))
            .collect::<Result<Vec<_>, DocumentError>>()?;

        let mut nullable = self.nullable;
        for property in self.properties.iter().filter(|p| p.nullable) {
            if !nullable.contains(&property.name) {
                nullable.push(property.name.clone());
            }
        }

        Ok(Schema::new(rules, self.excluded, nullable)?)
    }
}
