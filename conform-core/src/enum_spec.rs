use std::collections::HashMap;

use crate::error::SchemaError;

/// An ordered, validated list of `(external key, internal value)` pairs.
///
/// Covers both "direct" enums, where the wire value is the value the caller
/// wants, and "mapped" enums, where e.g. numeric codes from a wire format are
/// translated to names. Construction rejects empty lists, empty components
/// and repeated external keys, so conversion never has to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSpec {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl EnumSpec {
    /// An enum whose allowed input values are also its internal values.
    pub fn direct<I, S>(values: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_entries(
            values
                .into_iter()
                .map(|value| {
                    let value = value.into();
                    (value.clone(), value)
                })
                .collect(),
        )
    }

    /// An enum mapping external keys to internal values.
    pub fn mapped<I, K, V>(pairs: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_entries(
            pairs
                .into_iter()
                .map(|(external, internal)| (external.into(), internal.into()))
                .collect(),
        )
    }

    fn from_entries(entries: Vec<(String, String)>) -> Result<Self, SchemaError> {
        if entries.is_empty() {
            return Err(SchemaError::EmptyEnum);
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (position, (external, internal)) in entries.iter().enumerate() {
            if external.is_empty() {
                return Err(SchemaError::EmptyEnumKey);
            }
            if internal.is_empty() {
                return Err(SchemaError::EmptyEnumValue(external.clone()));
            }
            if index.insert(external.clone(), position).is_some() {
                return Err(SchemaError::DuplicateEnumKey(external.clone()));
            }
        }

        Ok(Self { entries, index })
    }

    /// Internal value for an external key.
    pub fn lookup(&self, external: &str) -> Option<&str> {
        self.index
            .get(external)
            .map(|&position| self.entries[position].1.as_str())
    }

    /// External keys in declaration order.
    pub fn external_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(external, _)| external.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(external, internal)| (external.as_str(), internal.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed spec; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every external key equals its internal value.
    pub fn is_direct(&self) -> bool {
        self.entries.iter().all(|(external, internal)| external == internal)
    }
}
