use std::collections::{HashMap, HashSet};

use crate::error::{ConversionError, ConversionResult, SchemaError};
use crate::ConversionRule;

/// Immutable registry of per-property conversion rules.
///
/// Alongside the rules it records which properties are excluded from
/// conversion (the target keeps its factory default) and which may be set to
/// null. All validation happens in the constructor; after that every method
/// is a pure lookup, so one schema can serve any number of conversions on
/// any number of threads.
#[derive(Debug, Clone)]
pub struct Schema {
    rules: Vec<(String, ConversionRule)>,
    index: HashMap<String, usize>,
    excluded: HashSet<String>,
    nullable: HashSet<String>,
}

impl Schema {
    /// Builds a schema from property rules plus excluded and nullable names.
    ///
    /// Fails if `rules` is empty or repeats a name, if any name is blank, or
    /// if a nullable name has no rule.
    pub fn new<R, N, E, M>(rules: R, excluded: E, nullable: M) -> Result<Self, SchemaError>
    where
        R: IntoIterator<Item = (N, ConversionRule)>,
        N: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let rules: Vec<(String, ConversionRule)> =
            rules.into_iter().map(|(name, rule)| (name.into(), rule)).collect();
        if rules.is_empty() {
            return Err(SchemaError::EmptyDefinitions);
        }

        let mut index = HashMap::with_capacity(rules.len());
        for (position, (name, _)) in rules.iter().enumerate() {
            if is_blank(name) {
                return Err(SchemaError::BlankPropertyName("rules"));
            }
            if index.insert(name.clone(), position).is_some() {
                return Err(SchemaError::DuplicateProperty(name.clone()));
            }
        }

        let excluded = collect_names(excluded, "excluded")?;
        let nullable = collect_names(nullable, "nullable")?;
        if let Some(unknown) = nullable.iter().find(|name| !index.contains_key(*name)) {
            return Err(SchemaError::UnknownNullableProperty(unknown.clone()));
        }

        Ok(Self {
            rules,
            index,
            excluded,
            nullable,
        })
    }

    /// A schema with no excluded and no nullable properties.
    pub fn from_rules<R, N>(rules: R) -> Result<Self, SchemaError>
    where
        R: IntoIterator<Item = (N, ConversionRule)>,
        N: Into<String>,
    {
        Self::new(rules, Vec::<String>::new(), Vec::<String>::new())
    }

    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn has_definition(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The rule for `name`, or [`ConversionError::MissingSchema`].
    pub fn get_definition(&self, name: &str) -> ConversionResult<&ConversionRule> {
        self.index
            .get(name)
            .map(|&position| &self.rules[position].1)
            .ok_or_else(|| ConversionError::MissingSchema(name.to_string()))
    }

    pub fn property_is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    pub fn property_is_nullable(&self, name: &str) -> bool {
        self.nullable.contains(name)
    }

    /// Names with a rule, in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false for a constructed schema.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}

fn collect_names<I>(names: I, list: &'static str) -> Result<HashSet<String>, SchemaError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    names
        .into_iter()
        .map(|name| {
            let name: String = name.into();
            if is_blank(&name) {
                Err(SchemaError::BlankPropertyName(list))
            } else {
                Ok(name)
            }
        })
        .collect()
}

/// Incremental construction of a [`Schema`]; validation runs in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    rules: Vec<(String, ConversionRule)>,
    excluded: Vec<String>,
    nullable: Vec<String>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn rule(mut self, name: impl Into<String>, rule: impl Into<ConversionRule>) -> Self {
        self.rules.push((name.into(), rule.into()));
        self
    }

    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excluded.push(name.into());
        self
    }

    #[must_use]
    pub fn nullable(mut self, name: impl Into<String>) -> Self {
        self.nullable.push(name.into());
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        Schema::new(self.rules, self.excluded, self.nullable)
    }
}
