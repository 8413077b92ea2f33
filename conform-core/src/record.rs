use std::fmt;

use crate::{Binding, FieldValue, Schema};

/// A dynamically shaped conversion target: an ordered list of property
/// names and their converted values.
///
/// Used where no Rust type exists for the data, e.g. when the schema itself
/// is loaded at runtime from a [`SchemaDocument`](crate::SchemaDocument).
#[derive(Debug, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// A binding with one field per schema property, in declaration order.
    ///
    /// New records start with every field set to [`FieldValue::Null`], which
    /// is also what excluded properties keep.
    pub fn binding(schema: &Schema) -> Binding<Record> {
        let names: Vec<String> = schema.property_names().map(String::from).collect();
        let template = names.clone();
        let binding = Binding::with_factory(move || Record {
            fields: template
                .iter()
                .map(|name| (name.clone(), FieldValue::Null))
                .collect(),
        });

        names.into_iter().fold(binding, |binding, name| {
            let key = name.clone();
            binding.field(name, move |record: &mut Record, value: FieldValue| {
                record.set(&key, value);
            })
        })
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Replaces the value of `name`, appending it if absent.
    pub fn set(&mut self, name: &str, value: FieldValue) {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}
