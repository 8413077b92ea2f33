use std::fmt;

use crate::error::{ConversionError, ConversionResult};
use crate::{FieldValue, FromFieldValue, Schema};

type Factory<T> = dyn Fn() -> T + Send + Sync;
type Setter<T> = dyn Fn(&mut T, FieldValue) -> ConversionResult<()> + Send + Sync;

/// The shape of a conversion target: how to build a default instance and
/// which fields it has, in order, with a setter for each.
///
/// The field list is authoritative during conversion. Every listed field must
/// be present on the input and covered by the schema (unless the schema
/// excludes it); schema properties that are not listed here are ignored.
///
/// Registering a name twice replaces the earlier setter and keeps the
/// original position.
pub struct Binding<T> {
    factory: Box<Factory<T>>,
    fields: Vec<(String, Box<Setter<T>>)>,
}

impl<T: Default + 'static> Binding<T> {
    /// A binding whose instances start from `T::default()`.
    pub fn new() -> Self {
        Self::with_factory(T::default)
    }
}

impl<T: Default + 'static> Default for Binding<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Binding<T> {
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            fields: Vec::new(),
        }
    }

    /// Registers a field whose setter always accepts the converted value.
    #[must_use]
    pub fn field<V, F>(self, name: impl Into<String>, setter: F) -> Self
    where
        V: FromFieldValue,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.try_field(name, move |target: &mut T, value: V| {
            setter(target, value);
            Ok::<(), ConversionError>(())
        })
    }

    /// Registers a field whose setter may reject the converted value.
    ///
    /// A rejection surfaces as [`ConversionError::Assignment`] inside the
    /// property's error frame.
    #[must_use]
    pub fn try_field<V, E, F>(mut self, name: impl Into<String>, setter: F) -> Self
    where
        V: FromFieldValue,
        E: fmt::Display,
        F: Fn(&mut T, V) -> Result<(), E> + Send + Sync + 'static,
    {
        let setter: Box<Setter<T>> = Box::new(move |target: &mut T, value: FieldValue| {
            let typed = V::from_field_value(value)?;
            setter(target, typed).map_err(|e| ConversionError::Assignment(e.to_string()))
        });

        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = setter,
            None => self.fields.push((name, setter)),
        }
        self
    }

    /// A fresh instance from the factory.
    pub fn instantiate(&self) -> T {
        (self.factory)()
    }

    /// Registered field names, in conversion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn fields(&self) -> impl Iterator<Item = (&str, &Setter<T>)> {
        self.fields
            .iter()
            .map(|(name, setter)| (name.as_str(), setter.as_ref()))
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("type", &std::any::type_name::<T>())
            .field(
                "fields",
                &self.fields.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// A target type that carries its own binding and schema.
///
/// Implementations usually keep both in `LazyLock` statics so they are built
/// once per type.
pub trait Model: Sized + 'static {
    fn binding() -> &'static Binding<Self>;
    fn schema() -> &'static Schema;
}
