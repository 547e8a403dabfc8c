use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::io::Read;

use crate::error::BoxError;

/// Identity of a value type, used to look up its deserializer
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    pub fn of<V: Any>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: std::any::type_name::<V>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn is<V: Any>(&self) -> bool {
        self.id == TypeId::of::<V>()
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.name.fmt(f)
    }
}

pub(crate) type ErasedDeserializer = Box<dyn Fn(&mut dyn Read) -> Result<Box<dyn Any>, BoxError>>;

/// Deserializers by the type they produce
///
/// At most one deserializer is kept per type; registering again replaces it.
#[derive(Default)]
pub struct DeserializerRegistry {
    entries: HashMap<ValueType, ErasedDeserializer>,
}

impl DeserializerRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn register<V, E, F>(&mut self, deserializer: F)
    where
        V: Any,
        E: Into<BoxError>,
        F: Fn(&mut dyn Read) -> Result<V, E> + 'static,
    {
        let ty = ValueType::of::<V>();
        crate::debug!("Registering deserializer for {}", ty);
        let erased: ErasedDeserializer = Box::new(move |reader: &mut dyn Read| {
            deserializer(reader)
                .map(|value| Box::new(value) as Box<dyn Any>)
                .map_err(Into::into)
        });
        self.entries.insert(ty, erased);
    }

    pub fn contains(&self, ty: ValueType) -> bool {
        self.entries.contains_key(&ty)
    }

    /// Deserializer for exactly `ty`
    ///
    /// `field` names the requester in the error when none is registered.
    pub(crate) fn resolve(&self, ty: ValueType, field: &str) -> crate::Result<&ErasedDeserializer> {
        self.entries
            .get(&ty)
            .ok_or_else(|| crate::Error::DeserializerMissing {
                field: field.to_owned(),
                type_name: ty.name(),
            })
    }
}

impl std::fmt::Debug for DeserializerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.entries.keys().map(|ty| ty.name()))
            .finish()
    }
}
