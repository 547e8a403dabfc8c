use std::any::Any;
use std::path::PathBuf;

use crate::registry::ValueType;

/// How a field finds and binds its files
///
/// ```rust
/// # use fixsnap::fixture::FieldSpec;
/// let spec = FieldSpec::new("expected.json|expected.txt").optional();
/// assert!(spec.is_optional());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    template: String,
    optional: bool,
    global: bool,
    inject_path: bool,
    multiple: bool,
}

impl FieldSpec {
    /// `template` holds `|`-separated glob alternatives, see [`FileTemplate`][crate::path::FileTemplate]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            optional: false,
            global: false,
            inject_path: false,
            multiple: false,
        }
    }

    /// Keep the field's current value when no file matches
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Also search the ancestors of the fixture directory
    pub fn global(mut self) -> Self {
        self.global = true;
        self
    }

    /// Bind the matched path instead of the file's content
    pub fn inject_path(mut self) -> Self {
        self.inject_path = true;
        self
    }

    /// Bind every match, in template order
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn is_inject_path(&self) -> bool {
        self.inject_path
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }
}

/// A type whose fields are bound from the files of a directory
///
/// The fixture starts from [`Default`], so an optional field keeps its default when its file
/// is missing.
///
/// ```rust
/// use fixsnap::fixture::{FieldSpec, Fields, FixtureContent};
///
/// #[derive(Default)]
/// struct Case {
///     input: String,
///     expected: Option<String>,
///     extras: Vec<std::path::PathBuf>,
/// }
///
/// impl FixtureContent for Case {
///     fn fields() -> Fields<Self> {
///         Fields::new()
///             .bind("input", FieldSpec::new("input.txt"), |c: &mut Self, v| c.input = v)
///             .bind(
///                 "expected",
///                 FieldSpec::new("expected.txt").optional(),
///                 |c: &mut Self, v: String| c.expected = Some(v),
///             )
///             .bind_all(
///                 "extras",
///                 FieldSpec::new("*.extra").multiple().inject_path().optional(),
///                 |c: &mut Self, v| c.extras = v,
///             )
///     }
/// }
/// ```
pub trait FixtureContent: Default + 'static {
    /// Bound fields, in the order they are loaded
    fn fields() -> Fields<Self>;
}

/// Ordered table of bound fields
pub struct Fields<T> {
    fields: Vec<Field<T>>,
}

impl<T: 'static> Fields<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Bind a single value of type `V`
    pub fn bind<V, F>(mut self, name: impl Into<String>, spec: FieldSpec, set: F) -> Self
    where
        V: Any,
        F: Fn(&mut T, V) + 'static,
    {
        let slot = Slot::Single {
            ty: ValueType::of::<V>(),
            set: Box::new(move |target: &mut T, value: Box<dyn Any>| {
                let value = value.downcast::<V>()?;
                set(target, *value);
                Ok(())
            }),
        };
        self.fields.push(Field::new(name.into(), spec, slot));
        self
    }

    /// Bind an ordered collection of `E`
    pub fn bind_all<E, F>(mut self, name: impl Into<String>, spec: FieldSpec, set: F) -> Self
    where
        E: Any,
        F: Fn(&mut T, Vec<E>) + 'static,
    {
        let slot = Slot::Collection {
            element: ValueType::of::<E>(),
            set: Box::new(move |target: &mut T, values: Vec<Box<dyn Any>>| {
                let values = values
                    .into_iter()
                    .map(|value| value.downcast::<E>().map(|value| *value))
                    .collect::<Result<Vec<_>, _>>()?;
                set(target, values);
                Ok(())
            }),
        };
        self.fields.push(Field::new(name.into(), spec, slot));
        self
    }

    /// Declare a field of type `V` that can't be assigned
    ///
    /// Loading a fixture with such a field fails with [`Error::NotWritable`][crate::Error::NotWritable].
    pub fn read_only<V: Any>(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        let slot = Slot::ReadOnly(ValueType::of::<V>());
        self.fields.push(Field::new(name.into(), spec, slot));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Field<T>> {
        self.fields.iter()
    }
}

impl<T> std::fmt::Debug for Fields<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.fields.iter()).finish()
    }
}

pub(crate) struct Field<T> {
    pub(crate) name: String,
    pub(crate) spec: FieldSpec,
    pub(crate) slot: Slot<T>,
}

impl<T> Field<T> {
    fn new(name: String, spec: FieldSpec, slot: Slot<T>) -> Self {
        Self { name, spec, slot }
    }

    /// Type of each bound value: the field's own, or its elements' for collections
    pub(crate) fn value_type(&self) -> ValueType {
        match &self.slot {
            Slot::ReadOnly(ty) | Slot::Single { ty, .. } => *ty,
            Slot::Collection { element, .. } => *element,
        }
    }

    /// Check the modifiers against the declared type, before looking at any file
    pub(crate) fn validate(&self) -> crate::Result<()> {
        match (&self.slot, self.spec.multiple) {
            (Slot::ReadOnly(_), _) => {
                return Err(crate::Error::NotWritable {
                    field: self.name.clone(),
                });
            }
            (Slot::Single { ty, .. }, true) => {
                return Err(self.invalid_type(format!(
                    "binding multiple files needs an ordered collection but `{ty}` was declared"
                )));
            }
            (Slot::Collection { element, .. }, false) => {
                return Err(self.invalid_type(format!(
                    "a collection of `{element}` needs `multiple` to bind more than one file"
                )));
            }
            (Slot::Single { .. }, false) | (Slot::Collection { .. }, true) => {}
        }

        if self.spec.inject_path {
            let ty = self.value_type();
            if !(ty.is::<String>() || ty.is::<PathBuf>()) {
                return Err(self.invalid_type(format!(
                    "injected paths need `String` or `PathBuf` but `{ty}` was declared"
                )));
            }
        }

        Ok(())
    }

    fn invalid_type(&self, reason: String) -> crate::Error {
        crate::Error::InvalidFieldType {
            field: self.name.clone(),
            reason,
        }
    }
}

impl<T> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("spec", &self.spec)
            .field("type", &self.value_type().name())
            .finish()
    }
}

/// Type-erased setter of a field
pub(crate) enum Slot<T> {
    ReadOnly(ValueType),
    Single {
        ty: ValueType,
        set: Box<dyn Fn(&mut T, Box<dyn Any>) -> Result<(), Box<dyn Any>>>,
    },
    Collection {
        element: ValueType,
        set: Box<dyn Fn(&mut T, Vec<Box<dyn Any>>) -> Result<(), Box<dyn Any>>>,
    },
}
