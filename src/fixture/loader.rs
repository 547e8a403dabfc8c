use std::any::Any;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::field::{Field, Fields, FixtureContent, Slot};
use super::Fixture;
use crate::error::BoxError;
use crate::registry::DeserializerRegistry;

/// Open stream over a fixture file, owned by the [`Fixture`]
pub type Stream = Box<dyn Read>;

type Opener = Box<dyn Fn(&Path) -> std::io::Result<Stream>>;

/// Load fixtures of type `T`, see [`FixtureLoader`]
pub fn fixture_loader<T: FixtureContent>() -> FixtureLoader<T> {
    FixtureLoader::new()
}

/// Populate a [`FixtureContent`] from the files of a directory
///
/// Fields are loaded in declaration order. A failure at any field releases every stream opened
/// so far before the error is returned. One loader can load any number of directories.
pub struct FixtureLoader<T> {
    fields: Fields<T>,
    registry: DeserializerRegistry,
    opener: Opener,
}

impl<T: FixtureContent> FixtureLoader<T> {
    pub fn new() -> Self {
        Self {
            fields: T::fields(),
            registry: DeserializerRegistry::new(),
            opener: Box::new(open_file),
        }
    }

    /// Produce values of type `V` from a file's stream
    ///
    /// Registering another deserializer for the same `V` replaces this one.
    pub fn with_deserializer<V, E, F>(mut self, deserializer: F) -> Self
    where
        V: Any,
        E: Into<BoxError>,
        F: Fn(&mut dyn Read) -> Result<V, E> + 'static,
    {
        self.registry.register(deserializer);
        self
    }

    /// Override how fixture files are opened
    ///
    /// The default opens the file read-only.
    pub fn with_opener<F>(mut self, opener: F) -> Self
    where
        F: Fn(&Path) -> std::io::Result<Stream> + 'static,
    {
        self.opener = Box::new(opener);
        self
    }

    pub fn deserializers(&self) -> &DeserializerRegistry {
        &self.registry
    }

    pub fn load_from_dir(&self, directory: impl AsRef<Path>) -> crate::Result<Fixture<T>> {
        let directory = directory.as_ref();
        crate::debug!("Loading {} fields from {}", self.fields.len(), directory.display());
        let mut fixture = Fixture::new(T::default());
        match self.populate(&mut fixture, directory) {
            Ok(()) => Ok(fixture),
            Err(err) => {
                crate::debug!("Failed to load {}: {}", directory.display(), err);
                fixture.dispose();
                Err(err)
            }
        }
    }

    fn populate(&self, fixture: &mut Fixture<T>, directory: &Path) -> crate::Result<()> {
        for field in self.fields.iter() {
            field.validate()?;
            let paths = crate::path::find_paths(
                directory,
                field.spec.template(),
                field.spec.is_global(),
            )?;
            if paths.is_empty() {
                if field.spec.is_optional() {
                    crate::debug!("Keeping `{}`, nothing matched", field.name);
                    continue;
                }
                return Err(crate::Error::FileNotFound {
                    field: field.name.clone(),
                    template: field.spec.template().to_owned(),
                    directory: directory.to_owned(),
                });
            }

            match &field.slot {
                Slot::Single { set, .. } => {
                    let value = self.produce(fixture, field, &paths[0])?;
                    set(&mut fixture.content, value).map_err(|_| unexpected_value(field))?;
                }
                Slot::Collection { set, .. } => {
                    let values = paths
                        .iter()
                        .map(|path| self.produce(fixture, field, path))
                        .collect::<crate::Result<Vec<_>>>()?;
                    set(&mut fixture.content, values).map_err(|_| unexpected_value(field))?;
                }
                Slot::ReadOnly(_) => unreachable!("Rejected by validation"),
            }
        }
        Ok(())
    }

    fn produce(
        &self,
        fixture: &mut Fixture<T>,
        field: &Field<T>,
        path: &Path,
    ) -> crate::Result<Box<dyn Any>> {
        let ty = field.value_type();
        if field.spec.is_inject_path() {
            let value: Box<dyn Any> = if ty.is::<PathBuf>() {
                Box::new(path.to_owned())
            } else {
                Box::new(path.to_string_lossy().into_owned())
            };
            return Ok(value);
        }

        let stream = (self.opener)(path).map_err(|e| crate::Error::io("open", path, e))?;
        let stream = fixture.track(stream);
        let deserializer = self.registry.resolve(ty, &field.name)?;
        deserializer(&mut **stream).map_err(|source| crate::Error::Deserialize {
            path: path.to_owned(),
            source,
        })
    }
}

impl<T> std::fmt::Debug for FixtureLoader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureLoader")
            .field("fields", &self.fields)
            .field("deserializers", &self.registry)
            .finish()
    }
}

fn open_file(path: &Path) -> std::io::Result<Stream> {
    let file = std::fs::File::open(path)?;
    Ok(Box::new(file))
}

fn unexpected_value<T>(field: &Field<T>) -> crate::Error {
    crate::Error::InvalidFieldType {
        field: field.name.clone(),
        reason: format!("produced value is not a `{}`", field.value_type()),
    }
}
