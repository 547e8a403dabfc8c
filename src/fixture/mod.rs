//! Bind the files of a directory to the fields of a typed fixture
//!
//! # Examples
//!
//! ```rust,no_run
//! use fixsnap::fixture::{FieldSpec, Fields, FixtureContent, FixtureLoader};
//!
//! #[derive(Default)]
//! struct Case {
//!     input: String,
//!     settings: Option<String>,
//! }
//!
//! impl FixtureContent for Case {
//!     fn fields() -> Fields<Self> {
//!         Fields::new()
//!             .bind("input", FieldSpec::new("input.txt|*.in"), |c: &mut Self, v: String| {
//!                 c.input = v
//!             })
//!             .bind(
//!                 "settings",
//!                 FieldSpec::new("settings.toml").optional().global(),
//!                 |c: &mut Self, v: String| c.settings = Some(v),
//!             )
//!     }
//! }
//!
//! let case = FixtureLoader::<Case>::new()
//!     .with_deserializer(fixsnap::deserialize::text)
//!     .load_from_dir("tests/fixtures/simple")
//!     .unwrap();
//! assert!(!case.input.is_empty());
//! ```

mod field;
mod loader;

pub use field::FieldSpec;
pub use field::Fields;
pub use field::FixtureContent;
pub use loader::fixture_loader;
pub use loader::FixtureLoader;
pub use loader::Stream;

/// A loaded fixture along with the streams it opened
///
/// Dereferences to the bound content. Streams stay open until [`Fixture::dispose`] or drop.
pub struct Fixture<T> {
    content: T,
    resources: Vec<Stream>,
}

impl<T> Fixture<T> {
    pub(crate) fn new(content: T) -> Self {
        Self {
            content,
            resources: Vec::new(),
        }
    }

    /// Take ownership of `stream`, handing it back for reading
    pub(crate) fn track(&mut self, stream: Stream) -> &mut Stream {
        self.resources.push(stream);
        let last = self.resources.len() - 1;
        &mut self.resources[last]
    }

    /// Number of streams held open
    pub fn open_resources(&self) -> usize {
        self.resources.len()
    }

    /// Release every stream, keeping the content
    pub fn dispose(self) -> T {
        let Self {
            content,
            mut resources,
        } = self;
        release(&mut resources);
        content
    }
}

fn release(resources: &mut Vec<Stream>) {
    crate::debug!("Releasing {} stream(s)", resources.len());
    resources.clear();
}

impl<T> std::ops::Deref for Fixture<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.content
    }
}

impl<T> std::ops::DerefMut for Fixture<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.content
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Fixture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fixture")
            .field("content", &self.content)
            .field("open_resources", &self.resources.len())
            .finish()
    }
}
