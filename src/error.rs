use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error returned by caller-supplied deserializers and assertions
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures raised while loading fixtures or verifying snapshots
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required fixture file did not match any file
    #[error("Not found file marked as required with template `{template}` for field `{field}` in {}", .directory.display())]
    FileNotFound {
        field: String,
        template: String,
        directory: PathBuf,
    },
    /// No deserializer is registered for the declared value type
    #[error("Can't deserialize field `{field}` with type `{type_name}`, use `FixtureLoader::with_deserializer` to register one")]
    DeserializerMissing {
        field: String,
        type_name: &'static str,
    },
    /// A field modifier does not fit the field's declared type
    #[error("Field `{field}` has an invalid type: {reason}")]
    InvalidFieldType { field: String, reason: String },
    /// A bound field was declared without a setter
    #[error("Field `{field}` should have a setter")]
    NotWritable { field: String },
    /// One of the `|`-separated alternatives is not a valid glob
    #[error("Invalid file template `{template}`: {source}")]
    InvalidTemplate {
        template: String,
        #[source]
        source: glob::PatternError,
    },
    /// A caller-supplied deserializer failed
    #[error("Failed to deserialize {}: {source}", .path.display())]
    Deserialize {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    #[error("{0}")]
    SnapshotMismatch(Box<crate::snapshot::SnapshotMismatch>),
    #[error("{0}")]
    ExpectedFileNotFound(Box<crate::verify::ExpectedFileNotFound>),
    #[error("{0}")]
    VerificationFailed(Box<crate::verify::VerificationFailure>),
    #[error("Directory {} not found", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("Can't find `{marker}` directory in {} or any of its ancestors", .base.display())]
    SnapshotDirectoryNotFound { marker: String, base: PathBuf },
    #[error("Index {index} is out of range for text of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Whether the failure is a content difference rather than a broken environment
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            Self::SnapshotMismatch(_) | Self::ExpectedFileNotFound(_) | Self::VerificationFailed(_)
        )
    }

    #[track_caller]
    pub fn panic(self) -> ! {
        panic!("{self}")
    }
}
