use std::path::{Path, PathBuf};

use crate::error::BoxError;
use crate::report::commands;

/// The expected file is missing; the actual one was saved in its place
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpectedFileNotFound {
    expected_path: PathBuf,
    actual_path: PathBuf,
}

impl ExpectedFileNotFound {
    pub(crate) fn new(expected_path: PathBuf, actual_path: PathBuf) -> Self {
        Self {
            expected_path,
            actual_path,
        }
    }

    pub fn expected_path(&self) -> &Path {
        &self.expected_path
    }

    pub fn actual_path(&self) -> &Path {
        &self.actual_path
    }
}

impl std::fmt::Display for ExpectedFileNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Expected file {} not found, actual file saved to {}",
            self.expected_path.display(),
            self.actual_path.display()
        )?;
        writeln!(f)?;
        writeln!(f, "Available commands:")?;
        writeln!(
            f,
            "{}",
            commands::view_diff(&self.actual_path, &self.expected_path)
        )?;
        writeln!(
            f,
            "{}",
            commands::accept_diff(&self.actual_path, &self.expected_path)
        )
    }
}

/// A fallible assertion rejected the expected content
#[derive(Debug)]
pub struct VerificationFailure {
    source: BoxError,
    directory: PathBuf,
    expected_path: PathBuf,
    actual_path: PathBuf,
}

impl VerificationFailure {
    pub(crate) fn new(
        source: BoxError,
        directory: PathBuf,
        expected_path: PathBuf,
        actual_path: PathBuf,
    ) -> Self {
        Self {
            source,
            directory,
            expected_path,
            actual_path,
        }
    }

    /// What the assertion returned
    pub fn source(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.source
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn expected_path(&self) -> &Path {
        &self.expected_path
    }

    pub fn actual_path(&self) -> &Path {
        &self.actual_path
    }
}

impl std::fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Verification failed:")?;
        writeln!(f, "{}", self.source)?;
        writeln!(f)?;
        write_commands(f, &self.directory, &self.actual_path, &self.expected_path)
    }
}

pub(crate) fn write_commands(
    f: &mut dyn std::fmt::Write,
    directory: &Path,
    actual_path: &Path,
    expected_path: &Path,
) -> std::fmt::Result {
    writeln!(f, "Available commands:")?;
    writeln!(f, "{}", commands::view_directory(directory))?;
    writeln!(f, "{}", commands::view_diff(actual_path, expected_path))?;
    writeln!(f, "{}", commands::accept_diff(actual_path, expected_path))
}
