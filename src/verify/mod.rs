//! Compare a computed value with an expected file, saving the actual one beside it on failure
//!
//! ```rust,no_run
//! use std::io::Write as _;
//!
//! let actual = "42\n";
//! fixsnap::ContentVerifier::use_directory("tests/answers")
//!     .save_actual_as("answer.actual.txt", |w| w.write_all(actual.as_bytes()))
//!     .read_expected_as("answer.txt", fixsnap::deserialize::text)
//!     .verify(|expected| assert_eq!(expected, actual))
//!     .unwrap();
//! ```

mod failure;

use std::io::{Read, Write};
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

#[cfg(feature = "color")]
use anstream::stderr;
#[cfg(not(feature = "color"))]
use std::io::stderr;

use crate::error::BoxError;

pub use failure::ExpectedFileNotFound;
pub use failure::VerificationFailure;

/// Start verifying against files of `directory`
#[derive(Clone, Debug)]
pub struct ContentVerifier {
    directory: PathBuf,
    palette: crate::report::Palette,
}

impl ContentVerifier {
    pub fn use_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            palette: crate::report::Palette::auto(),
        }
    }

    pub fn palette(mut self, palette: crate::report::Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Name of the actual file and how to write it
    ///
    /// `write` only runs when the actual file has to be saved.
    pub fn save_actual_as<W>(self, name: impl Into<String>, write: W) -> WithActual<W>
    where
        W: FnOnce(&mut dyn Write) -> std::io::Result<()>,
    {
        WithActual {
            verifier: self,
            actual_name: name.into(),
            write,
        }
    }
}

/// [`ContentVerifier`] knowing its actual file
pub struct WithActual<W> {
    verifier: ContentVerifier,
    actual_name: String,
    write: W,
}

impl<W> WithActual<W>
where
    W: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    /// Name of the expected file and how to read it
    pub fn read_expected_as<R, E, X>(self, name: impl Into<String>, read: R) -> WithExpected<W, R>
    where
        R: FnOnce(&mut dyn Read) -> Result<E, X>,
        X: Into<BoxError>,
    {
        WithExpected {
            verifier: self.verifier,
            actual_name: self.actual_name,
            write: self.write,
            expected_name: name.into(),
            read,
        }
    }
}

/// [`ContentVerifier`] ready to compare
pub struct WithExpected<W, R> {
    verifier: ContentVerifier,
    actual_name: String,
    write: W,
    expected_name: String,
    read: R,
}

impl<W, R> WithExpected<W, R>
where
    W: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    /// Run a panicking `assertion` on the expected content
    ///
    /// When it panics, the actual file is saved and the panic continues unchanged.
    /// When it passes, the actual file is left alone.
    pub fn verify<E, X>(self, assertion: impl FnOnce(E)) -> crate::Result<()>
    where
        R: FnOnce(&mut dyn Read) -> Result<E, X>,
        X: Into<BoxError>,
    {
        let (expected, pending) = self.load()?;
        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| assertion(expected))) {
            let palette = pending.palette;
            match pending.save() {
                Ok(saved) => {
                    let mut hint = String::new();
                    let _ = failure::write_commands(
                        &mut hint,
                        &saved.directory,
                        &saved.actual_path,
                        &saved.expected_path,
                    );
                    let _ = writeln!(
                        stderr(),
                        "{}: actual file saved to {}\n\n{}",
                        palette.error("Verification failed"),
                        saved.actual_path.display(),
                        palette.hint(hint)
                    );
                }
                Err(err) => {
                    let _ = writeln!(
                        stderr(),
                        "{}: {}",
                        palette.error("Verification failed"),
                        err
                    );
                }
            }
            resume_unwind(payload);
        }
        Ok(())
    }

    /// Run a fallible `assertion` on the expected content
    ///
    /// When it returns `Err`, the actual file is saved and
    /// [`Error::VerificationFailed`][crate::Error::VerificationFailed] is returned.
    pub fn try_verify<E, X, A>(
        self,
        assertion: impl FnOnce(E) -> Result<(), A>,
    ) -> crate::Result<()>
    where
        R: FnOnce(&mut dyn Read) -> Result<E, X>,
        X: Into<BoxError>,
        A: Into<BoxError>,
    {
        let (expected, pending) = self.load()?;
        match assertion(expected) {
            Ok(()) => Ok(()),
            Err(err) => {
                let saved = pending.save()?;
                Err(crate::Error::VerificationFailed(Box::new(
                    VerificationFailure::new(
                        err.into(),
                        saved.directory,
                        saved.expected_path,
                        saved.actual_path,
                    ),
                )))
            }
        }
    }

    fn load<E, X>(self) -> crate::Result<(E, PendingActual<W>)>
    where
        R: FnOnce(&mut dyn Read) -> Result<E, X>,
        X: Into<BoxError>,
    {
        let directory = self.verifier.directory;
        if !directory.is_dir() {
            return Err(crate::Error::DirectoryNotFound(directory));
        }
        let expected_path = directory.join(&self.expected_name);
        let pending = PendingActual {
            actual_path: directory.join(&self.actual_name),
            expected_path,
            directory,
            palette: self.verifier.palette,
            write: self.write,
        };

        if !pending.expected_path.exists() {
            let saved = pending.save()?;
            return Err(crate::Error::ExpectedFileNotFound(Box::new(
                ExpectedFileNotFound::new(saved.expected_path, saved.actual_path),
            )));
        }

        let path = &pending.expected_path;
        let mut file =
            std::fs::File::open(path).map_err(|e| crate::Error::io("open", path, e))?;
        let stream: &mut dyn Read = &mut file;
        let expected = (self.read)(stream).map_err(|e| crate::Error::Deserialize {
            path: path.clone(),
            source: e.into(),
        })?;
        Ok((expected, pending))
    }
}

/// Actual file waiting to be written if verification fails
struct PendingActual<W> {
    directory: PathBuf,
    expected_path: PathBuf,
    actual_path: PathBuf,
    palette: crate::report::Palette,
    write: W,
}

struct SavedActual {
    directory: PathBuf,
    expected_path: PathBuf,
    actual_path: PathBuf,
}

impl<W> PendingActual<W>
where
    W: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    /// Replace any previous actual file
    fn save(self) -> crate::Result<SavedActual> {
        let Self {
            directory,
            expected_path,
            actual_path,
            write,
            ..
        } = self;
        crate::debug!("Saving actual file {}", actual_path.display());
        write_file(&actual_path, write)?;
        Ok(SavedActual {
            directory,
            expected_path,
            actual_path,
        })
    }
}

fn write_file(
    path: &Path,
    write: impl FnOnce(&mut dyn Write) -> std::io::Result<()>,
) -> crate::Result<()> {
    let file = std::fs::File::create(path).map_err(|e| crate::Error::io("create", path, e))?;
    let mut writer = std::io::BufWriter::new(file);
    let stream: &mut dyn Write = &mut writer;
    write(stream).map_err(|e| crate::Error::io("write", path, e))?;
    writer
        .flush()
        .map_err(|e| crate::Error::io("write", path, e))
}
