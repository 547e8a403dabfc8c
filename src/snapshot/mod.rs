//! Golden-file snapshots keyed by the calling test
//!
//! A snapshot lives at `__snapshots__/<group>/<case>.snap`. While the latest comparison of a case
//! fails, its actual value is kept at `__snapshots__/<group>/__mismatch__/<case>.snap`.
//!
//! ```rust,no_run
//! fixsnap::assert_snapshot!(format!("{:?}", vec![1, 2, 3]));
//! ```

mod key;
mod mismatch;

use std::io::Write as _;
use std::path::{Path, PathBuf};

#[cfg(feature = "color")]
use anstream::stderr;
#[cfg(not(feature = "color"))]
use std::io::stderr;

use crate::utils::{first_diff_index, normalize_lines};
use crate::Action;

pub use key::SnapshotKey;
pub use mismatch::SnapshotMismatch;

/// Directory holding every snapshot, searched for upward by [`Snapshots::discover`]
pub const SNAPSHOT_DIR: &str = "__snapshots__";
/// Directory, inside a group, holding the actual values of failing cases
pub const MISMATCH_DIR: &str = "__mismatch__";
pub const SNAPSHOT_EXTENSION: &str = "snap";

/// Compare text against recorded snapshots
#[derive(Clone, Debug)]
pub struct Snapshots {
    root: PathBuf,
    action: Action,
    action_var: Option<String>,
    palette: crate::report::Palette,
}

impl Snapshots {
    /// Use the closest [`SNAPSHOT_DIR`] in `base` or its ancestors
    pub fn discover(base: impl AsRef<Path>) -> crate::Result<Self> {
        let base = base.as_ref();
        for ancestor in base.ancestors() {
            let candidate = ancestor.join(SNAPSHOT_DIR);
            if candidate.is_dir() {
                crate::debug!("Using snapshots in {}", candidate.display());
                return Ok(Self::at(crate::path::canonicalize(&candidate)?));
            }
        }
        Err(crate::Error::SnapshotDirectoryNotFound {
            marker: SNAPSHOT_DIR.to_owned(),
            base: base.to_owned(),
        })
    }

    /// Use `root` as the snapshot directory
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            action: Action::Verify,
            action_var: None,
            palette: crate::report::Palette::auto(),
        }
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Override the action from `var_name` when it is set
    pub fn action_env(mut self, var_name: &str) -> Self {
        let action = Action::with_env_var(var_name);
        self.action = action.unwrap_or(self.action);
        self.action_var = Some(var_name.to_owned());
        self
    }

    pub fn palette(mut self, palette: crate::report::Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self, key: &SnapshotKey) -> PathBuf {
        self.root.join(key.group()).join(file_name(key))
    }

    pub fn mismatch_path(&self, key: &SnapshotKey) -> PathBuf {
        self.root
            .join(key.group())
            .join(MISMATCH_DIR)
            .join(file_name(key))
    }

    /// Compare `actual` with the snapshot of `key`
    ///
    /// A missing snapshot is recorded as empty first. Line endings of both sides are normalized.
    /// On a match, any leftover mismatch file of the case is removed, along with the mismatch
    /// directory once it is empty.
    pub fn check(&self, key: &SnapshotKey, actual: &str) -> crate::Result<()> {
        if self.action == Action::Skip {
            return Ok(());
        }
        if !self.root.is_dir() {
            return Err(crate::Error::DirectoryNotFound(self.root.clone()));
        }

        let group_dir = self.root.join(key.group());
        std::fs::create_dir_all(&group_dir)
            .map_err(|e| crate::Error::io("create", &group_dir, e))?;
        let snapshot_path = self.snapshot_path(key);
        if !snapshot_path.exists() {
            crate::debug!("Recording empty snapshot {}", snapshot_path.display());
            std::fs::write(&snapshot_path, "")
                .map_err(|e| crate::Error::io("create", &snapshot_path, e))?;
        }
        let expected = std::fs::read_to_string(&snapshot_path)
            .map_err(|e| crate::Error::io("read", &snapshot_path, e))?;

        let expected = normalize_lines(&expected);
        let actual = normalize_lines(actual);
        let mismatch_path = self.mismatch_path(key);
        let Some(index) = first_diff_index(&expected, &actual) else {
            return clear_mismatch(&mismatch_path);
        };

        if self.action == Action::Overwrite {
            std::fs::write(&snapshot_path, &actual)
                .map_err(|e| crate::Error::io("write", &snapshot_path, e))?;
            clear_mismatch(&mismatch_path)?;
            let _ = writeln!(
                stderr(),
                "{}: {}",
                self.palette.warn("Overwrote snapshot"),
                snapshot_path.display()
            );
            return Ok(());
        }

        write_mismatch(&mismatch_path, &actual)?;
        let mismatch =
            SnapshotMismatch::new(expected, actual, index, snapshot_path, mismatch_path);
        match self.action {
            Action::Ignore => {
                let _ = writeln!(
                    stderr(),
                    "{}: {}",
                    self.palette.warn("Ignoring failure"),
                    mismatch
                );
                Ok(())
            }
            _ => {
                if let Some(var) = self.action_var.as_deref() {
                    let _ = writeln!(
                        stderr(),
                        "{}",
                        self.palette.hint(format!("Update with {var}=overwrite"))
                    );
                }
                Err(crate::Error::SnapshotMismatch(Box::new(mismatch)))
            }
        }
    }

    /// Like [`Snapshots::check`], panicking on any failure
    #[track_caller]
    pub fn assert(&self, key: &SnapshotKey, actual: &str) {
        if let Err(err) = self.check(key, actual) {
            err.panic();
        }
    }
}

fn file_name(key: &SnapshotKey) -> String {
    format!("{}.{}", key.case(), SNAPSHOT_EXTENSION)
}

fn write_mismatch(path: &Path, actual: &str) -> crate::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| crate::Error::io("create", dir, e))?;
    }
    crate::debug!("Recording mismatch {}", path.display());
    std::fs::write(path, actual).map_err(|e| crate::Error::io("write", path, e))
}

fn clear_mismatch(path: &Path) -> crate::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            crate::debug!("Removed mismatch {}", path.display());
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(crate::Error::io("remove", path, e)),
    }

    let Some(dir) = path.parent() else {
        return Ok(());
    };
    let mut entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(crate::Error::io("read", dir, e)),
    };
    if entries.next().is_none() {
        std::fs::remove_dir(dir).map_err(|e| crate::Error::io("remove", dir, e))?;
    }
    Ok(())
}

/// Key of the enclosing function, see [`SnapshotKey::from_fn_path`]
#[macro_export]
macro_rules! snapshot_key {
    () => {
        $crate::SnapshotKey::from_fn_path($crate::fn_path!())
    };
}

/// Compare `actual` with the snapshot of the enclosing test
///
/// Snapshots are searched for upward from the package's manifest directory. The action can be
/// changed through [`DEFAULT_ACTION_ENV`][crate::DEFAULT_ACTION_ENV], e.g. `SNAPSHOTS=overwrite`.
///
/// # Panics
///
/// On mismatch, or when no snapshot directory is found.
#[macro_export]
macro_rules! assert_snapshot {
    ($actual:expr $(,)?) => {{
        let key = $crate::snapshot_key!();
        match $crate::Snapshots::discover(::std::env!("CARGO_MANIFEST_DIR")) {
            Ok(snapshots) => snapshots
                .action_env($crate::DEFAULT_ACTION_ENV)
                .assert(&key, ::std::convert::AsRef::<str>::as_ref(&$actual)),
            Err(err) => err.panic(),
        }
    }};
}

#[cfg(test)]
mod test {
    use super::*;

    fn snapshots(root: &Path) -> Snapshots {
        Snapshots::at(root).palette(crate::report::Palette::never())
    }

    #[test]
    fn first_run_records_empty_snapshot() {
        let temp = tempfile::tempdir().unwrap();
        let key = SnapshotKey::new("group", "case");
        let snapshots = snapshots(temp.path());

        let err = snapshots.check(&key, "hello").unwrap_err();

        let crate::Error::SnapshotMismatch(mismatch) = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(mismatch.expected(), "");
        assert_eq!(mismatch.actual(), "hello");
        assert_eq!(mismatch.index(), 0);
        let snapshot = temp.path().join("group").join("case.snap");
        let recorded = temp.path().join("group").join(MISMATCH_DIR).join("case.snap");
        assert_eq!(std::fs::read_to_string(snapshot).unwrap(), "");
        assert_eq!(std::fs::read_to_string(recorded).unwrap(), "hello");
    }

    #[test]
    fn empty_actual_matches_new_snapshot() {
        let temp = tempfile::tempdir().unwrap();
        let key = SnapshotKey::new("group", "case");

        snapshots(temp.path()).check(&key, "").unwrap();

        assert!(temp.path().join("group").join("case.snap").exists());
        assert!(!temp.path().join("group").join(MISMATCH_DIR).exists());
    }

    #[test]
    fn match_clears_mismatch() {
        let temp = tempfile::tempdir().unwrap();
        let key = SnapshotKey::new("group", "case");
        let snapshots = snapshots(temp.path());
        snapshots.check(&key, "hello").unwrap_err();
        std::fs::write(snapshots.snapshot_path(&key), "hello").unwrap();

        snapshots.check(&key, "hello").unwrap();

        assert!(!snapshots.mismatch_path(&key).exists());
        assert!(!temp.path().join("group").join(MISMATCH_DIR).exists());
    }

    #[test]
    fn match_keeps_other_mismatches() {
        let temp = tempfile::tempdir().unwrap();
        let passing = SnapshotKey::new("group", "passing");
        let failing = SnapshotKey::new("group", "failing");
        let snapshots = snapshots(temp.path());
        snapshots.check(&passing, "a").unwrap_err();
        snapshots.check(&failing, "b").unwrap_err();
        std::fs::write(snapshots.snapshot_path(&passing), "a").unwrap();

        snapshots.check(&passing, "a").unwrap();

        assert!(!snapshots.mismatch_path(&passing).exists());
        assert!(snapshots.mismatch_path(&failing).exists());
    }

    #[test]
    fn line_endings_are_normalized() {
        let temp = tempfile::tempdir().unwrap();
        let key = SnapshotKey::new("group", "case");
        let snapshots = snapshots(temp.path());
        std::fs::create_dir_all(temp.path().join("group")).unwrap();
        std::fs::write(snapshots.snapshot_path(&key), "a\r\nb\r\n").unwrap();

        snapshots.check(&key, "a\nb\n").unwrap();
    }

    #[test]
    fn overwrite_replaces_snapshot() {
        let temp = tempfile::tempdir().unwrap();
        let key = SnapshotKey::new("group", "case");
        let snapshots = snapshots(temp.path());
        snapshots.check(&key, "old").unwrap_err();

        snapshots
            .clone()
            .action(Action::Overwrite)
            .check(&key, "new")
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(snapshots.snapshot_path(&key)).unwrap(),
            "new"
        );
        assert!(!temp.path().join("group").join(MISMATCH_DIR).exists());
        snapshots.check(&key, "new").unwrap();
    }

    #[test]
    fn ignore_records_without_failing() {
        let temp = tempfile::tempdir().unwrap();
        let key = SnapshotKey::new("group", "case");
        let snapshots = snapshots(temp.path()).action(Action::Ignore);

        snapshots.check(&key, "value").unwrap();

        assert_eq!(
            std::fs::read_to_string(snapshots.mismatch_path(&key)).unwrap(),
            "value"
        );
    }

    #[test]
    fn skip_touches_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let key = SnapshotKey::new("group", "case");

        snapshots(temp.path())
            .action(Action::Skip)
            .check(&key, "value")
            .unwrap();

        assert!(!temp.path().join("group").exists());
    }

    #[test]
    fn missing_root() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("missing");

        let err = snapshots(&root)
            .check(&SnapshotKey::new("group", "case"), "value")
            .unwrap_err();

        assert!(matches!(err, crate::Error::DirectoryNotFound(_)), "{err}");
    }

    #[test]
    fn discover_walks_up() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp.path().join(SNAPSHOT_DIR)).unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let snapshots = Snapshots::discover(&nested).unwrap();

        assert_eq!(
            snapshots.root(),
            dunce::canonicalize(temp.path().join(SNAPSHOT_DIR)).unwrap()
        );
    }
}
