use std::path::{Path, PathBuf};

use crate::report::commands;
use crate::utils::{window_around, Window};

const PREVIEW_RADIUS: usize = 30;
const LABEL_WIDTH: usize = "Expected: ".len();

/// Snapshot content differs from the recorded one
///
/// The actual value has been written to [`SnapshotMismatch::mismatch_path`] by the time this is
/// returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotMismatch {
    expected: String,
    actual: String,
    index: usize,
    snapshot_path: PathBuf,
    mismatch_path: PathBuf,
}

impl SnapshotMismatch {
    pub(crate) fn new(
        expected: String,
        actual: String,
        index: usize,
        snapshot_path: PathBuf,
        mismatch_path: PathBuf,
    ) -> Self {
        Self {
            expected,
            actual,
            index,
            snapshot_path,
            mismatch_path,
        }
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// Character index of the first difference
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn mismatch_path(&self) -> &Path {
        &self.mismatch_path
    }

    pub fn snapshot_dir(&self) -> &Path {
        self.snapshot_path.parent().unwrap_or(&self.snapshot_path)
    }

    pub fn mismatch_dir(&self) -> &Path {
        self.mismatch_path.parent().unwrap_or(&self.mismatch_path)
    }
}

fn preview(text: &str, index: usize) -> Window {
    if text.is_empty() {
        return Window::default();
    }
    window_around(text, index, PREVIEW_RADIUS).unwrap_or_default()
}

impl std::fmt::Display for SnapshotMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let expected = preview(&self.expected, self.index);
        let actual = preview(&self.actual, self.index);

        writeln!(f, "Snapshot mismatch:")?;
        writeln!(f, "Expected: {}", expected.preview)?;
        writeln!(f, "Actual:   {}", actual.preview)?;
        writeln!(
            f,
            "{:width$}↑ [{}]",
            "",
            self.index,
            width = actual.index + LABEL_WIDTH
        )?;
        writeln!(f)?;
        writeln!(f, "Available commands:")?;
        writeln!(
            f,
            "{}",
            commands::view_diff(&self.mismatch_path, &self.snapshot_path)
        )?;
        writeln!(
            f,
            "{}",
            commands::accept_diff(&self.mismatch_path, &self.snapshot_path)
        )?;
        writeln!(
            f,
            "{}",
            commands::accept_all_diffs(self.mismatch_dir(), self.snapshot_dir())
        )
    }
}
