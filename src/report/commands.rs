//! Shell commands suggested in failure messages
//!
//! They are only rendered, never run.

use std::path::Path;

pub fn view_diff(left: &Path, right: &Path) -> String {
    format!("<view diff> diff \"{}\" \"{}\"", left.display(), right.display())
}

pub fn view_directory(directory: &Path) -> String {
    if cfg!(windows) {
        format!("<view directory> dir \"{}\"", directory.display())
    } else {
        format!("<view directory> ls \"{}\"", directory.display())
    }
}

/// Replace `expected` with `actual`
pub fn accept_diff(actual: &Path, expected: &Path) -> String {
    if cfg!(windows) {
        format!(
            "<accept diff> move /Y \"{}\" \"{}\"",
            actual.display(),
            expected.display()
        )
    } else {
        format!(
            "<accept diff> mv -f \"{}\" \"{}\"",
            actual.display(),
            expected.display()
        )
    }
}

/// Move every mismatch over its snapshot, then drop the mismatch directory
pub fn accept_all_diffs(mismatch_dir: &Path, snapshot_dir: &Path) -> String {
    if cfg!(windows) {
        format!(
            "<accept ALL diffs> move /Y \"{mismatch}\\*\" \"{snapshot}\" & rmdir /S /Q \"{mismatch}\"",
            mismatch = mismatch_dir.display(),
            snapshot = snapshot_dir.display()
        )
    } else {
        format!(
            "<accept ALL diffs> mv -f \"{mismatch}\"/* \"{snapshot}\" && rmdir \"{mismatch}\"",
            mismatch = mismatch_dir.display(),
            snapshot = snapshot_dir.display()
        )
    }
}
