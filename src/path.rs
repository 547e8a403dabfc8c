//! Locate fixture files from `|`-separated glob templates

use std::path::{Path, PathBuf};

/// Separates alternatives within a template, in priority order
pub const TEMPLATE_SEPARATOR: char = '|';

/// Find the files matching `template` in `directory`
///
/// With `global`, the search moves to the parent directory whenever a level has no match,
/// stopping at the first level with any match.
///
/// ```rust,no_run
/// let paths = fixsnap::path::find_paths("tests/fixtures/help", "input.txt|*.in", false).unwrap();
/// ```
pub fn find_paths(
    directory: impl AsRef<Path>,
    template: &str,
    global: bool,
) -> crate::Result<Vec<PathBuf>> {
    let template = FileTemplate::parse(template)?;
    if global {
        template.find_upward(directory)
    } else {
        template.find_in(directory)
    }
}

/// Parsed file template
///
/// Each alternative is matched against the names of a directory's files, never recursing.
/// Wildcards `*` and `?` are supported, every other character matches itself.
#[derive(Clone, Debug)]
pub struct FileTemplate {
    raw: String,
    patterns: Vec<glob::Pattern>,
}

impl FileTemplate {
    pub fn parse(template: &str) -> crate::Result<Self> {
        let patterns = template
            .split(TEMPLATE_SEPARATOR)
            .map(|segment| glob::Pattern::new(&wildcards_only(segment)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| crate::Error::InvalidTemplate {
                template: template.to_owned(),
                source,
            })?;
        Ok(Self {
            raw: template.to_owned(),
            patterns,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches in `directory` alone
    ///
    /// All matches of the first alternative come first, then those of the second, and so on.
    /// Within one alternative, files are listed in the order the file system enumerates them.
    pub fn find_in(&self, directory: impl AsRef<Path>) -> crate::Result<Vec<PathBuf>> {
        let directory = resolve_dir(directory.as_ref())?;
        let names = file_names(&directory)?;
        Ok(self.select(&directory, &names))
    }

    /// Matches in the closest of `directory` and its ancestors having any
    pub fn find_upward(&self, directory: impl AsRef<Path>) -> crate::Result<Vec<PathBuf>> {
        let directory = resolve_dir(directory.as_ref())?;
        for current in directory.ancestors() {
            let names = match file_names(current) {
                Ok(names) => names,
                Err(err) if current == directory.as_path() => return Err(err),
                Err(_err) => {
                    crate::debug!("Skipping {}: {}", current.display(), _err);
                    continue;
                }
            };
            let found = self.select(current, &names);
            if !found.is_empty() {
                crate::debug!(
                    "Found {} match(es) for `{}` in {}",
                    found.len(),
                    self.raw,
                    current.display()
                );
                return Ok(found);
            }
        }
        Ok(Vec::new())
    }

    fn select(&self, directory: &Path, names: &[String]) -> Vec<PathBuf> {
        let options = glob::MatchOptions {
            case_sensitive: !cfg!(windows),
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.patterns
            .iter()
            .flat_map(move |pattern| {
                names
                    .iter()
                    .filter(move |name| pattern.matches_with(name.as_str(), options))
                    .map(move |name| directory.join(name))
            })
            .collect()
    }
}

impl std::str::FromStr for FileTemplate {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for FileTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.raw.fmt(f)
    }
}

/// Glob source where `*` and `?` are the only wildcards, every other character is literal
fn wildcards_only(segment: &str) -> String {
    let mut pattern = String::with_capacity(segment.len());
    let mut literal = String::new();
    for c in segment.chars() {
        match c {
            '*' | '?' => {
                pattern.push_str(&glob::Pattern::escape(&literal));
                literal.clear();
                // `**` has a meaning of its own in glob, a run of `*` matches like one
                if !(c == '*' && pattern.ends_with('*')) {
                    pattern.push(c);
                }
            }
            _ => literal.push(c),
        }
    }
    pattern.push_str(&glob::Pattern::escape(&literal));
    pattern
}

/// Names of the regular files (or links to them) directly inside `directory`
fn file_names(directory: &Path) -> crate::Result<Vec<String>> {
    let entries =
        std::fs::read_dir(directory).map_err(|e| crate::Error::io("read", directory, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| crate::Error::io("read", directory, e))?;
        if !entry.path().is_file() {
            continue;
        }
        // Templates are text, so names that aren't can never match
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}

/// Absolute form of an existing directory
pub(crate) fn resolve_dir(directory: &Path) -> crate::Result<PathBuf> {
    if !directory.is_dir() {
        return Err(crate::Error::DirectoryNotFound(directory.to_owned()));
    }
    canonicalize(directory)
}

pub(crate) fn canonicalize(path: &Path) -> crate::Result<PathBuf> {
    dunce::canonicalize(path).map_err(|e| crate::Error::io("canonicalize", path, e))
}

#[cfg(test)]
mod test {
    use super::*;

    fn write_files(root: &Path, files: &[&str]) {
        for file in files {
            std::fs::write(root.join(file), file).unwrap();
        }
    }

    fn expected_paths(root: &Path, files: &[&str]) -> Vec<PathBuf> {
        let root = canonicalize(root).unwrap();
        files.iter().map(|f| root.join(f)).collect()
    }

    #[test]
    fn find_in_directory() {
        let cases: &[(&str, &[&str], &[&str])] = &[
            ("*a.txt", &["a.txt"], &["a.txt"]),
            ("*", &["a.txt"], &["a.txt"]),
            ("a.txt|*b.txt", &["bbb.txt"], &["bbb.txt"]),
            ("a.txt|*b.txt", &["a.txt", "bbb.txt"], &["a.txt", "bbb.txt"]),
            ("*b.txt|a.txt", &["a.txt", "bbb.txt"], &["bbb.txt", "a.txt"]),
            ("a.?|c.?", &["a.a", "b.b", "c.c"], &["a.a", "c.c"]),
            ("a.*", &["b.b", "ac.a"], &[]),
        ];
        for (template, files, expected) in cases {
            let temp = tempfile::tempdir().unwrap();
            write_files(temp.path(), files);

            let actual = find_paths(temp.path(), template, false).unwrap();
            assert_eq!(actual, expected_paths(temp.path(), expected), "{template}");
        }
    }

    #[test]
    fn segments_keep_priority_order() {
        let temp = tempfile::tempdir().unwrap();
        write_files(temp.path(), &["b.b", "a.a", "b.a"]);

        let actual = find_paths(temp.path(), "a.*|b.*", false).unwrap();
        assert_eq!(actual.len(), 3);
        assert_eq!(actual[0], expected_paths(temp.path(), &["a.a"])[0]);
        let mut rest = actual[1..].to_vec();
        rest.sort();
        assert_eq!(rest, expected_paths(temp.path(), &["b.a", "b.b"]));
    }

    #[test]
    fn duplicate_alternatives_are_kept() {
        let temp = tempfile::tempdir().unwrap();
        write_files(temp.path(), &["a.txt"]);

        let actual = find_paths(temp.path(), "a.txt|*.txt", false).unwrap();
        assert_eq!(actual, expected_paths(temp.path(), &["a.txt", "a.txt"]));
    }

    #[test]
    fn directories_are_not_matched() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp.path().join("nested.txt")).unwrap();
        std::fs::write(temp.path().join("nested").with_extension("md"), "").unwrap();

        let actual = find_paths(temp.path(), "*.txt", false).unwrap();
        assert!(actual.is_empty(), "{actual:?}");
    }

    #[test]
    fn returned_paths_are_absolute() {
        let temp = tempfile::tempdir().unwrap();
        write_files(temp.path(), &["a.txt"]);
        let relative = temp.path().join(".");

        let actual = find_paths(&relative, "a.txt", false).unwrap();
        assert_eq!(actual.len(), 1);
        assert!(actual[0].is_absolute());
        assert!(actual[0].exists());
    }

    #[test]
    fn global_finds_in_current_directory() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        write_files(temp.path(), &["file.txt"]);
        write_files(&nested, &["file.txt"]);

        let actual = find_paths(&nested, "file.txt", true).unwrap();
        assert_eq!(actual, expected_paths(&nested, &["file.txt"]));
    }

    #[test]
    fn global_finds_in_distant_ancestor() {
        let temp = tempfile::tempdir().unwrap();
        let mut current = temp.path().to_owned();
        for i in 0..20 {
            current.push(format!("dir_{i}"));
        }
        std::fs::create_dir_all(&current).unwrap();
        write_files(temp.path(), &["ancestor-file.txt"]);

        let actual = find_paths(&current, "ancestor-file.txt", true).unwrap();
        assert_eq!(actual, expected_paths(temp.path(), &["ancestor-file.txt"]));
    }

    #[test]
    fn global_stops_at_first_level_with_matches() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        write_files(temp.path(), &["a.txt"]);
        write_files(&nested, &["b.txt"]);

        let actual = find_paths(&nested, "a.txt|b.txt", true).unwrap();
        assert_eq!(actual, expected_paths(&nested, &["b.txt"]));
    }

    #[test]
    fn global_without_matches_is_empty() {
        let temp = tempfile::tempdir().unwrap();

        let actual = find_paths(
            temp.path(),
            "fixsnap-this-file-should-never-exist-9f1c2e.txt",
            true,
        )
        .unwrap();
        assert!(actual.is_empty(), "{actual:?}");
    }

    #[test]
    fn missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("missing");

        let err = find_paths(&missing, "*", false).unwrap_err();
        assert!(matches!(err, crate::Error::DirectoryNotFound(_)), "{err}");
    }

    #[test]
    fn brackets_are_literal() {
        let temp = tempfile::tempdir().unwrap();
        write_files(temp.path(), &["a[1].txt", "a1.txt", "report[.txt", "x!y].txt"]);

        let actual = find_paths(temp.path(), "a[1].txt", false).unwrap();
        assert_eq!(actual, expected_paths(temp.path(), &["a[1].txt"]));

        let actual = find_paths(temp.path(), "report[.txt|x!y].txt", false).unwrap();
        assert_eq!(actual, expected_paths(temp.path(), &["report[.txt", "x!y].txt"]));

        let actual = find_paths(temp.path(), "a[!x]*.txt", false).unwrap();
        assert!(actual.is_empty(), "{actual:?}");
    }

    #[test]
    fn wildcards_around_literals() {
        let temp = tempfile::tempdir().unwrap();
        write_files(temp.path(), &["a[1].txt", "a1.txt"]);

        let actual = find_paths(temp.path(), "a[?].*", false).unwrap();
        assert_eq!(actual, expected_paths(temp.path(), &["a[1].txt"]));

        let mut actual = find_paths(temp.path(), "a**.txt", false).unwrap();
        actual.sort();
        assert_eq!(actual, expected_paths(temp.path(), &["a1.txt", "a[1].txt"]));
    }

    #[test]
    fn template_keeps_wildcards_only() {
        assert_eq!(wildcards_only("plain.txt"), "plain.txt");
        assert_eq!(wildcards_only("*.in"), "*.in");
        assert_eq!(wildcards_only("a[1]?.txt"), "a[[]1[]]?.txt");
        assert_eq!(wildcards_only("**x***"), "*x*");
    }
}
