/// Identity of one snapshot: a group directory and a case file inside it
///
/// Usually built from the calling test with [`snapshot_key!`][crate::snapshot_key].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    group: String,
    case: String,
}

impl SnapshotKey {
    pub fn new(group: impl Into<String>, case: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            case: case.into(),
        }
    }

    /// Split a function path into its module (the group) and its name (the case)
    ///
    /// ```rust
    /// # use fixsnap::SnapshotKey;
    /// let key = SnapshotKey::from_fn_path("my_crate::parser::tests::parses_empty");
    /// assert_eq!(key.group(), "my_crate__parser__tests");
    /// assert_eq!(key.case(), "parses_empty");
    /// ```
    pub fn from_fn_path(path: &str) -> Self {
        match path.rsplit_once("::") {
            Some((module, name)) => Self::new(module.replace("::", "__"), name),
            None => Self::new("", path),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn case(&self) -> &str {
        &self.case
    }
}

impl std::fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.group, self.case)
    }
}
