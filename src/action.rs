pub const DEFAULT_ACTION_ENV: &str = "SNAPSHOTS";

/// What to do with a snapshot comparison, see [`Snapshots`][crate::Snapshots]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Action {
    /// Do not compare
    Skip,
    /// Record the mismatch but don't fail
    Ignore,
    /// Fail on mismatch
    #[default]
    Verify,
    /// Accept the actual value as the new snapshot
    Overwrite,
}

impl Action {
    /// Read the action from `var`, `None` when unset or unrecognized
    pub fn with_env_var(var: impl AsRef<std::ffi::OsStr>) -> Option<Self> {
        let var = var.as_ref();
        let value = std::env::var_os(var)?;
        Self::with_env_value(value)
    }

    pub fn with_env_value(value: impl AsRef<std::ffi::OsStr>) -> Option<Self> {
        let value = value.as_ref();
        match value.to_str()? {
            "skip" => Some(Action::Skip),
            "ignore" => Some(Action::Ignore),
            "verify" => Some(Action::Verify),
            "overwrite" => Some(Action::Overwrite),
            _ => None,
        }
    }
}
