use super::Error;

/// Error when two options that cannot be combined were both set.
#[derive(Debug)]
pub(super) struct MutuallyExclusiveError {
    first: Box<str>,
    second: Box<str>,
}

impl std::error::Error for MutuallyExclusiveError {}

impl core::fmt::Display for MutuallyExclusiveError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "mutually exclusive options: '{}' and '{}'",
            self.first, self.second
        )
    }
}

impl Error {
    /// Creates a mutually exclusive options error.
    ///
    /// Raised for `include` together with `exclude`, `includeAssociations`
    /// together with `excludeAssociations`, and `readOnly` together with
    /// `writeOnly`.
    pub fn mutually_exclusive(first: impl Into<String>, second: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MutuallyExclusive(MutuallyExclusiveError {
            first: first.into().into(),
            second: second.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a mutually
    /// exclusive options error.
    pub fn is_mutually_exclusive(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MutuallyExclusive(_)))
    }
}
