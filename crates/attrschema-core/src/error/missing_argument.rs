use super::Error;

/// Error when a required argument or setting was not supplied.
///
/// This occurs when:
/// - A required generation option is explicitly `null`
/// - A model definition omits an attribute's type
#[derive(Debug)]
pub(super) struct MissingArgumentError {
    name: Box<str>,
}

impl std::error::Error for MissingArgumentError {}

impl core::fmt::Display for MissingArgumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "missing argument: {}", self.name)
    }
}

impl Error {
    /// Creates a missing argument error for the setting called `name`.
    pub fn missing_argument(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingArgument(MissingArgumentError {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a missing
    /// argument error.
    pub fn is_missing_argument(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MissingArgument(_)))
    }
}
