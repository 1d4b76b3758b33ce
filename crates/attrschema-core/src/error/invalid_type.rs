use super::Error;

/// Error when a caller-supplied value does not have the expected type.
///
/// This occurs when:
/// - A generation option has the wrong JSON type (`include: "name"`)
/// - Custom metadata is malformed (`examples` not an array, `readOnly` not a
///   boolean, a `schema` override without a string `type`)
/// - A textual type notation cannot be parsed (`STRING(abc)`)
#[derive(Debug)]
pub(super) struct InvalidTypeError {
    name: Box<str>,
    expected: Box<str>,
}

impl std::error::Error for InvalidTypeError {}

impl core::fmt::Display for InvalidTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid type: '{}' is not of type '{}'",
            self.name, self.expected
        )
    }
}

impl Error {
    /// Creates an invalid type error: `name` was expected to be `expected`.
    pub fn invalid_type(name: impl Into<String>, expected: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidType(InvalidTypeError {
            name: name.into().into(),
            expected: expected.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an invalid
    /// type error.
    pub fn is_invalid_type(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidType(_)))
    }
}
