use super::Error;

/// Error when an output strategy returns a fragment that breaks a structural
/// postcondition.
///
/// The `method` names the strategy operation whose result was rejected.
#[derive(Debug)]
pub(super) struct StrategyContractError {
    method: &'static str,
    message: Box<str>,
}

impl std::error::Error for StrategyContractError {}

impl core::fmt::Display for StrategyContractError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "strategy contract violated by {}(): {}",
            self.method, self.message
        )
    }
}

impl Error {
    /// Creates a strategy contract error for the strategy operation `method`.
    pub fn strategy_contract(method: &'static str, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::StrategyContract(StrategyContractError {
            method,
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a strategy
    /// contract error.
    pub fn is_strategy_contract(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::StrategyContract(_)))
    }
}
