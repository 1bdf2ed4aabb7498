//! Recoverable engine errors.

use thiserror::Error;

/// Problems with a state table detected at construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("State table is empty. Add at least one state")]
    EmptyStateTable,

    #[error("State '{name}' has index {expected} but was added at position {found}")]
    MisplacedState {
        name: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Errors returned by machine and pool operations.
///
/// None of these leave the machine in a corrupted state; the caller may
/// retry or ignore them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("No free machine slot (capacity {capacity})")]
    Allocation { capacity: usize },

    #[error("State {index} is out of range for a table of {count} states")]
    InvalidState { index: usize, count: usize },

    #[error("Machine slot {index} holds no constructed machine")]
    NotInitialized { index: usize },

    #[error("Machine handle does not refer to a live instance")]
    NullInstance,

    #[error("Operation not allowed from inside a state callback")]
    Reentrant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_into_fsm_error() {
        let error: FsmError = ConfigError::EmptyStateTable.into();
        assert_eq!(error, FsmError::Config(ConfigError::EmptyStateTable));
        assert_eq!(
            error.to_string(),
            "Invalid configuration: State table is empty. Add at least one state"
        );
    }

    #[test]
    fn invalid_state_reports_bounds() {
        let error = FsmError::InvalidState { index: 5, count: 3 };
        assert_eq!(
            error.to_string(),
            "State 5 is out of range for a table of 3 states"
        );
    }
}
