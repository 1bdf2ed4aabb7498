//! Programmer-error conditions and the hook that receives them.

use thiserror::Error;

/// Conditions that indicate a bug in the embedding code or the engine.
///
/// These are not part of the recoverable [`FsmError`](crate::engine::FsmError)
/// contract; they are routed to a [`FatalHandler`] first.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("state index {index} outside table of {count} states")]
    StateOutOfRange { index: usize, count: usize },

    #[error("handle() called from inside a callback of the same machine")]
    ReentrantHandle,

    #[error("reset() called from inside a callback of the same machine")]
    ReentrantReset,
}

/// Assertion hook for [`Violation`]s.
pub trait FatalHandler: Send + Sync {
    fn fatal(&self, violation: &Violation);
}

/// Logs the violation and panics in debug builds.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFatal;

impl FatalHandler for DefaultFatal {
    fn fatal(&self, violation: &Violation) {
        tracing::error!(%violation, "fsm assertion failed");
        if cfg!(debug_assertions) {
            panic!("fsm assertion failed: {violation}");
        }
    }
}

/// Logs the violation and carries on.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreFatal;

impl FatalHandler for IgnoreFatal {
    fn fatal(&self, violation: &Violation) {
        tracing::error!(%violation, "fsm assertion failed, ignored");
    }
}
