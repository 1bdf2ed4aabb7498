//! State descriptors and typed state identifiers.
//!
//! A state table is an ordered list of [`StateDescriptor`]s. The engine
//! addresses states by their position in that list. [`StateId`] lets an
//! application name those positions with an enum instead of bare indices.

use super::callback::Callback;
use crate::engine::Machine;
use std::fmt::Debug;

/// Typed name for a position in a state table.
///
/// Implemented for fieldless enums whose variants are declared in table
/// order. The [`state_ids!`](crate::state_ids) macro writes the impl.
///
/// # Example
///
/// ```rust
/// use cycle_fsm::core::StateId;
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Pump {
///     Idle,
///     Priming,
///     Running,
/// }
///
/// impl StateId for Pump {
///     const ALL: &'static [Self] = &[Self::Idle, Self::Priming, Self::Running];
///
///     fn index(self) -> usize {
///         self as usize
///     }
///
///     fn name(self) -> &'static str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Priming => "Priming",
///             Self::Running => "Running",
///         }
///     }
/// }
///
/// assert_eq!(Pump::COUNT, 3);
/// assert_eq!(Pump::from_index(2), Some(Pump::Running));
/// assert_eq!(Pump::from_index(3), None);
/// ```
pub trait StateId: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Every state, in table order.
    const ALL: &'static [Self];

    /// Number of states in the table.
    const COUNT: usize = Self::ALL.len();

    /// Position of this state in the table.
    fn index(self) -> usize;

    /// Display label for diagnostics.
    fn name(self) -> &'static str;

    /// Look up the state stored at a table position.
    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// One row of a state table.
///
/// Every callback is optional; a missing callback is a no-op.
///
/// # Example
///
/// ```rust
/// use cycle_fsm::core::StateDescriptor;
/// use cycle_fsm::engine::Machine;
///
/// let priming = StateDescriptor::named("Priming")
///     .on_entry(|m: &mut Machine<'_>| m.set_data(0u32.into()))
///     .on_activity(|m: &mut Machine<'_>| {
///         if m.duration() >= 500 {
///             let _ = m.request_transition(2);
///         }
///     });
///
/// assert_eq!(priming.name(), Some("Priming"));
/// assert!(priming.entry().is_some());
/// assert!(priming.exit().is_none());
/// ```
#[derive(Debug, Default)]
pub struct StateDescriptor {
    name: Option<String>,
    on_entry: Option<Callback>,
    on_activity: Option<Callback>,
    on_exit: Option<Callback>,
}

impl StateDescriptor {
    /// Anonymous state with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// State with a display label and no callbacks.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// State labelled after a typed identifier.
    pub fn of<S: StateId>(id: S) -> Self {
        Self::named(id.name())
    }

    /// Run once when the state is entered, before its first activity.
    pub fn on_entry<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut Machine<'_>) + Send + Sync + 'static,
    {
        self.on_entry = Some(Callback::new(action));
        self
    }

    /// Run on every handler cycle while the state is current.
    pub fn on_activity<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut Machine<'_>) + Send + Sync + 'static,
    {
        self.on_activity = Some(Callback::new(action));
        self
    }

    /// Run once when the state is left, before the next state's entry.
    pub fn on_exit<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut Machine<'_>) + Send + Sync + 'static,
    {
        self.on_exit = Some(Callback::new(action));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn entry(&self) -> Option<&Callback> {
        self.on_entry.as_ref()
    }

    pub fn activity(&self) -> Option<&Callback> {
        self.on_activity.as_ref()
    }

    pub fn exit(&self) -> Option<&Callback> {
        self.on_exit.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum TestState {
        Initial,
        Processing,
        Complete,
        Failed,
    }

    impl StateId for TestState {
        const ALL: &'static [Self] = &[
            Self::Initial,
            Self::Processing,
            Self::Complete,
            Self::Failed,
        ];

        fn index(self) -> usize {
            self as usize
        }

        fn name(self) -> &'static str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
                Self::Failed => "Failed",
            }
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Complete.name(), "Complete");
        assert_eq!(TestState::Failed.name(), "Failed");
    }

    #[test]
    fn index_and_from_index_agree() {
        for state in TestState::ALL {
            assert_eq!(TestState::from_index(state.index()), Some(*state));
        }
        assert_eq!(TestState::COUNT, 4);
        assert_eq!(TestState::from_index(4), None);
    }

    #[test]
    fn descriptor_defaults_are_empty() {
        let descriptor = StateDescriptor::new();
        assert_eq!(descriptor.name(), None);
        assert!(descriptor.entry().is_none());
        assert!(descriptor.activity().is_none());
        assert!(descriptor.exit().is_none());
    }

    #[test]
    fn descriptor_of_uses_state_name() {
        let descriptor = StateDescriptor::of(TestState::Complete);
        assert_eq!(descriptor.name(), Some("Complete"));
    }

    #[test]
    fn descriptor_stores_each_callback() {
        let descriptor = StateDescriptor::named("Busy")
            .on_entry(|_| {})
            .on_activity(|_| {})
            .on_exit(|_| {});

        assert!(descriptor.entry().is_some());
        assert!(descriptor.activity().is_some());
        assert!(descriptor.exit().is_some());
    }
}
