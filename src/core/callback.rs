//! State callbacks.
//!
//! A callback is a closure run by the engine at a fixed point of a state's
//! lifecycle (entry, activity or exit). It receives the machine itself so it
//! can read timing, exchange shared data and request the next state.

use crate::engine::Machine;
use std::fmt;

/// Boxed closure invoked with the running machine.
///
/// # Example
///
/// ```rust
/// use cycle_fsm::core::{Callback, MachineConfig, StateDescriptor};
/// use cycle_fsm::engine::Machine;
///
/// let config = MachineConfig::new(vec![StateDescriptor::named("Idle")]);
/// let mut machine = Machine::new(&config).unwrap();
///
/// let store = Callback::new(|m: &mut Machine<'_>| m.set_data(7u32.into()));
/// store.invoke(&mut machine);
///
/// assert_eq!(machine.data().as_word(), Some(7));
/// ```
pub struct Callback {
    action: Box<dyn Fn(&mut Machine<'_>) + Send + Sync>,
}

impl Callback {
    /// Wrap a closure as a callback.
    ///
    /// The closure may call any machine method except `handle` and `reset`.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&mut Machine<'_>) + Send + Sync + 'static,
    {
        Callback {
            action: Box::new(action),
        }
    }

    /// Run the callback against a machine.
    pub fn invoke(&self, machine: &mut Machine<'_>) {
        (self.action)(machine)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MachineConfig, SharedData, StateDescriptor};

    fn config() -> MachineConfig {
        MachineConfig::new(vec![
            StateDescriptor::named("Idle"),
            StateDescriptor::named("Run"),
        ])
    }

    #[test]
    fn callback_receives_the_machine() {
        let config = config();
        let mut machine = Machine::new(&config).unwrap();

        let callback = Callback::new(|m: &mut Machine<'_>| {
            m.set_data(SharedData::Handle(m.state_count()));
        });
        callback.invoke(&mut machine);

        assert_eq!(machine.data(), SharedData::Handle(2));
    }

    #[test]
    fn callback_can_request_transition() {
        let config = config();
        let mut machine = Machine::new(&config).unwrap();

        let callback = Callback::new(|m: &mut Machine<'_>| {
            m.request_transition(1).unwrap();
        });
        callback.invoke(&mut machine);

        assert_eq!(machine.next_state(), 1);
        assert_eq!(machine.current_state(), 0);
    }

    #[test]
    fn callback_is_reusable() {
        let config = config();
        let mut machine = Machine::new(&config).unwrap();

        let bump = Callback::new(|m: &mut Machine<'_>| {
            let next = m.data().as_word().unwrap_or(0) + 1;
            m.set_data(next.into());
        });
        bump.invoke(&mut machine);
        bump.invoke(&mut machine);

        assert_eq!(machine.data().as_word(), Some(2));
    }
}
