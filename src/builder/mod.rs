//! Builder API for ergonomic configuration and machine construction.
//!
//! This module provides fluent builders and the `state_ids!` macro for
//! declaring state tables with minimal boilerplate.

pub mod config;
pub mod machine;
pub mod macros;

pub use config::MachineConfigBuilder;
pub use machine::MachineBuilder;

use crate::core::{StateDescriptor, StateId};

/// Labelled descriptors, without callbacks, for every state of a typed table.
///
/// Handy for tables where only a few states need callbacks; the rest can be
/// taken from here in order.
///
/// # Example
///
/// ```
/// use cycle_fsm::builder::named_states;
/// use cycle_fsm::core::MachineConfig;
/// use cycle_fsm::state_ids;
///
/// state_ids! {
///     enum Phase {
///         Warmup,
///         Steady,
///     }
/// }
///
/// let config = MachineConfig::new(named_states::<Phase>());
/// assert_eq!(config.state_name(1), Some("Steady"));
/// ```
pub fn named_states<S: StateId>() -> Vec<StateDescriptor> {
    S::ALL.iter().map(|id| StateDescriptor::of(*id)).collect()
}
