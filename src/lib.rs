//! Cycle FSM: a cyclic finite state machine runtime for control loops
//!
//! The host calls [`Machine::handle`](engine::Machine::handle) once per
//! control cycle. Each call either applies a pending transition (exit of
//! the old state, entry of the new one) or accumulates dwell time, and then
//! runs the activity callback of the current state. The runtime owns no
//! domain logic: states and callbacks come from the application.
//!
//! # Core Concepts
//!
//! - **State table**: ordered `StateDescriptor`s with optional entry,
//!   activity and exit callbacks, owned by a `MachineConfig`
//! - **Machine**: runtime instance borrowing a configuration, tracking
//!   current state, dwell time, first entry and a shared data slot
//! - **Hooks**: injected tick source, transition logger and fatal handler
//!
//! # Example
//!
//! ```rust
//! use cycle_fsm::builder::MachineBuilder;
//! use cycle_fsm::core::{MachineConfig, ManualClock, StateDescriptor};
//!
//! let config = MachineConfig::builder()
//!     .name("heater")
//!     .state(StateDescriptor::named("Off"))
//!     .state(StateDescriptor::named("Heating").on_activity(|m| {
//!         if m.duration() >= 1_000 {
//!             m.request_transition(0).unwrap();
//!         }
//!     }))
//!     .build()
//!     .unwrap();
//!
//! let clock = ManualClock::new(0);
//! let mut machine = MachineBuilder::new(&config).clock(clock.clone()).build().unwrap();
//!
//! machine.handle().unwrap();
//! machine.request_transition(1).unwrap();
//! machine.handle().unwrap();
//! assert_eq!(machine.current_state_name(), Some("Heating"));
//!
//! clock.advance(1_000);
//! machine.handle().unwrap();
//! machine.handle().unwrap();
//! assert_eq!(machine.current_state_name(), Some("Off"));
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod hooks;
pub mod pool;

/// Crate version, for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used types
pub use builder::{MachineBuilder, MachineConfigBuilder};
pub use crate::core::{MachineConfig, SharedData, StateDescriptor, StateId, TickSource};
pub use engine::{FsmError, Machine};
