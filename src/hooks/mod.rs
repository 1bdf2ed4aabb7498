//! Capabilities injected into a machine at construction.
//!
//! Both hooks are trait objects so hosts and tests can substitute their own:
//!
//! - [`TransitionLogger`]: debug sink told about every transition
//! - [`FatalHandler`]: assertion hook for programmer errors
//!
//! # Example
//!
//! ```rust
//! use cycle_fsm::core::{MachineConfig, StateDescriptor};
//! use cycle_fsm::builder::MachineBuilder;
//! use cycle_fsm::hooks::{IgnoreFatal, NoopLogger};
//!
//! let config = MachineConfig::new(vec![StateDescriptor::named("Idle")]);
//! let machine = MachineBuilder::new(&config)
//!     .logger(NoopLogger)
//!     .fatal_handler(IgnoreFatal)
//!     .build();
//! assert!(machine.is_ok());
//! ```

pub mod logger;
pub mod violations;

pub use logger::{
    NoopLogger, RecordingLogger, StateRef, TracingLogger, TransitionEvent, TransitionLogger,
    TransitionRecord,
};
pub use violations::{DefaultFatal, FatalHandler, IgnoreFatal, Violation};
