//! The state-transition engine.
//!
//! A [`Machine`] walks its borrowed state table one handler cycle at a time:
//!
//! 1. Apply a pending transition (exit old state, enter new state), or
//!    accumulate dwell time when there is none
//! 2. Run the activity callback of the resulting current state
//!
//! The very first cycle after construction or [`Machine::reset`] always
//! enters the selected state without running any exit.

mod error;
mod machine;
mod status;

pub use error::{ConfigError, FsmError};
pub use machine::{Machine, DWELL_CEILING};
pub use status::MachineStatus;
