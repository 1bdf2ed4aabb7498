//! Builder for constructing machines.

use crate::core::{MachineConfig, SharedData, SystemClock, TickSource};
use crate::engine::{FsmError, Machine};
use crate::hooks::{DefaultFatal, FatalHandler, TracingLogger, TransitionLogger};
use std::sync::Arc;

/// Builder for a [`Machine`] over a borrowed configuration.
///
/// Anything left unset falls back to [`SystemClock`], [`TracingLogger`] and
/// [`DefaultFatal`].
pub struct MachineBuilder<'cfg> {
    config: &'cfg MachineConfig,
    clock: Option<Arc<dyn TickSource>>,
    logger: Option<Arc<dyn TransitionLogger>>,
    fatal: Option<Arc<dyn FatalHandler>>,
    data: SharedData,
}

impl<'cfg> MachineBuilder<'cfg> {
    /// Create a new builder.
    pub fn new(config: &'cfg MachineConfig) -> Self {
        Self {
            config,
            clock: None,
            logger: None,
            fatal: None,
            data: SharedData::Empty,
        }
    }

    /// Set the host tick source.
    pub fn clock<T: TickSource + 'static>(self, clock: T) -> Self {
        self.shared_clock(Arc::new(clock))
    }

    /// Set a tick source already shared with other machines.
    pub fn shared_clock(mut self, clock: Arc<dyn TickSource>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the transition logger.
    pub fn logger<L: TransitionLogger + 'static>(self, logger: L) -> Self {
        self.shared_logger(Arc::new(logger))
    }

    pub fn shared_logger(mut self, logger: Arc<dyn TransitionLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Set the assertion hook.
    pub fn fatal_handler<F: FatalHandler + 'static>(self, fatal: F) -> Self {
        self.shared_fatal_handler(Arc::new(fatal))
    }

    pub fn shared_fatal_handler(mut self, fatal: Arc<dyn FatalHandler>) -> Self {
        self.fatal = Some(fatal);
        self
    }

    /// Initial content of the shared data slot, restored by `reset`.
    pub fn data(mut self, data: SharedData) -> Self {
        self.data = data;
        self
    }

    /// Build the machine.
    /// Returns an error if the state table is empty.
    pub fn build(self) -> Result<Machine<'cfg>, FsmError> {
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock::new()));
        let logger = self.logger.unwrap_or_else(|| Arc::new(TracingLogger));
        let fatal = self.fatal.unwrap_or_else(|| Arc::new(DefaultFatal));

        Machine::construct(self.config, clock, logger, fatal, self.data)
    }
}
