use crate::{
    core::{SupervisorConfig, supervisor::Supervisor},
    logger::LoggerRef,
};

/// Builder for constructing a [`Supervisor`] with optional collaborators.
pub struct SupervisorBuilder {
    cfg: SupervisorConfig,
    logger: Option<LoggerRef>,
}

impl SupervisorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: SupervisorConfig) -> Self {
        Self { cfg, logger: None }
    }

    /// Sets the logger that receives one record per recovered fault.
    ///
    /// Without a logger faults are still recovered, just not reported.
    pub fn with_logger(mut self, logger: LoggerRef) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds and returns the Supervisor instance.
    pub fn build(self) -> Supervisor {
        Supervisor::from_parts(self.cfg, self.logger)
    }
}
