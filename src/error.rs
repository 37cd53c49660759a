//! Error types for the scheduler core.
//!
//! The scheduler's operations have almost no error modes: empty-queue reads,
//! out-of-range indices and zero-completion statistics are all plain
//! sentinels (`None` / `0.0`), not errors. What remains are precondition
//! violations the simulator is not supposed to trigger — these fail loudly
//! rather than corrupting scheduler state.

use crate::job::JobId;
use crate::CoreId;
use thiserror::Error;

/// Result alias for fallible [`Scheduler`](crate::Scheduler) operations.
pub type SchedResult<T> = Result<T, SchedulerError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("num_cores must be greater than zero")]
    ZeroCores,

    #[error("core index {index} is out of range (num_cores = {num_cores})")]
    InvalidCore { index: CoreId, num_cores: usize },

    #[error("core {core} is idle; there is no job to finish")]
    CoreIdle { core: CoreId },

    #[error("core {core} holds job {actual}, not job {expected}")]
    JobMismatch {
        core: CoreId,
        expected: JobId,
        actual: JobId,
    },
}
