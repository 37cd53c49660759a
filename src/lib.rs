//! `sched-core` — the policy dispatch engine for a multi-core CPU scheduler
//! simulation.
//!
//! Given a number of cores and a [`Policy`], this crate decides, for each of
//! three events (job arrival, job completion, quantum expiry), which job
//! runs where. It owns no clock and reads no trace file — advancing virtual
//! time and feeding it events is the caller's job (see `demos/simulate.rs`
//! for one such caller).
//!
//! ```
//! use sched_core::{Policy, Scheduler};
//!
//! let mut scheduler = Scheduler::start_up(1, Policy::Fcfs).unwrap();
//! assert_eq!(scheduler.new_job(1, 0, 5, 0), Some(0));
//! assert_eq!(scheduler.new_job(2, 1, 3, 0), None);
//! assert_eq!(scheduler.job_finished(0, 1, 5).unwrap(), Some(2));
//! ```

mod error;
mod job;
mod policy;
mod priority_queue;
mod scheduler;

pub use error::{SchedResult, SchedulerError};
pub use job::{HasId, Job, JobId, Priority, Time};
pub use policy::Policy;
pub use priority_queue::PriorityQueue;
pub use scheduler::{CoreId, Scheduler};
