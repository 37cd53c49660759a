//! The unit of work scheduled by the core: [`Job`] and its identity trait.

/// Globally unique job identifier, assigned by the caller (the simulator).
pub type JobId = u64;

/// Virtual time, in whatever unit the simulator's clock advances by.
pub type Time = i64;

/// Scheduling priority. Lower value means higher priority.
pub type Priority = i32;

/// Identity lookup for types stored in a [`PriorityQueue`](crate::PriorityQueue).
///
/// `remove_by_identity` must compare by handle identity, never by the
/// comparator that orders the queue — this trait keeps that distinction
/// explicit instead of overloading `PartialEq`, which on `Job` would
/// otherwise invite confusion with value equality.
pub trait HasId {
    type Id: PartialEq;

    fn id(&self) -> Self::Id;
}

/// One unit of work.
///
/// A `Job` lives in exactly one place at a time: a core slot or the wait
/// queue. [`Scheduler`](crate::Scheduler) moves ownership between the two;
/// it is never duplicated and never exists in both simultaneously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub arrival_time: Time,
    pub job_length: Time,
    /// Service time not yet consumed. Equals `job_length` at arrival and is
    /// otherwise maintained only while the active policy is PSJF — it is
    /// updated solely during a PSJF `new_job` call (for every running job),
    /// and is stale between arrivals under every other policy. Nothing
    /// outside PSJF's own bookkeeping consults it, so the drift is benign.
    pub remaining_time: Time,
    pub priority: Priority,
    /// `None` until the job's first dispatch to a core; `Some(delta)`
    /// thereafter, where `delta` is the virtual-time gap between arrival
    /// and that first dispatch.
    pub response_time: Option<Time>,
    /// Virtual time of the last PSJF remaining-time bookkeeping touch.
    pub last_checked_time: Time,
}

impl Job {
    pub fn new(id: JobId, arrival_time: Time, job_length: Time, priority: Priority) -> Self {
        Self {
            id,
            arrival_time,
            job_length,
            remaining_time: job_length,
            priority,
            response_time: None,
            last_checked_time: arrival_time,
        }
    }

    /// Turnaround time if this job completed at `completion_time`.
    pub fn turnaround_time(&self, completion_time: Time) -> Time {
        completion_time - self.arrival_time
    }

    /// Waiting time (turnaround minus service time) if completed now.
    pub fn waiting_time(&self, completion_time: Time) -> Time {
        completion_time - self.arrival_time - self.job_length
    }
}

impl HasId for Job {
    type Id = JobId;

    fn id(&self) -> JobId {
        self.id
    }
}
