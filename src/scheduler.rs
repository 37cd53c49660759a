//! The dispatch engine: core table, wait queue, active policy, statistics.

use crate::error::{SchedResult, SchedulerError};
use crate::job::{Job, JobId, Priority, Time};
use crate::policy::Policy;
use crate::priority_queue::PriorityQueue;

/// Zero-based core slot index.
pub type CoreId = usize;

#[derive(Debug, Default, Clone, Copy)]
struct Stats {
    waiting_time_sum: f64,
    turnaround_sum: f64,
    response_time_sum: f64,
    completed_jobs: u64,
}

/// Owns the core table, the wait queue, the active policy and the running
/// statistics, and maps each of the three simulator events to a
/// deterministic scheduling decision.
///
/// An ordinary owned value rather than process-wide global state: there is
/// no way to call `new_job` before `start_up`, because without a
/// `Scheduler` there is nothing to call a method on.
pub struct Scheduler {
    policy: Policy,
    cores: Vec<Option<Job>>,
    wait_queue: PriorityQueue<Job>,
    stats: Stats,
}

impl Scheduler {
    /// Creates a scheduler with `num_cores` empty core slots running
    /// `policy`. Must be called before any other operation; there is no
    /// other way to obtain a `Scheduler`.
    pub fn start_up(num_cores: usize, policy: Policy) -> SchedResult<Self> {
        if num_cores == 0 {
            return Err(SchedulerError::ZeroCores);
        }
        Ok(Self {
            policy,
            cores: vec![None; num_cores],
            wait_queue: PriorityQueue::new(move |a: &Job, b: &Job| policy.compare(a, b)),
            stats: Stats::default(),
        })
    }

    pub fn num_cores(&self) -> usize {
        self.cores.len()
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    fn check_core(&self, core: CoreId) -> SchedResult<()> {
        if core >= self.cores.len() {
            Err(SchedulerError::InvalidCore {
                index: core,
                num_cores: self.cores.len(),
            })
        } else {
            Ok(())
        }
    }

    /// A new job arrives. Tries, in order, idle-core placement, then
    /// PPRI/PSJF preemption, then (if neither applies) enqueueing. Returns
    /// the core the job was placed on, or `None` if it joined the wait
    /// queue instead.
    pub fn new_job(
        &mut self,
        job_id: JobId,
        time: Time,
        running_time: Time,
        priority: Priority,
    ) -> Option<CoreId> {
        let mut job = Job::new(job_id, time, running_time, priority);

        if let Some(idle) = self.cores.iter().position(|slot| slot.is_none()) {
            job.response_time = Some(0);
            tracing::debug!(job = job_id, core = idle, time, "dispatched to idle core");
            self.cores[idle] = Some(job);
            return Some(idle);
        }

        let victim = match self.policy {
            Policy::Ppri => self
                .weakest_priority_candidate(time)
                .filter(|&c| self.cores[c].as_ref().unwrap().priority > job.priority),
            Policy::Psjf => {
                self.age_running_jobs(time);
                self.longest_remaining_candidate(time)
                    .filter(|&c| self.cores[c].as_ref().unwrap().remaining_time > job.remaining_time)
            }
            _ => None,
        };

        if let Some(core) = victim {
            return Some(self.preempt(core, job, time));
        }

        self.wait_queue.offer(job);
        tracing::debug!(job = job_id, time, "enqueued, no core change");
        None
    }

    /// Among running jobs not dispatched this very tick, the one with the
    /// highest `priority` value (weakest), tie-broken by earliest
    /// `arrival_time` — first occurrence wins on an exact tie.
    fn weakest_priority_candidate(&self, time: Time) -> Option<CoreId> {
        let mut best: Option<CoreId> = None;
        for (i, slot) in self.cores.iter().enumerate() {
            let Some(job) = slot else { continue };
            if job.arrival_time == time {
                continue;
            }
            best = Some(match best {
                None => i,
                Some(b) => {
                    let current = self.cores[b].as_ref().unwrap();
                    if job.priority > current.priority
                        || (job.priority == current.priority && job.arrival_time < current.arrival_time)
                    {
                        i
                    } else {
                        b
                    }
                }
            });
        }
        best
    }

    /// For every running job, decrements `remaining_time` by the elapsed
    /// time since it was last checked and updates `last_checked_time`. Runs
    /// unconditionally before PSJF candidate selection.
    fn age_running_jobs(&mut self, time: Time) {
        for slot in self.cores.iter_mut() {
            if let Some(job) = slot {
                job.remaining_time -= time - job.last_checked_time;
                job.last_checked_time = time;
                tracing::trace!(job = job.id, remaining = job.remaining_time, "psjf aging");
            }
        }
    }

    /// Among running jobs not dispatched this very tick, the one with the
    /// greatest `remaining_time`; ties keep the lowest index.
    fn longest_remaining_candidate(&self, time: Time) -> Option<CoreId> {
        let mut best: Option<CoreId> = None;
        for (i, slot) in self.cores.iter().enumerate() {
            let Some(job) = slot else { continue };
            if job.arrival_time == time {
                continue;
            }
            best = Some(match best {
                None => i,
                Some(b) => {
                    let current = self.cores[b].as_ref().unwrap();
                    if job.remaining_time > current.remaining_time {
                        i
                    } else {
                        b
                    }
                }
            });
        }
        best
    }

    /// Evicts the job on `core`, requeues it (resetting its response time
    /// if it was dispatched this very tick), and places `job` on `core`.
    fn preempt(&mut self, core: CoreId, mut job: Job, time: Time) -> CoreId {
        let mut victim = self.cores[core].take().expect("preemption candidate must be running");
        if victim.response_time == Some(time - victim.arrival_time) {
            victim.response_time = None;
        }
        tracing::debug!(
            victim = victim.id,
            arriving = job.id,
            core,
            time,
            "preempted"
        );
        self.wait_queue.offer(victim);
        job.response_time = Some(0);
        self.cores[core] = Some(job);
        core
    }

    /// A job completes on `core`. Accounts its waiting/turnaround/response
    /// time, frees the core, and if the wait queue is non-empty, dispatches
    /// its head onto the freed core. Returns the id of the newly dispatched
    /// job, or `None` if the core goes idle.
    pub fn job_finished(
        &mut self,
        core: CoreId,
        job_id: JobId,
        time: Time,
    ) -> SchedResult<Option<JobId>> {
        self.check_core(core)?;
        let finished = match self.cores[core].take() {
            Some(job) if job.id == job_id => job,
            Some(job) => {
                let actual = job.id;
                self.cores[core] = Some(job);
                return Err(SchedulerError::JobMismatch {
                    core,
                    expected: job_id,
                    actual,
                });
            }
            None => return Err(SchedulerError::CoreIdle { core }),
        };

        self.stats.waiting_time_sum += finished.waiting_time(time) as f64;
        self.stats.turnaround_sum += finished.turnaround_time(time) as f64;
        self.stats.response_time_sum += finished.response_time.unwrap_or(0) as f64;
        self.stats.completed_jobs += 1;
        tracing::debug!(job = job_id, core, time, "completed");

        Ok(self.dispatch_next(core, time))
    }

    /// The quantum on `core` expires. Rotates the running job to the tail
    /// of the wait queue (if any) and dispatches the new head onto `core`.
    /// Meaningful only under RR, but well-defined under any policy.
    pub fn quantum_expired(&mut self, core: CoreId, time: Time) -> SchedResult<Option<JobId>> {
        self.check_core(core)?;
        if self.cores[core].is_none() && self.wait_queue.is_empty() {
            return Ok(None);
        }
        if let Some(job) = self.cores[core].take() {
            tracing::debug!(job = job.id, core, time, "quantum expired, requeued");
            self.wait_queue.offer(job);
        }
        Ok(self.dispatch_next(core, time))
    }

    /// Polls the wait queue's head onto `core`, recording its first
    /// dispatch if it has never run before. Shared by `job_finished` and
    /// `quantum_expired`.
    fn dispatch_next(&mut self, core: CoreId, time: Time) -> Option<JobId> {
        let mut next = self.wait_queue.poll()?;
        next.last_checked_time = time;
        if next.response_time.is_none() {
            next.response_time = Some(time - next.arrival_time);
        }
        let id = next.id;
        self.cores[core] = Some(next);
        Some(id)
    }

    pub fn average_waiting_time(&self) -> f64 {
        self.average(self.stats.waiting_time_sum)
    }

    pub fn average_turnaround_time(&self) -> f64 {
        self.average(self.stats.turnaround_sum)
    }

    pub fn average_response_time(&self) -> f64 {
        self.average(self.stats.response_time_sum)
    }

    fn average(&self, sum: f64) -> f64 {
        if self.stats.completed_jobs == 0 {
            0.0
        } else {
            sum / self.stats.completed_jobs as f64
        }
    }

    /// Renders the current core assignments and wait-queue contents in the
    /// `job_id(core_or_-1)` format from the original problem statement's
    /// debug hook, logs it at `debug`, and returns it for testing.
    pub fn show_queue(&self) -> String {
        let mut parts = Vec::new();
        for (core, slot) in self.cores.iter().enumerate() {
            if let Some(job) = slot {
                parts.push(format!("{}({})", job.id, core));
            }
        }
        for job in self.wait_queue.iter() {
            parts.push(format!("{}(-1)", job.id));
        }
        let rendered = parts.join(" ");
        tracing::debug!(%rendered, "show_queue");
        rendered
    }

    /// Frees the core table and wait queue. `Drop` would do this anyway;
    /// kept as an explicit, consuming step for callers that want a clear
    /// teardown point.
    pub fn clean_up(self) {
        self.wait_queue.destroy();
    }
}
