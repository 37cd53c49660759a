//! The six scheduling disciplines and the wait-queue ordering each implies.

use crate::job::Job;
use std::cmp::Ordering;

/// A scheduling discipline: which wait-queue order it implies, and whether
/// it may preempt a running job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First-Come-First-Served. Non-preemptive; insertion order only.
    Fcfs,
    /// Shortest-Job-First. Non-preemptive; ascending `remaining_time`
    /// (equivalently `job_length`, since non-preemptive SJF never touches
    /// `remaining_time` after arrival), FIFO on tie.
    Sjf,
    /// Preemptive SJF (shortest remaining time first).
    Psjf,
    /// Priority. Non-preemptive; ascending `priority`, tie by ascending
    /// `arrival_time`.
    Pri,
    /// Preemptive priority.
    Ppri,
    /// Round-robin. Non-preemptive dispatch; rotation is driven externally
    /// by quantum-expiry events. Insertion order only, same as FCFS.
    Rr,
}

impl Policy {
    /// Whether arriving jobs under this policy may preempt a running job.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Policy::Psjf | Policy::Ppri)
    }

    /// The wait-queue total order for this policy: `Less` means `a` belongs
    /// strictly before `b`. FCFS and RR return `Greater` unconditionally,
    /// which (given how [`PriorityQueue::offer`](crate::PriorityQueue::offer)
    /// inserts) degenerates to pure FIFO.
    pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
        match self {
            Policy::Fcfs | Policy::Rr => Ordering::Greater,
            Policy::Sjf | Policy::Psjf => a.remaining_time.cmp(&b.remaining_time),
            Policy::Pri | Policy::Ppri => a
                .priority
                .cmp(&b.priority)
                .then_with(|| a.arrival_time.cmp(&b.arrival_time)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn job(id: u64, arrival: i64, len: i64, pri: i32) -> Job {
        Job::new(id, arrival, len, pri)
    }

    #[test]
    fn fcfs_never_orders_less() {
        let a = job(1, 0, 5, 0);
        let b = job(2, 1, 1, 0);
        assert_eq!(Policy::Fcfs.compare(&a, &b), Ordering::Greater);
        assert_eq!(Policy::Fcfs.compare(&b, &a), Ordering::Greater);
    }

    #[test]
    fn sjf_orders_by_remaining_time() {
        let short = job(1, 0, 2, 0);
        let long = job(2, 0, 9, 0);
        assert_eq!(Policy::Sjf.compare(&short, &long), Ordering::Less);
    }

    #[test]
    fn pri_breaks_ties_by_arrival_time() {
        let earlier = job(1, 0, 5, 3);
        let later = job(2, 1, 5, 3);
        assert_eq!(Policy::Pri.compare(&earlier, &later), Ordering::Less);
    }

    #[test_case(Policy::Fcfs, false)]
    #[test_case(Policy::Sjf, false)]
    #[test_case(Policy::Psjf, true)]
    #[test_case(Policy::Pri, false)]
    #[test_case(Policy::Ppri, true)]
    #[test_case(Policy::Rr, false)]
    fn only_psjf_and_ppri_are_preemptive(policy: Policy, expected: bool) {
        assert_eq!(policy.is_preemptive(), expected);
    }
}
