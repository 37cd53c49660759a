//! CLI harness that replays a JSON job trace through [`sched_core::Scheduler`]
//! and reports the three final averages. Contains no scheduling policy
//! logic of its own — every decision comes from the library.

use clap::{Parser, ValueEnum};
use sched_core::{Policy, Scheduler};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sched-sim")]
#[command(about = "Replays a job trace through a multi-core scheduler simulation")]
struct Cli {
    /// Scheduling discipline to simulate.
    #[arg(short, long, value_enum)]
    policy: CliPolicy,

    /// Number of cores.
    #[arg(short, long, default_value_t = 1)]
    cores: usize,

    /// Round-robin quantum length. Required when `--policy rr`, ignored
    /// otherwise.
    #[arg(short, long)]
    quantum: Option<i64>,

    /// Path to a JSON array of job-trace entries:
    /// `[{"id": 1, "arrival_time": 0, "length": 5, "priority": 0}, ...]`.
    #[arg(short, long)]
    trace: PathBuf,
}

/// Mirrors [`sched_core::Policy`] for `clap`'s `ValueEnum` derive, which the
/// library itself does not depend on.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPolicy {
    Fcfs,
    Sjf,
    Psjf,
    Pri,
    Ppri,
    Rr,
}

impl From<CliPolicy> for Policy {
    fn from(p: CliPolicy) -> Self {
        match p {
            CliPolicy::Fcfs => Policy::Fcfs,
            CliPolicy::Sjf => Policy::Sjf,
            CliPolicy::Psjf => Policy::Psjf,
            CliPolicy::Pri => Policy::Pri,
            CliPolicy::Ppri => Policy::Ppri,
            CliPolicy::Rr => Policy::Rr,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TraceEntry {
    id: u64,
    arrival_time: i64,
    length: i64,
    priority: i32,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if matches!(cli.policy, CliPolicy::Rr) && cli.quantum.is_none() {
        eprintln!("--quantum is required for --policy rr");
        return ExitCode::FAILURE;
    }

    let raw = match std::fs::read_to_string(&cli.trace) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("failed to read {}: {err}", cli.trace.display());
            return ExitCode::FAILURE;
        }
    };

    let mut trace: Vec<TraceEntry> = match serde_json::from_str(&raw) {
        Ok(trace) => trace,
        Err(err) => {
            eprintln!("failed to parse {}: {err}", cli.trace.display());
            return ExitCode::FAILURE;
        }
    };
    trace.sort_by_key(|entry| entry.arrival_time);

    match run(cli.policy.into(), cli.cores, cli.quantum, &trace) {
        Ok(scheduler) => {
            println!("average waiting time:   {:.4}", scheduler.average_waiting_time());
            println!("average turnaround time: {:.4}", scheduler.average_turnaround_time());
            println!("average response time:  {:.4}", scheduler.average_response_time());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("simulation error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Drives `scheduler` through `trace`, synthesizing quantum-expiry events
/// itself when running under round-robin. Jobs run to completion unless
/// preempted or (under RR) rotated out by the caller-supplied `quantum`.
fn run(
    policy: Policy,
    cores: usize,
    quantum: Option<i64>,
    trace: &[TraceEntry],
) -> sched_core::SchedResult<Scheduler> {
    let mut scheduler = Scheduler::start_up(cores, policy)?;
    // (job_id, decision_time, service_chunk_granted) per occupied core.
    let mut running: Vec<Option<(u64, i64, i64)>> = vec![None; cores];
    let mut remaining_service: HashMap<u64, i64> =
        trace.iter().map(|entry| (entry.id, entry.length)).collect();
    let mut arrivals = trace.iter().peekable();
    let mut time = 0i64;

    let chunk_for = |remaining: i64| {
        if matches!(policy, Policy::Rr) {
            quantum.map_or(remaining, |q| q.min(remaining))
        } else {
            remaining
        }
    };

    loop {
        while let Some(entry) = arrivals.peek() {
            if entry.arrival_time > time {
                break;
            }
            let entry = arrivals.next().unwrap();
            tracing::info!(job = entry.id, time, "arrival");
            if let Some(core) = scheduler.new_job(entry.id, time, entry.length, entry.priority) {
                let chunk = chunk_for(remaining_service[&entry.id]);
                running[core] = Some((entry.id, time + chunk, chunk));
            }
        }

        let mut next_time = arrivals.peek().map(|e| e.arrival_time);

        for core in 0..cores {
            if let Some((job_id, deadline, chunk)) = running[core] {
                if deadline <= time {
                    let left = remaining_service.get_mut(&job_id).expect("tracked on arrival");
                    *left -= chunk;

                    let dispatched = if *left <= 0 {
                        scheduler.job_finished(core, job_id, time)?
                    } else {
                        scheduler.quantum_expired(core, time)?
                    };
                    running[core] = dispatched.map(|id| {
                        let chunk = chunk_for(remaining_service[&id]);
                        (id, time + chunk, chunk)
                    });
                } else {
                    next_time = Some(next_time.map_or(deadline, |t| t.min(deadline)));
                }
            }
        }

        match next_time {
            Some(t) if t > time => time = t,
            Some(_) => time += 1,
            None => break,
        }
    }

    Ok(scheduler)
}
