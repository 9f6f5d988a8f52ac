//! CPU Scheduling Simulator
//!
//! Drives a single simulated CPU over a fixed process population under one
//! of four disciplines (FCFS, SJF, SRT, RR) and produces a deterministic
//! event trace plus aggregate metrics. One logical millisecond passes per
//! tick; every simultaneous event is resolved in a fixed step order with
//! ties broken by ascending process name.

use readyq::{Entry, Order, ReadyQueue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use workload::Process;

/// Event lines past this clock value are dropped from the trace unless
/// `SimConfig::full_trace` is set. Start/end, [NEW] and termination lines
/// are always kept.
pub const TRACE_CUTOFF_MS: u64 = 1000;

/// Where RR places a process entering the ready queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RrInsert {
    End,
    Beginning,
}

impl fmt::Display for RrInsert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RrInsert::End => write!(f, "END"),
            RrInsert::Beginning => write!(f, "BEGINNING"),
        }
    }
}

impl FromStr for RrInsert {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "END" => Ok(RrInsert::End),
            "BEGINNING" => Ok(RrInsert::Beginning),
            other => Err(format!("expected END or BEGINNING, got {other}")),
        }
    }
}

/// Scheduling discipline, with its policy parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Discipline {
    /// First-come-first-served; no preemption.
    Fcfs,
    /// Non-preemptive shortest-job-first on predicted burst length tau.
    Sjf { tau_init: i64, alpha: f64 },
    /// Preemptive shortest-remaining-time on tau minus accrued CPU time.
    Srt { tau_init: i64, alpha: f64 },
    /// Round-robin with a fixed time slice.
    RoundRobin { time_slice: u64, insert: RrInsert },
}

impl Discipline {
    pub fn label(&self) -> &'static str {
        match self {
            Discipline::Fcfs => "FCFS",
            Discipline::Sjf { .. } => "SJF",
            Discipline::Srt { .. } => "SRT",
            Discipline::RoundRobin { .. } => "RR",
        }
    }

    fn uses_tau(&self) -> bool {
        matches!(self, Discipline::Sjf { .. } | Discipline::Srt { .. })
    }

    fn preemptive(&self) -> bool {
        matches!(self, Discipline::Srt { .. } | Discipline::RoundRobin { .. })
    }

    fn tau_init(&self) -> i64 {
        match self {
            Discipline::Sjf { tau_init, .. } | Discipline::Srt { tau_init, .. } => *tau_init,
            _ => 0,
        }
    }

    fn alpha(&self) -> f64 {
        match self {
            Discipline::Sjf { alpha, .. } | Discipline::Srt { alpha, .. } => *alpha,
            _ => 0.0,
        }
    }

    fn time_slice(&self) -> u64 {
        match self {
            Discipline::RoundRobin { time_slice, .. } => *time_slice,
            _ => 0,
        }
    }

    fn queue_order(&self) -> Order {
        match self {
            Discipline::Fcfs => Order::Fifo,
            Discipline::Sjf { .. } | Discipline::Srt { .. } => Order::Priority,
            Discipline::RoundRobin { insert, .. } => match insert {
                RrInsert::End => Order::Fifo,
                RrInsert::Beginning => Order::Lifo,
            },
        }
    }
}

/// Engine configuration shared by all disciplines.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Duration of half a context switch (switch-in or switch-out), in ms.
    pub half_switch: u64,
    /// Keep every event line regardless of the trace cutoff.
    pub full_trace: bool,
}

/// Aggregate metrics for one completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimMetrics {
    pub algorithm: String,
    pub avg_burst_ms: f64,
    pub avg_wait_ms: f64,
    pub avg_turnaround_ms: f64,
    pub context_switches: u64,
    pub preemptions: u64,
    pub cpu_utilization: f64,
}

impl fmt::Display for SimMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm {}", self.algorithm)?;
        writeln!(f, "-- average CPU burst time: {:.3} ms", self.avg_burst_ms)?;
        writeln!(f, "-- average wait time: {:.3} ms", self.avg_wait_ms)?;
        writeln!(
            f,
            "-- average turnaround time: {:.3} ms",
            self.avg_turnaround_ms
        )?;
        writeln!(
            f,
            "-- total number of context switches: {}",
            self.context_switches
        )?;
        writeln!(f, "-- total number of preemptions: {}", self.preemptions)?;
        writeln!(f, "-- CPU utilization: {:.3}%", self.cpu_utilization)
    }
}

/// The outcome of one run: the ordered event trace and the metrics.
#[derive(Debug, Clone)]
pub struct SimRun {
    pub trace: Vec<String>,
    pub metrics: SimMetrics,
}

/// Exponential-average burst prediction: ceil((1 - alpha) * tau + alpha * actual).
fn next_tau(tau: i64, alpha: f64, actual: u64) -> i64 {
    ((1.0 - alpha) * tau as f64 + alpha * actual as f64).ceil() as i64
}

/// Per-process simulation state over the immutable burst arena.
#[derive(Debug, Clone)]
struct Proc {
    name: char,
    /// Ticks until arrival; 0 once admitted.
    arrival_in: u64,
    /// Alternating CPU/IO burst durations, never mutated.
    bursts: Vec<u64>,
    /// Index of the burst currently being consumed.
    cursor: usize,
    /// Remaining time of the burst at `cursor`.
    head_rem: u64,
    /// CPU bursts left; the process terminates when this reaches zero.
    bursts_left: usize,
    /// Predicted next CPU burst length (SJF/SRT only).
    tau: i64,
    /// CPU time accrued in the current burst attempt. Survives preemption,
    /// resets when the burst completes.
    accrued: u64,
    /// One entry per stay in the ready queue; the open (last) entry grows
    /// by one for every tick the process remains queued.
    waits: Vec<u64>,
}

/// CPU state machine. At most one process is associated with the CPU.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Cpu {
    Idle,
    SwitchingIn { pid: usize, remaining: u64 },
    Bursting { pid: usize },
    SwitchingOut {
        /// None when the outgoing process terminated.
        outgoing: Option<usize>,
        remaining: u64,
        preempted: bool,
    },
}

/// One simulation run. Owns a deep copy of the workload plus all pending
/// sets, so concurrent runs over the same workload never share state.
pub struct Simulation {
    disc: Discipline,
    cfg: SimConfig,
    clock: u64,
    procs: Vec<Proc>,
    queue: ReadyQueue,
    /// Pids not yet arrived, in name order.
    pre_arrival: Vec<usize>,
    /// Pids doing I/O, kept sorted so simultaneous completions resolve
    /// alphabetically.
    ios: Vec<usize>,
    cpu: Cpu,
    /// RR slice countdown; refreshed on every fresh dispatch.
    slice_left: u64,
    /// SRT: process that finished I/O while a switch-in was in progress,
    /// held for the collision check at switch-in completion.
    finished_io: Option<usize>,
    /// One sample per switch-in, incremented per bursting tick.
    burst_samples: Vec<u64>,
    preemptions: u64,
    /// CPU bursts across the whole workload (turnaround denominator for
    /// the preemptive disciplines).
    total_bursts: u64,
    trace: Vec<String>,
}

/// Run one discipline over a copy of `processes`.
pub fn run(discipline: Discipline, processes: &[Process], config: &SimConfig) -> SimRun {
    Simulation::new(discipline, processes, config).run()
}

impl Simulation {
    pub fn new(disc: Discipline, processes: &[Process], cfg: &SimConfig) -> Self {
        assert!(!processes.is_empty(), "workload must not be empty");
        assert!(cfg.half_switch >= 1, "half context switch must be >= 1ms");
        // Slot order stands in for name order everywhere ties are broken.
        debug_assert!(
            processes.windows(2).all(|w| w[0].name < w[1].name),
            "processes must be sorted by name"
        );

        let procs: Vec<Proc> = processes
            .iter()
            .map(|p| {
                assert!(p.bursts.len() % 2 == 1, "burst list must have odd length");
                Proc {
                    name: p.name,
                    arrival_in: p.arrival,
                    cursor: 0,
                    head_rem: p.bursts[0],
                    bursts_left: p.cpu_burst_count(),
                    tau: disc.tau_init(),
                    accrued: 0,
                    waits: Vec::new(),
                    bursts: p.bursts.clone(),
                }
            })
            .collect();

        let total_bursts = procs.iter().map(|p| p.bursts_left as u64).sum();

        Self {
            queue: ReadyQueue::new(disc.queue_order()),
            slice_left: disc.time_slice(),
            disc,
            cfg: *cfg,
            clock: 0,
            procs,
            pre_arrival: Vec::new(),
            ios: Vec::new(),
            cpu: Cpu::Idle,
            finished_io: None,
            burst_samples: Vec::new(),
            preemptions: 0,
            total_bursts,
            trace: Vec::new(),
        }
    }

    /// Advance tick by tick until every pending set drains.
    pub fn run(mut self) -> SimRun {
        self.startup();

        loop {
            self.clock += 1;

            self.cpu_service();
            self.switch_in_service();
            self.requeue_preempted();
            self.io_service();
            self.arrival_service();
            self.switch_out_service();
            self.dispatch();
            self.wait_accounting();

            #[cfg(debug_assertions)]
            self.check_membership();

            if self.drained() {
                let line = format!(
                    "time {}ms: Simulator ended for {} {}",
                    self.clock + self.cfg.half_switch,
                    self.disc.label(),
                    self.queue.render()
                );
                self.trace_always(line);
                self.trace_always(String::new());
                break;
            }
        }

        let metrics = self.summarize();
        SimRun {
            trace: self.trace,
            metrics,
        }
    }

    /// Announce the population, admit arrival-0 processes, and start the
    /// first switch-in.
    fn startup(&mut self) {
        for pid in 0..self.procs.len() {
            let p = &self.procs[pid];
            let s = if p.bursts_left == 1 { "" } else { "s" };
            let line = if self.disc.uses_tau() {
                format!(
                    "Process {} [NEW] (arrival time {} ms) {} CPU burst{} (tau {}ms)",
                    p.name, p.arrival_in, p.bursts_left, s, p.tau
                )
            } else {
                format!(
                    "Process {} [NEW] (arrival time {} ms) {} CPU burst{}",
                    p.name, p.arrival_in, p.bursts_left, s
                )
            };
            self.trace_always(line);
        }

        let started = match self.disc {
            Discipline::RoundRobin { time_slice, insert } => format!(
                "time 0ms: Simulator started for RR with time slice {}ms and rr_add to {} {}",
                time_slice,
                insert,
                self.queue.render()
            ),
            _ => format!(
                "time 0ms: Simulator started for {} {}",
                self.disc.label(),
                self.queue.render()
            ),
        };
        self.trace_always(started);

        for pid in 0..self.procs.len() {
            if self.procs[pid].arrival_in == 0 {
                self.admit(pid);
                let line = format!(
                    "time {}ms: Process {}{} arrived; placed on ready queue {}",
                    self.clock,
                    self.procs[pid].name,
                    self.tau_tag(pid),
                    self.queue.render()
                );
                self.trace(line);
            } else {
                self.pre_arrival.push(pid);
            }
        }

        if let Some(e) = self.queue.pop() {
            self.cpu = Cpu::SwitchingIn {
                pid: e.pid,
                remaining: self.cfg.half_switch - 1,
            };
        }
    }

    /// Push a process on the ready queue and open a new wait interval.
    fn admit(&mut self, pid: usize) {
        let key = if self.disc.uses_tau() {
            self.procs[pid].tau
        } else {
            0
        };
        self.queue.push(Entry {
            key,
            pid,
            name: self.procs[pid].name,
        });
        self.procs[pid].waits.push(0);
    }

    /// Step 1: burn one tick of the running burst; handle completion,
    /// termination, and RR slice expiry.
    fn cpu_service(&mut self) {
        let pid = match self.cpu {
            Cpu::Bursting { pid } => pid,
            _ => return,
        };

        {
            let p = &mut self.procs[pid];
            p.head_rem -= 1;
            p.accrued += 1;
        }
        *self
            .burst_samples
            .last_mut()
            .expect("a burst sample is open while bursting") += 1;
        if matches!(self.disc, Discipline::RoundRobin { .. }) {
            self.slice_left -= 1;
        }

        if self.procs[pid].head_rem == 0 {
            self.finish_burst(pid);
        } else if matches!(self.disc, Discipline::RoundRobin { .. }) && self.slice_left == 0 {
            if self.queue.is_empty() {
                // Nobody is waiting: the slice silently extends.
                self.slice_left = self.disc.time_slice();
            } else {
                let line = format!(
                    "time {}ms: Time slice expired; process {} preempted with {}ms to go {}",
                    self.clock,
                    self.procs[pid].name,
                    self.procs[pid].head_rem,
                    self.queue.render()
                );
                self.trace(line);
                self.preemptions += 1;
                self.cpu = Cpu::SwitchingOut {
                    outgoing: Some(pid),
                    remaining: self.cfg.half_switch + 1,
                    preempted: true,
                };
            }
        }
    }

    /// A CPU burst just ran down to zero: terminate the process or send it
    /// toward I/O, recomputing tau for the predictive disciplines.
    fn finish_burst(&mut self, pid: usize) {
        let half = self.cfg.half_switch;
        {
            let p = &mut self.procs[pid];
            p.cursor += 1;
            p.bursts_left -= 1;
        }

        if self.procs[pid].bursts_left == 0 {
            let line = format!(
                "time {}ms: Process {} terminated {}",
                self.clock,
                self.procs[pid].name,
                self.queue.render()
            );
            self.trace_always(line);
            self.procs[pid].accrued = 0;
            self.cpu = Cpu::SwitchingOut {
                outgoing: None,
                remaining: half + 1,
                preempted: false,
            };
            return;
        }

        // The cursor now sits on the IO burst that follows.
        let io_len = self.procs[pid].bursts[self.procs[pid].cursor];
        self.procs[pid].head_rem = io_len;

        let bursts_left = self.procs[pid].bursts_left;
        let s = if bursts_left == 1 { "" } else { "s" };
        let name = self.procs[pid].name;

        let completed = format!(
            "time {}ms: Process {}{} completed a CPU burst; {} burst{} to go {}",
            self.clock,
            name,
            self.tau_tag(pid),
            bursts_left,
            s,
            self.queue.render()
        );
        self.trace(completed);

        if self.disc.uses_tau() {
            let new_tau = next_tau(
                self.procs[pid].tau,
                self.disc.alpha(),
                self.procs[pid].accrued,
            );
            let line = format!(
                "time {}ms: Recalculated tau ({}ms) for process {} {}",
                self.clock,
                new_tau,
                name,
                self.queue.render()
            );
            self.trace(line);
            self.procs[pid].tau = new_tau;
        }

        let line = format!(
            "time {}ms: Process {} switching out of CPU; will block on I/O until time {}ms {}",
            self.clock,
            name,
            self.clock + io_len + half,
            self.queue.render()
        );
        self.trace(line);

        self.procs[pid].accrued = 0;
        self.cpu = Cpu::SwitchingOut {
            outgoing: Some(pid),
            remaining: half + 1,
            preempted: false,
        };
    }

    /// Step 2: advance a switch-in; on completion start the burst and, for
    /// SRT, resolve a same-window I/O completion that should preempt the
    /// process that just started (the late-collision case).
    fn switch_in_service(&mut self) {
        let pid = match &mut self.cpu {
            Cpu::SwitchingIn { pid, remaining } => {
                if *remaining != 0 {
                    *remaining -= 1;
                    return;
                }
                *pid
            }
            _ => return,
        };

        self.burst_samples.push(0);
        if matches!(self.disc, Discipline::RoundRobin { .. }) {
            self.slice_left = self.disc.time_slice();
        }

        let line = self.dispatch_line(pid);
        self.trace(line);
        self.cpu = Cpu::Bursting { pid };

        if matches!(self.disc, Discipline::Srt { .. }) {
            if let Some(fin) = self.finished_io.take() {
                let remaining = self.procs[pid].tau - self.procs[pid].accrued as i64;
                if remaining > self.procs[fin].tau {
                    let line = format!(
                        "time {}ms: Process {} (tau {}ms) will preempt {} {}",
                        self.clock,
                        self.procs[fin].name,
                        self.procs[fin].tau,
                        self.procs[pid].name,
                        self.queue.render()
                    );
                    self.trace(line);
                    self.preemptions += 1;
                    self.cpu = Cpu::SwitchingOut {
                        outgoing: Some(pid),
                        remaining: self.cfg.half_switch + 1,
                        preempted: true,
                    };
                }
            }
        }
    }

    fn dispatch_line(&self, pid: usize) -> String {
        let p = &self.procs[pid];
        let q = self.queue.render();
        match self.disc {
            Discipline::Fcfs => format!(
                "time {}ms: Process {} started using the CPU for {}ms burst {}",
                self.clock, p.name, p.head_rem, q
            ),
            Discipline::Sjf { .. } => format!(
                "time {}ms: Process {} (tau {}ms) started using the CPU for {}ms burst {}",
                self.clock, p.name, p.tau, p.head_rem, q
            ),
            Discipline::Srt { .. } => format!(
                "time {}ms: Process {} (tau {}ms) started using the CPU with {}ms burst remaining {}",
                self.clock, p.name, p.tau, p.head_rem, q
            ),
            Discipline::RoundRobin { .. } => {
                if p.accrued == 0 {
                    format!(
                        "time {}ms: Process {} started using the CPU for {}ms burst {}",
                        self.clock, p.name, p.head_rem, q
                    )
                } else {
                    format!(
                        "time {}ms: Process {} started using the CPU with {}ms burst remaining {}",
                        self.clock, p.name, p.head_rem, q
                    )
                }
            }
        }
    }

    /// Step 3: a preempting switch-out re-enqueues its process one step
    /// before ordinary switch-out completion would run, so the returning
    /// process is queued ahead of this tick's I/O completions and arrivals.
    fn requeue_preempted(&mut self) {
        if let Cpu::SwitchingOut {
            outgoing: Some(pid),
            remaining: 1,
            preempted: true,
        } = self.cpu
        {
            let key = match self.disc {
                // Remaining-time estimate, not the full prediction.
                Discipline::Srt { .. } => self.procs[pid].tau - self.procs[pid].accrued as i64,
                _ => 0,
            };
            self.queue.push(Entry {
                key,
                pid,
                name: self.procs[pid].name,
            });
            self.procs[pid].waits.push(0);
            self.cpu = Cpu::Idle;
        }
    }

    /// Step 4: tick every pending I/O burst in name order; completions move
    /// to the ready queue and may preempt under SRT.
    fn io_service(&mut self) {
        let pending = self.ios.clone();
        let mut completed = Vec::new();

        for pid in pending {
            self.procs[pid].head_rem -= 1;
            if self.procs[pid].head_rem != 0 {
                continue;
            }
            completed.push(pid);
            {
                let p = &mut self.procs[pid];
                p.cursor += 1;
                p.head_rem = p.bursts[p.cursor];
            }
            self.admit(pid);

            if matches!(self.disc, Discipline::Srt { .. }) {
                self.srt_io_return(pid);
            } else {
                let line = format!(
                    "time {}ms: Process {}{} completed I/O; placed on ready queue {}",
                    self.clock,
                    self.procs[pid].name,
                    self.tau_tag(pid),
                    self.queue.render()
                );
                self.trace(line);
            }
        }

        self.ios.retain(|pid| !completed.contains(pid));
    }

    /// SRT return-from-I/O: preempt a bursting process whose estimated
    /// remaining time exceeds the finisher's tau, or record the finisher
    /// for the switch-in collision check.
    fn srt_io_return(&mut self, pid: usize) {
        if let Cpu::Bursting { pid: running } = self.cpu {
            let remaining = self.procs[running].tau - self.procs[running].accrued as i64;
            if remaining > self.procs[pid].tau {
                let line = format!(
                    "time {}ms: Process {} (tau {}ms) completed I/O; preempting {} {}",
                    self.clock,
                    self.procs[pid].name,
                    self.procs[pid].tau,
                    self.procs[running].name,
                    self.queue.render()
                );
                self.trace(line);
                self.preemptions += 1;
                self.cpu = Cpu::SwitchingOut {
                    outgoing: Some(running),
                    remaining: self.cfg.half_switch + 1,
                    preempted: true,
                };
                return;
            }
        } else if matches!(self.cpu, Cpu::SwitchingIn { .. }) {
            self.finished_io = Some(pid);
        }

        let line = format!(
            "time {}ms: Process {} (tau {}ms) completed I/O; placed on ready queue {}",
            self.clock,
            self.procs[pid].name,
            self.procs[pid].tau,
            self.queue.render()
        );
        self.trace(line);
    }

    /// Step 5: count down pending arrivals in name order.
    fn arrival_service(&mut self) {
        let pending = self.pre_arrival.clone();
        let mut arrived = Vec::new();

        for pid in pending {
            self.procs[pid].arrival_in -= 1;
            if self.procs[pid].arrival_in != 0 {
                continue;
            }
            arrived.push(pid);
            self.admit(pid);
            let line = format!(
                "time {}ms: Process {}{} arrived; placed on ready queue {}",
                self.clock,
                self.procs[pid].name,
                self.tau_tag(pid),
                self.queue.render()
            );
            self.trace(line);
        }

        self.pre_arrival.retain(|pid| !arrived.contains(pid));
    }

    /// Step 6: advance a switch-out; on completion the outgoing process
    /// starts its I/O burst (a terminated process just vanishes).
    fn switch_out_service(&mut self) {
        let done = match &mut self.cpu {
            Cpu::SwitchingOut { remaining, .. } => {
                *remaining -= 1;
                *remaining == 0
            }
            _ => false,
        };
        if !done {
            return;
        }
        if let Cpu::SwitchingOut {
            outgoing: Some(pid),
            ..
        } = self.cpu
        {
            let at = self.ios.partition_point(|&q| q < pid);
            self.ios.insert(at, pid);
        }
        self.cpu = Cpu::Idle;
    }

    /// Step 7: hand the CPU to the queue front and start switching in.
    fn dispatch(&mut self) {
        if self.cpu != Cpu::Idle || self.queue.is_empty() {
            return;
        }
        let e = self.queue.pop().expect("queue checked non-empty");
        self.cpu = Cpu::SwitchingIn {
            pid: e.pid,
            remaining: self.cfg.half_switch - 1,
        };
    }

    /// Step 8: everything still queued waited one more tick.
    fn wait_accounting(&mut self) {
        let queued: Vec<usize> = self.queue.iter().map(|e| e.pid).collect();
        for pid in queued {
            *self.procs[pid]
                .waits
                .last_mut()
                .expect("queued process has an open wait interval") += 1;
        }
    }

    /// Step 9: the run is over once no process is pending anywhere and the
    /// CPU is idle or draining a terminated process.
    fn drained(&self) -> bool {
        self.pre_arrival.is_empty()
            && self.ios.is_empty()
            && self.queue.is_empty()
            && matches!(
                self.cpu,
                Cpu::Idle
                    | Cpu::SwitchingOut {
                        outgoing: None,
                        ..
                    }
            )
    }

    fn tau_tag(&self, pid: usize) -> String {
        if self.disc.uses_tau() {
            format!(" (tau {}ms)", self.procs[pid].tau)
        } else {
            String::new()
        }
    }

    fn trace(&mut self, line: String) {
        if self.cfg.full_trace || self.clock < TRACE_CUTOFF_MS {
            self.trace.push(line);
        }
    }

    fn trace_always(&mut self, line: String) {
        self.trace.push(line);
    }

    /// Every process sits in exactly one place; terminated processes sit
    /// nowhere.
    #[cfg(debug_assertions)]
    fn check_membership(&self) {
        let mut seen = vec![0u8; self.procs.len()];
        for &pid in &self.pre_arrival {
            seen[pid] += 1;
        }
        for &pid in &self.ios {
            seen[pid] += 1;
        }
        for e in self.queue.iter() {
            seen[e.pid] += 1;
        }
        match self.cpu {
            Cpu::SwitchingIn { pid, .. } | Cpu::Bursting { pid } => seen[pid] += 1,
            Cpu::SwitchingOut {
                outgoing: Some(pid),
                ..
            } => seen[pid] += 1,
            _ => {}
        }
        for (pid, &count) in seen.iter().enumerate() {
            assert!(
                count <= 1,
                "process {} tracked in {} places at time {}ms",
                self.procs[pid].name,
                count,
                self.clock
            );
            if self.procs[pid].bursts_left == 0 {
                assert_eq!(
                    count, 0,
                    "terminated process {} still tracked at time {}ms",
                    self.procs[pid].name, self.clock
                );
            }
        }
    }

    fn summarize(&self) -> SimMetrics {
        let half = self.cfg.half_switch;
        let burst_sum: u64 = self.burst_samples.iter().sum();
        let switches = self.burst_samples.len() as u64;
        assert!(switches > 0, "no burst was ever dispatched");

        let wait_sum: u64 = self.procs.iter().flat_map(|p| p.waits.iter().copied()).sum();
        let wait_count: u64 = self.procs.iter().map(|p| p.waits.len() as u64).sum();
        assert!(wait_count > 0, "no wait interval was ever opened");

        let avg_burst = burst_sum as f64 / switches as f64;
        let avg_wait = wait_sum as f64 / wait_count as f64;
        // Context-switch overhead amortized per terminated burst for the
        // preemptive disciplines, per dispatched burst otherwise.
        let denominator = if self.disc.preemptive() {
            self.total_bursts
        } else {
            switches
        };
        let switch_overhead = (2 * half * switches) as f64 / denominator as f64;

        SimMetrics {
            algorithm: self.disc.label().to_string(),
            avg_burst_ms: avg_burst,
            avg_wait_ms: avg_wait,
            avg_turnaround_ms: avg_burst + avg_wait + switch_overhead,
            context_switches: switches,
            preemptions: self.preemptions,
            cpu_utilization: burst_sum as f64 / (self.clock + half) as f64 * 100.0,
        }
    }
}
