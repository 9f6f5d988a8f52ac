//! RR time-slice sweep
//!
//! Runs RR over one seeded workload across a range of time slices and
//! both queue insertion ends, writing one CSV row of metrics per run.

use serde::Serialize;
use sim::{Discipline, RrInsert, SimConfig};
use std::error::Error;
use workload::WorkloadParams;

const SLICES: &[u64] = &[2, 4, 8, 16, 32, 64, 128, 256];

#[derive(Serialize)]
struct Row {
    time_slice: u64,
    rr_add: String,
    avg_burst_ms: f64,
    avg_wait_ms: f64,
    avg_turnaround_ms: f64,
    context_switches: u64,
    preemptions: u64,
    cpu_utilization: f64,
}

fn usage() -> ! {
    eprintln!("Usage: sweep <n> <seed> <lambda> <tail> <t_cs> <out.csv>");
    std::process::exit(1);
}

fn parse<T: std::str::FromStr>(args: &[String], idx: usize) -> T {
    match args.get(idx).map(|s| s.parse()) {
        Some(Ok(v)) => v,
        _ => usage(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 7 {
        usage();
    }

    let n: usize = parse(&args, 1);
    let seed: u64 = parse(&args, 2);
    let lambda: f64 = parse(&args, 3);
    let tail: f64 = parse(&args, 4);
    let t_cs: u64 = parse(&args, 5);
    let out_path = &args[6];

    if n == 0 || n > 26 || lambda <= 0.0 || t_cs == 0 || t_cs % 2 != 0 {
        usage();
    }

    let processes = workload::generate(&WorkloadParams {
        n,
        seed,
        lambda,
        tail,
    });
    let config = SimConfig {
        half_switch: t_cs / 2,
        full_trace: false,
    };

    let mut writer = csv::Writer::from_path(out_path)?;
    for &time_slice in SLICES {
        for insert in [RrInsert::End, RrInsert::Beginning] {
            let run = sim::run(
                Discipline::RoundRobin { time_slice, insert },
                &processes,
                &config,
            );
            let m = run.metrics;
            writer.serialize(Row {
                time_slice,
                rr_add: insert.to_string(),
                avg_burst_ms: m.avg_burst_ms,
                avg_wait_ms: m.avg_wait_ms,
                avg_turnaround_ms: m.avg_turnaround_ms,
                context_switches: m.context_switches,
                preemptions: m.preemptions,
                cpu_utilization: m.cpu_utilization,
            })?;
        }
    }
    writer.flush()?;

    eprintln!("wrote {} rows to {}", SLICES.len() * 2, out_path);
    Ok(())
}
