//! Four-policy scheduling run
//!
//! Generates one seeded workload and simulates it under FCFS, SJF, SRT,
//! and RR, printing every event trace and writing the metrics blocks to
//! simout.txt plus a machine-readable simout.json.

use sim::{Discipline, RrInsert, SimConfig, SimMetrics};
use std::fs;
use std::io;
use workload::WorkloadParams;

fn usage() -> ! {
    eprintln!("Usage: opsys <n> <seed> <lambda> <tail> <t_cs> <alpha> <t_slice> [END|BEGINNING]");
    eprintln!("  n        number of processes (1..=26)");
    eprintln!("  seed     workload generator seed");
    eprintln!("  lambda   exponential distribution rate");
    eprintln!("  tail     upper bound for exponential samples");
    eprintln!("  t_cs     context switch time in ms (positive, even)");
    eprintln!("  alpha    tau smoothing factor in [0, 1]");
    eprintln!("  t_slice  RR time slice in ms");
    std::process::exit(1);
}

fn parse<T: std::str::FromStr>(args: &[String], idx: usize) -> T {
    match args.get(idx).map(|s| s.parse()) {
        Some(Ok(v)) => v,
        _ => usage(),
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 8 || args.len() > 9 {
        usage();
    }

    let n: usize = parse(&args, 1);
    let seed: u64 = parse(&args, 2);
    let lambda: f64 = parse(&args, 3);
    let tail: f64 = parse(&args, 4);
    let t_cs: u64 = parse(&args, 5);
    let alpha: f64 = parse(&args, 6);
    let t_slice: u64 = parse(&args, 7);
    let insert: RrInsert = if args.len() == 9 {
        parse(&args, 8)
    } else {
        RrInsert::End
    };

    if n == 0 || n > 26 || lambda <= 0.0 || t_cs == 0 || t_cs % 2 != 0 {
        usage();
    }
    if !(0.0..=1.0).contains(&alpha) || t_slice == 0 {
        usage();
    }

    let processes = workload::generate(&WorkloadParams {
        n,
        seed,
        lambda,
        tail,
    });
    let tau_init = (1.0 / lambda).ceil() as i64;
    let config = SimConfig {
        half_switch: t_cs / 2,
        full_trace: false,
    };

    let disciplines = [
        Discipline::Fcfs,
        Discipline::Sjf { tau_init, alpha },
        Discipline::Srt { tau_init, alpha },
        Discipline::RoundRobin {
            time_slice: t_slice,
            insert,
        },
    ];

    let mut all_metrics: Vec<SimMetrics> = Vec::with_capacity(disciplines.len());
    for disc in disciplines {
        // Each trace already ends with a blank separator line.
        let run = sim::run(disc, &processes, &config);
        for line in &run.trace {
            println!("{line}");
        }
        all_metrics.push(run.metrics);
    }

    let report: String = all_metrics.iter().map(|m| m.to_string()).collect();
    fs::write("simout.txt", report)?;

    let json = serde_json::to_string_pretty(&all_metrics)?;
    fs::write("simout.json", json)?;

    Ok(())
}
