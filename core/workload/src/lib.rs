//! Seeded Workload Generation
//!
//! Produces the fixed process population a simulation run schedules:
//! each process has an arrival time and an alternating CPU/IO burst list,
//! all drawn from a 48-bit LCG so identical parameters always yield an
//! identical workload.

use serde::{Deserialize, Serialize};

const LCG_MULTIPLIER: u64 = 0x5DEE_CE66D;
const LCG_INCREMENT: u64 = 0xB;
const LCG_MASK: u64 = (1 << 48) - 1;

/// 48-bit linear congruential generator matching C's drand48().
#[derive(Debug, Clone)]
pub struct Rand48 {
    x: u64,
}

impl Rand48 {
    pub fn new(seed: u64) -> Self {
        Self {
            x: ((seed << 16) + 0x330E) & LCG_MASK,
        }
    }

    /// Uniform sample in [0, 1).
    pub fn drand48(&mut self) -> f64 {
        self.x = LCG_MULTIPLIER
            .wrapping_mul(self.x)
            .wrapping_add(LCG_INCREMENT)
            & LCG_MASK;
        self.x as f64 / (1u64 << 48) as f64
    }

    /// Exponential sample with rate `lambda`, rejecting values above `tail`.
    pub fn next_exp(&mut self, lambda: f64, tail: f64) -> f64 {
        loop {
            let sample = -self.drand48().ln() / lambda;
            if sample <= tail {
                return sample;
            }
        }
    }
}

/// Generator inputs. Fixed inputs produce a byte-identical workload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorkloadParams {
    /// Number of processes (at most 26, named A..Z).
    pub n: usize,
    pub seed: u64,
    /// Rate of the exponential distribution; 1/lambda is the mean.
    pub lambda: f64,
    /// Upper bound for exponential samples; larger draws are rejected.
    pub tail: f64,
}

/// Static workload data for one process.
///
/// `bursts` strictly alternates CPU, IO, CPU, ..., CPU: odd length, first
/// and last entries are CPU bursts. The list is immutable; consumption
/// state (how much of which burst remains) belongs to the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    pub name: char,
    pub arrival: u64,
    pub bursts: Vec<u64>,
}

impl Process {
    /// Number of CPU bursts in the list.
    pub fn cpu_burst_count(&self) -> usize {
        self.bursts.len() / 2 + 1
    }

    /// Sum of all CPU burst durations.
    pub fn total_cpu_time(&self) -> u64 {
        self.bursts.iter().step_by(2).sum()
    }

    /// Sum of all IO burst durations.
    pub fn total_io_time(&self) -> u64 {
        self.bursts.iter().skip(1).step_by(2).sum()
    }
}

/// Generate `params.n` processes in name order A, B, C, ...
///
/// Per process: arrival = floor(exp sample); burst count =
/// ceil(uniform * 100); CPU burst lengths = ceil(exp sample); IO burst
/// lengths = ceil(exp sample) * 10.
pub fn generate(params: &WorkloadParams) -> Vec<Process> {
    assert!(params.n <= 26, "at most 26 processes (named A..Z)");
    assert!(params.lambda > 0.0, "lambda must be positive");

    let mut rand = Rand48::new(params.seed);
    let mut processes = Vec::with_capacity(params.n);

    for i in 0..params.n {
        let name = char::from(b'A' + i as u8);
        let arrival = rand.next_exp(params.lambda, params.tail).floor() as u64;
        let num_bursts = (rand.drand48() * 100.0).ceil() as usize;
        debug_assert!(num_bursts >= 1);

        let mut bursts = Vec::with_capacity(2 * num_bursts - 1);
        for _ in 0..num_bursts.saturating_sub(1) {
            bursts.push(rand.next_exp(params.lambda, params.tail).ceil() as u64);
            bursts.push(rand.next_exp(params.lambda, params.tail).ceil() as u64 * 10);
        }
        bursts.push(rand.next_exp(params.lambda, params.tail).ceil() as u64);

        processes.push(Process {
            name,
            arrival,
            bursts,
        });
    }

    processes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> WorkloadParams {
        WorkloadParams {
            n: 4,
            seed: 19,
            lambda: 0.01,
            tail: 3000.0,
        }
    }

    #[test]
    fn drand48_stays_in_unit_interval() {
        let mut rand = Rand48::new(42);
        for _ in 0..10_000 {
            let u = rand.drand48();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn identical_seeds_identical_streams() {
        let mut a = Rand48::new(7);
        let mut b = Rand48::new(7);
        for _ in 0..1000 {
            assert_eq!(a.drand48().to_bits(), b.drand48().to_bits());
        }
    }

    #[test]
    fn exp_samples_respect_tail_bound() {
        let mut rand = Rand48::new(3);
        for _ in 0..1000 {
            assert!(rand.next_exp(0.001, 512.0) <= 512.0);
        }
    }

    #[test]
    fn generate_is_deterministic() {
        let first = generate(&params());
        let second = generate(&params());
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.arrival, b.arrival);
            assert_eq!(a.bursts, b.bursts);
        }
    }

    #[test]
    fn generated_shape_is_well_formed() {
        let processes = generate(&params());
        assert_eq!(processes.len(), 4);

        let mut expected = 'A';
        for p in &processes {
            assert_eq!(p.name, expected);
            expected = char::from(p.name as u8 + 1);

            // Odd length, alternating CPU/IO, CPU first and last.
            assert_eq!(p.bursts.len() % 2, 1);
            assert_eq!(p.bursts.len(), 2 * p.cpu_burst_count() - 1);
            for (i, &burst) in p.bursts.iter().enumerate() {
                assert!(burst >= 1);
                if i % 2 == 1 {
                    assert_eq!(burst % 10, 0, "IO bursts are multiples of 10");
                }
            }
            assert!(p.cpu_burst_count() <= 100);
        }
    }

    #[test]
    fn totals_split_cpu_and_io() {
        let p = Process {
            name: 'A',
            arrival: 0,
            bursts: vec![5, 20, 3, 10, 7],
        };
        assert_eq!(p.cpu_burst_count(), 3);
        assert_eq!(p.total_cpu_time(), 15);
        assert_eq!(p.total_io_time(), 30);
    }
}
