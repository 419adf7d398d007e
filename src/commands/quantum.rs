//! CLI entry for Grover runs.
//!
//! Resolves parameters (flags over config file over built-ins), assembles
//! the circuit, evolves it on the statevector engine and prints what a
//! histogram or Bloch-sphere view would consume.
//!
//! Examples:
//!   cargo run -- run -n 2 -t 11 --shots 1000 --seed 7
//!   cargo run -- circuit -n 3 -t 101 --optimal

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::cli::SearchArgs;
use crate::config::GroverConfig;
use crate::core::quantum::{
    bitstring, optimal_iterations, parse_bitstring, success_probability, Circuit, Counts,
    DriftPolicy, GroverBuilder, StateVectorEngine,
};

const BAR_WIDTH: usize = 40;

#[derive(Clone, Debug, PartialEq)]
pub struct RunSettings {
    pub qubits: usize,
    pub target: String,
    pub iterations: usize,
    pub shots: usize,
    pub seed: Option<u64>,
    pub tolerance: f64,
    pub drift_policy: DriftPolicy,
}

impl RunSettings {
    pub fn resolve(
        cfg: &GroverConfig,
        search: &SearchArgs,
        shots: Option<usize>,
        seed: Option<u64>,
    ) -> Result<Self> {
        let qubits = search.qubits.unwrap_or(cfg.qubits);
        let iterations = if search.optimal {
            optimal_iterations(qubits).context("choosing the optimal iteration count")?
        } else {
            search.iterations.or(cfg.iterations).unwrap_or(1)
        };
        Ok(Self {
            qubits,
            target: search.target.clone().unwrap_or_else(|| cfg.target.clone()),
            iterations,
            shots: shots.unwrap_or(cfg.shots),
            seed: seed.or(cfg.seed),
            tolerance: cfg.tolerance,
            drift_policy: cfg.drift_policy,
        })
    }

    pub fn circuit(&self) -> Result<Circuit> {
        GroverBuilder::new(self.qubits, self.target.as_str())
            .iterations(self.iterations)
            .build()
            .with_context(|| {
                format!(
                    "building grover circuit for {} qubits, target '{}'",
                    self.qubits, self.target
                )
            })
    }

    /// Evolves `|0…0⟩` through the circuit minus its measurement.
    pub fn evolve(&self, circuit: &Circuit) -> Result<StateVectorEngine> {
        let engine = StateVectorEngine::initialize(self.qubits)?
            .with_tolerance(self.tolerance)
            .with_policy(self.drift_policy);
        engine
            .evolve(&circuit.without_measurement())
            .context("evolving statevector")
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct QubitReport {
    pub qubit: usize,
    pub bloch: [f64; 3],
    pub purity: f64,
    /// Probability of reading 1 on this qubit.
    pub p1: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub qubits: usize,
    pub target: String,
    pub iterations: usize,
    pub shots: usize,
    pub seed: Option<u64>,
    pub gates: usize,
    /// `|amplitude(target)|²` of the evolved state.
    pub target_probability: f64,
    /// Closed-form single-target value for the same iteration count.
    pub expected_probability: f64,
    pub reduced: Vec<QubitReport>,
    pub counts: Counts,
}

pub fn run_report(settings: &RunSettings) -> Result<RunReport> {
    let circuit = settings.circuit()?;
    let state = settings.evolve(&circuit)?;
    let target_index = parse_bitstring(&settings.target, settings.qubits)?;
    let target_probability = state
        .amplitude(target_index)
        .map(|z| z.norm_sqr())
        .unwrap_or(0.0);

    let reduced = state
        .reduced_states()
        .into_iter()
        .enumerate()
        .map(|(qubit, rho)| QubitReport {
            qubit,
            bloch: rho.bloch_vector(),
            purity: rho.purity(),
            p1: rho[(1, 1)].re,
        })
        .collect();

    let counts = state
        .sample_counts(settings.shots, settings.seed)
        .context("sampling measurement counts")?;

    info!(
        qubits = settings.qubits,
        iterations = settings.iterations,
        shots = settings.shots,
        target_probability,
        "grover run complete"
    );

    Ok(RunReport {
        qubits: settings.qubits,
        target: settings.target.clone(),
        iterations: settings.iterations,
        shots: settings.shots,
        seed: settings.seed,
        gates: circuit.gate_count(),
        target_probability,
        expected_probability: success_probability(settings.qubits, settings.iterations)?,
        reduced,
        counts,
    })
}

pub fn run(settings: &RunSettings, json: bool) -> Result<()> {
    let report = run_report(settings)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} n={} target={} iterations={} gates={}",
        "grover".bright_cyan().bold(),
        report.qubits,
        report.target.bright_white(),
        report.iterations,
        report.gates
    );
    println!(
        "P(target) = {:.6} (expected {:.6})",
        report.target_probability, report.expected_probability
    );

    println!("{}", "reduced qubit states".bright_white());
    for q in &report.reduced {
        let [x, y, z] = q.bloch;
        println!(
            "  q{:<3} bloch=({:+.4}, {:+.4}, {:+.4}) purity={:.4} P(1)={:.4}",
            q.qubit, x, y, z, q.purity, q.p1
        );
    }

    println!("{} ({} shots)", "counts".bright_white(), report.shots);
    let peak = report
        .counts
        .most_frequent()
        .map(|(_, c)| c)
        .unwrap_or(1)
        .max(1);
    for (bits, count) in report.counts.iter() {
        let len = (count * BAR_WIDTH + peak - 1) / peak;
        let bar = "#".repeat(len);
        if bits == report.target {
            println!("  {} {:>7} {}", bits.bright_green().bold(), count, bar.green());
        } else {
            println!("  {} {:>7} {}", bits, count, bar.dimmed());
        }
    }
    Ok(())
}

pub fn print_circuit(settings: &RunSettings) -> Result<()> {
    let circuit = settings.circuit()?;
    print!("{circuit}");
    Ok(())
}

pub fn print_state(settings: &RunSettings, min_prob: f64) -> Result<()> {
    let circuit = settings.circuit()?;
    let state = settings.evolve(&circuit)?;
    let width = settings.qubits.max(5);
    println!("{:<width$}  {:>12} {:>12} {:>10}", "basis", "re", "im", "prob");
    for (idx, amp) in state.amplitudes().iter().enumerate() {
        let p = amp.norm_sqr();
        if p < min_prob {
            continue;
        }
        println!(
            "{:<width$}  {:>12.8} {:>12.8} {:>10.6}",
            bitstring(idx, settings.qubits),
            amp.re,
            amp.im,
            p,
        );
    }
    Ok(())
}
