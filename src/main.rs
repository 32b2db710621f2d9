//! Entry point for `dvsim`.
//!
//! Loads a topology (or the built-in five-node demo), runs the simulator and
//! prints the final routing tables.  All routing work is delegated to the
//! library; `main.rs` owns only process setup (logging, argument parsing).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use distance_vector::report::{RoundTrace, TablesReport};
use distance_vector::{
    load_topology, ReversePolicy, Simulation, SimulationConfig, SimulationState, Topology,
    DEFAULT_MAX_ITERATIONS,
};

/// Synchronous distance-vector routing simulator.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// JSON topology file; the built-in demo network is used when omitted.
    #[arg(short, long)]
    topology: Option<PathBuf>,

    /// Advertise infinity for routes whose next hop is the receiving neighbor.
    #[arg(short, long)]
    poisoned_reverse: bool,

    /// Iteration safety bound.
    #[arg(short, long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Print every route improvement, round by round.
    #[arg(short, long)]
    verbose: bool,

    /// Compute each round's per-node tables in parallel.
    #[arg(long)]
    parallel: bool,
}

/// Five routers, A through E.
fn demo_topology() -> Result<Topology> {
    let topology = Topology::new(
        ["A", "B", "C", "D", "E"],
        [
            ("A", "B", 1),
            ("A", "C", 4),
            ("B", "C", 2),
            ("B", "D", 7),
            ("C", "E", 3),
            ("D", "E", 1),
        ],
    )?;
    Ok(topology)
}

fn main() -> Result<()> {
    // Initialise env_logger; set RUST_LOG to control verbosity.
    env_logger::init();

    let cli = Cli::parse();

    let topology = match &cli.topology {
        Some(path) => load_topology(path)
            .with_context(|| format!("loading topology from {}", path.display()))?,
        None => demo_topology()?,
    };
    log::info!(
        "Simulating {} node(s), {} link(s)",
        topology.len(),
        topology.link_count()
    );

    let config = SimulationConfig {
        policy: ReversePolicy::from_flag(cli.poisoned_reverse),
        max_iterations: cli.max_iterations,
        trace: cli.verbose,
        parallel: cli.parallel,
    };

    println!("Distance Vector Simulator (synchronous rounds)");
    let mut sim = Simulation::new(topology, config);
    while !sim.state().is_terminal() {
        let report = sim.step();
        if cli.verbose {
            println!();
            print!(
                "{}",
                RoundTrace {
                    topology: sim.topology(),
                    report: &report,
                }
            );
        }
    }

    println!();
    print!(
        "{}",
        TablesReport {
            topology: sim.topology(),
            tables: sim.tables(),
        }
    );

    if sim.state() == SimulationState::AbortedOnIterationLimit {
        eprintln!(
            "warning: tables did not converge within {} iterations",
            sim.config().max_iterations
        );
        std::process::exit(2);
    }
    Ok(())
}
