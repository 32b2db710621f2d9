//! Convergence driver.
//!
//! A [`Simulation`] owns the topology and both table buffers, and runs rounds
//! until a round changes nothing or the iteration safety bound is passed.
//!
//! ```text
//!              round with changes, iteration ≤ max
//!                 ┌─────────┐
//!                 ▼         │
//!  init ──▶   RUNNING ──────┘
//!               │    │
//!   no changes  │    │  changes, iteration > max
//!               ▼    ▼
//!       CONVERGED    ABORTED_ON_ITERATION_LIMIT
//! ```
//!
//! Hitting the bound is not an error: the run stops and the caller receives
//! the latest, possibly unconverged, tables along with the terminal state.
//! [`SimulationOutcome::into_converged`] turns it into an
//! [`IterationLimitExceeded`] error for callers that want one.

use std::fmt;

use thiserror::Error;

use crate::cost::Cost;
use crate::exchange::{DoubleBuffer, Exchange, RoundDelta};
use crate::policy::ReversePolicy;
use crate::table::{initialize, Route, RoutingTable};
use crate::topology::Topology;

/// Default iteration safety bound.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Simulation parameters, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Advertisement rewrite (split horizon with poisoned reverse, or none).
    pub policy: ReversePolicy,
    /// The run aborts once the iteration counter exceeds this bound while
    /// tables are still changing.
    pub max_iterations: usize,
    /// Record every route improvement in each [`RoundReport`].
    pub trace: bool,
    /// Compute each node's next table on the `rayon` pool.
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            policy: ReversePolicy::Disabled,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            trace: false,
            parallel: false,
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationState {
    /// Tables are still changing.
    #[default]
    Running,
    /// The last round changed nothing.
    Converged,
    /// The iteration bound was passed with tables still changing.
    AbortedOnIterationLimit,
}

impl SimulationState {
    pub fn is_terminal(self) -> bool {
        self != Self::Running
    }
}

impl fmt::Display for SimulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => f.write_str("running"),
            Self::Converged => f.write_str("converged"),
            Self::AbortedOnIterationLimit => f.write_str("aborted on iteration limit"),
        }
    }
}

/// An aborted run, surfaced as an error on request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tables still changing after {iterations} iterations (limit {limit})")]
pub struct IterationLimitExceeded {
    pub iterations: usize,
    pub limit: usize,
}

/// Result of a single round, as observed by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// 1-based round number.
    pub iteration: usize,
    pub delta: RoundDelta,
    /// State after this round.
    pub state: SimulationState,
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Simulation {
    topology: Topology,
    config: SimulationConfig,
    buffers: DoubleBuffer,
    iteration: usize,
    state: SimulationState,
}

impl Simulation {
    /// Initialise tables from `topology`.  Starts in [`SimulationState::Running`].
    pub fn new(topology: Topology, config: SimulationConfig) -> Self {
        let buffers = DoubleBuffer::new(initialize(&topology));
        Self {
            topology,
            config,
            buffers,
            iteration: 0,
            state: SimulationState::Running,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Rounds run so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Tables as of the last completed round.
    pub fn tables(&self) -> &[RoutingTable] {
        self.buffers.current()
    }

    /// Run one round and move the state machine.
    ///
    /// Stepping a terminal simulation still runs a round; a converged
    /// simulation stays converged because the round changes nothing.
    pub fn step(&mut self) -> RoundReport {
        let exchange =
            Exchange::new(&self.topology, self.config.policy).with_trace(self.config.trace);
        let delta = self.buffers.advance(&exchange, self.config.parallel);
        self.iteration += 1;

        self.state = if !delta.changed() {
            SimulationState::Converged
        } else if self.iteration > self.config.max_iterations {
            SimulationState::AbortedOnIterationLimit
        } else {
            SimulationState::Running
        };

        log::debug!(
            "[dv] round {}: {} change(s), {}",
            self.iteration,
            delta.changes,
            self.state
        );
        match self.state {
            SimulationState::Converged => {
                log::info!("[dv] converged after {} round(s)", self.iteration)
            }
            SimulationState::AbortedOnIterationLimit => log::warn!(
                "[dv] stopping after {} rounds (limit {}); tables may not be final",
                self.iteration,
                self.config.max_iterations
            ),
            SimulationState::Running => {}
        }

        RoundReport {
            iteration: self.iteration,
            delta,
            state: self.state,
        }
    }

    /// Step until a terminal state, handing each round to `observer`.
    pub fn run_with<F>(&mut self, mut observer: F) -> SimulationState
    where
        F: FnMut(&RoundReport),
    {
        while !self.state.is_terminal() {
            let report = self.step();
            observer(&report);
        }
        self.state
    }

    /// Step until a terminal state.
    pub fn run(&mut self) -> SimulationState {
        self.run_with(|_| {})
    }

    /// Freeze the current tables.
    pub fn into_outcome(self) -> SimulationOutcome {
        SimulationOutcome {
            state: self.state,
            iterations: self.iteration,
            max_iterations: self.config.max_iterations,
            tables: self.buffers.into_current(),
            topology: self.topology,
        }
    }
}

/// Run `topology` to a terminal state.
pub fn simulate(topology: Topology, config: SimulationConfig) -> SimulationOutcome {
    let mut sim = Simulation::new(topology, config);
    sim.run();
    sim.into_outcome()
}

// ---------------------------------------------------------------------------
// SimulationOutcome
// ---------------------------------------------------------------------------

/// Final tables of a finished (or aborted) run, addressable by node label.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub state: SimulationState,
    pub iterations: usize,
    max_iterations: usize,
    topology: Topology,
    tables: Vec<RoutingTable>,
}

impl SimulationOutcome {
    pub fn is_converged(&self) -> bool {
        self.state == SimulationState::Converged
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn tables(&self) -> &[RoutingTable] {
        &self.tables
    }

    /// Route from `from` to `to`, or `None` if either label is unknown.
    pub fn route(&self, from: &str, to: &str) -> Option<Route> {
        let u = self.topology.id(from)?;
        let d = self.topology.id(to)?;
        Some(self.tables[u.index()].route(d))
    }

    pub fn cost(&self, from: &str, to: &str) -> Option<Cost> {
        self.route(from, to).map(|r| r.cost)
    }

    /// Label of the next hop from `from` towards `to`.
    pub fn next_hop(&self, from: &str, to: &str) -> Option<&str> {
        let hop = self.route(from, to)?.next_hop?;
        Some(self.topology.name(hop))
    }

    /// The outcome itself if converged, otherwise the limit error.
    pub fn into_converged(self) -> Result<Self, IterationLimitExceeded> {
        if self.is_converged() {
            Ok(self)
        } else {
            Err(IterationLimitExceeded {
                iterations: self.iterations,
                limit: self.max_iterations,
            })
        }
    }
}
