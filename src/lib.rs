//! `distance-vector`: a synchronous distance-vector routing simulator.
//!
//! # Architecture
//!
//! ```text
//!  ┌──────────┐  initialize   ┌───────────────┐
//!  │ Topology │──────────────▶│ RoutingTables │ (current / next buffers)
//!  └────┬─────┘               └───────┬───────┘
//!       │ neighbors                   │ frozen snapshot
//!  ┌────▼─────────────────────────────▼────┐
//!  │   Exchange (one round)                │◀── ReversePolicy
//!  │   advertise → relax → swap            │
//!  └────┬──────────────────────────────────┘
//!       │ RoundDelta
//!  ┌────▼──────┐
//!  │ Simulation│  Running → Converged | AbortedOnIterationLimit
//!  └───────────┘
//! ```
//!
//! Each module has a single responsibility:
//! - [`cost`]      - path costs with a saturating infinity
//! - [`topology`]  - validated node set and symmetric links
//! - [`table`]     - per-node routes and the strict-improvement update rule
//! - [`policy`]    - advertised vectors, optionally poisoned
//! - [`exchange`]  - one lock-step round over double-buffered tables
//! - [`driver`]    - convergence state machine and final outcome
//! - [`report`]    - text rendering of tables and round traces
//! - [`input`]     - JSON topology files

pub mod cost;
pub mod driver;
pub mod exchange;
pub mod input;
pub mod policy;
pub mod report;
pub mod table;
pub mod topology;

pub use cost::Cost;
pub use driver::{
    simulate, IterationLimitExceeded, RoundReport, Simulation, SimulationConfig,
    SimulationOutcome, SimulationState, DEFAULT_MAX_ITERATIONS,
};
pub use exchange::{Improvement, RoundDelta};
pub use input::{load_topology, InputError, TopologyFile};
pub use policy::{Advertisement, ReversePolicy};
pub use table::{Route, RoutingTable};
pub use topology::{NodeId, Topology, TopologyError};
