//! One synchronous round of vector exchange.
//!
//! Every node receives the vector each neighbor advertises and relaxes its
//! own table against it (Bellman-Ford).  The round reads only the frozen
//! previous-round tables and writes only the node's own next table:
//!
//! ```text
//!   current (frozen)                     next (being built)
//!  ┌────────────────┐  advertise(v → u)  ┌────────────────┐
//!  │ table[v]       │───────────────────▶│ table[u]       │  relax
//!  │ table[u]       │───── seed ────────▶│                │
//!  └────────────────┘                    └────────────────┘
//!            ▲                                    │
//!            └──────────── swap (barrier) ────────┘
//! ```
//!
//! Within a node's computation updates accumulate: a candidate is compared
//! with the best cost found so far this round, while advertisements always
//! come from the previous round.  Because each node writes only its own
//! table, the per-node work may run on the `rayon` pool; the swap after the
//! parallel section is the round barrier.

use rayon::prelude::*;

use crate::cost::Cost;
use crate::policy::ReversePolicy;
use crate::table::RoutingTable;
use crate::topology::{NodeId, Topology};

// ---------------------------------------------------------------------------
// Improvement / RoundDelta
// ---------------------------------------------------------------------------

/// A single route improvement observed during a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Improvement {
    /// Node whose table changed.
    pub node: NodeId,
    pub destination: NodeId,
    /// Neighbor whose advertisement produced the new route.
    pub via: NodeId,
    pub cost: Cost,
}

/// What changed during one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundDelta {
    /// Number of accepted route updates across all nodes.
    pub changes: usize,
    /// Every update, in node then neighbor then destination order.
    ///
    /// Only filled when tracing is enabled.
    pub improvements: Vec<Improvement>,
}

impl RoundDelta {
    pub fn changed(&self) -> bool {
        self.changes > 0
    }

    fn merge(mut self, other: RoundDelta) -> RoundDelta {
        self.changes += other.changes;
        self.improvements.extend(other.improvements);
        self
    }
}

// ---------------------------------------------------------------------------
// Exchange
// ---------------------------------------------------------------------------

/// Round parameters that stay fixed for a whole simulation.
#[derive(Debug, Clone, Copy)]
pub struct Exchange<'a> {
    pub topology: &'a Topology,
    pub policy: ReversePolicy,
    /// Record every [`Improvement`] in the returned delta.
    pub trace: bool,
}

impl<'a> Exchange<'a> {
    pub fn new(topology: &'a Topology, policy: ReversePolicy) -> Self {
        Self {
            topology,
            policy,
            trace: false,
        }
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Compute every node's next table from `current`, one node after another.
    ///
    /// `next` must hold one table per node in node order; its previous
    /// contents are overwritten.
    pub fn round(&self, current: &[RoutingTable], next: &mut [RoutingTable]) -> RoundDelta {
        debug_assert_eq!(current.len(), next.len());
        next.iter_mut()
            .map(|table| self.relax(current, table))
            .fold(RoundDelta::default(), RoundDelta::merge)
    }

    /// Same as [`round`](Self::round) with nodes spread over the `rayon` pool.
    ///
    /// Produces identical tables and trace order.
    pub fn par_round(&self, current: &[RoutingTable], next: &mut [RoutingTable]) -> RoundDelta {
        debug_assert_eq!(current.len(), next.len());
        let deltas: Vec<RoundDelta> = next
            .par_iter_mut()
            .map(|table| self.relax(current, table))
            .collect();
        deltas
            .into_iter()
            .fold(RoundDelta::default(), RoundDelta::merge)
    }

    /// Rebuild `table` for its owner from the frozen `current` tables.
    fn relax(&self, current: &[RoutingTable], table: &mut RoutingTable) -> RoundDelta {
        let u = table.owner();
        let previous = &current[u.index()];
        table.clone_from(previous);

        let mut delta = RoundDelta::default();
        for &(v, link) in self.topology.neighbors(u) {
            // Unreachable neighbor contributes nothing this round.
            if previous.cost(v).is_infinite() {
                continue;
            }
            let advertisement = self.policy.advertise(&current[v.index()], u);
            for (destination, advertised) in advertisement.iter() {
                let candidate = Cost::link(link) + advertised;
                if table.apply_update(destination, candidate, v) {
                    log::trace!(
                        "[dv] {} → {} via {} cost {}",
                        self.topology.name(u),
                        self.topology.name(destination),
                        self.topology.name(v),
                        candidate
                    );
                    delta.changes += 1;
                    if self.trace {
                        delta.improvements.push(Improvement {
                            node: u,
                            destination,
                            via: v,
                            cost: candidate,
                        });
                    }
                }
            }
        }
        delta
    }
}

// ---------------------------------------------------------------------------
// DoubleBuffer
// ---------------------------------------------------------------------------

/// Two table generations: `current` is read-only during a round, `next` is
/// written, and the two swap at the round boundary.
#[derive(Debug, Clone)]
pub struct DoubleBuffer {
    current: Vec<RoutingTable>,
    next: Vec<RoutingTable>,
}

impl DoubleBuffer {
    pub fn new(initial: Vec<RoutingTable>) -> Self {
        Self {
            next: initial.clone(),
            current: initial,
        }
    }

    /// Tables as of the last completed round.
    pub fn current(&self) -> &[RoutingTable] {
        &self.current
    }

    pub fn into_current(self) -> Vec<RoutingTable> {
        self.current
    }

    /// Run one round and publish its result.
    pub fn advance(&mut self, exchange: &Exchange<'_>, parallel: bool) -> RoundDelta {
        let delta = if parallel {
            exchange.par_round(&self.current, &mut self.next)
        } else {
            exchange.round(&self.current, &mut self.next)
        };
        std::mem::swap(&mut self.current, &mut self.next);
        delta
    }
}
