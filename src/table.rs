//! Per-node routing state.
//!
//! Each node owns one [`RoutingTable`]: a dense vector of [`Route`]s indexed
//! by destination [`NodeId`].  Tables are created by [`initialize`] and only
//! ever improved through [`RoutingTable::apply_update`].
//!
//! # Invariants
//!
//! - The self route is `(0, self)` and never changes.
//! - A route with infinite cost has no next hop; a finite route always has one.
//! - Costs only decrease.  Equal-cost candidates never replace the current
//!   next hop (first improvement wins).

use crate::cost::Cost;
use crate::topology::{NodeId, Topology};

/// Best known way to reach one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub cost: Cost,
    /// Neighbor to forward through; `None` while the destination is unreachable.
    pub next_hop: Option<NodeId>,
}

impl Route {
    pub const UNREACHABLE: Route = Route {
        cost: Cost::INFINITY,
        next_hop: None,
    };

    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Routing table of a single node.
#[derive(Debug, PartialEq, Eq)]
pub struct RoutingTable {
    owner: NodeId,
    routes: Vec<Route>,
}

impl Clone for RoutingTable {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner,
            routes: self.routes.clone(),
        }
    }

    // Reuses the route buffer; rounds reseed every table this way.
    fn clone_from(&mut self, source: &Self) {
        self.owner = source.owner;
        self.routes.clone_from(&source.routes);
    }
}

impl RoutingTable {
    /// Table for `owner` in a network of `len` nodes: only the self route is known.
    pub fn new(owner: NodeId, len: usize) -> Self {
        let mut routes = vec![Route::UNREACHABLE; len];
        routes[owner.index()] = Route {
            cost: Cost::ZERO,
            next_hop: Some(owner),
        };
        Self { owner, routes }
    }

    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn route(&self, destination: NodeId) -> Route {
        self.routes[destination.index()]
    }

    pub fn cost(&self, destination: NodeId) -> Cost {
        self.routes[destination.index()].cost
    }

    pub fn next_hop(&self, destination: NodeId) -> Option<NodeId> {
        self.routes[destination.index()].next_hop
    }

    /// `(destination, route)` pairs in destination order.
    pub fn routes(&self) -> impl Iterator<Item = (NodeId, &Route)> {
        self.routes
            .iter()
            .enumerate()
            .map(|(i, r)| (NodeId::from_index(i), r))
    }

    /// Replace the route to `destination` when `candidate` is strictly cheaper.
    ///
    /// Returns `true` if the table changed.  The self route and infinite
    /// candidates are never installed.
    pub fn apply_update(&mut self, destination: NodeId, candidate: Cost, via: NodeId) -> bool {
        if destination == self.owner || candidate.is_infinite() {
            return false;
        }
        let slot = &mut self.routes[destination.index()];
        if candidate < slot.cost {
            *slot = Route {
                cost: candidate,
                next_hop: Some(via),
            };
            true
        } else {
            false
        }
    }
}

/// One table per node: self at zero, direct neighbors at link cost, the rest unreachable.
pub fn initialize(topology: &Topology) -> Vec<RoutingTable> {
    topology
        .nodes()
        .map(|u| {
            let mut table = RoutingTable::new(u, topology.len());
            for &(v, cost) in topology.neighbors(u) {
                table.apply_update(v, Cost::link(cost), v);
            }
            table
        })
        .collect()
}
