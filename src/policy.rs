//! Advertisement shaping.
//!
//! When a node sends its distance vector to a neighbor it may rewrite some
//! entries first.  [`ReversePolicy`] selects the rewrite:
//!
//! | Policy             | Advertised cost for destination `d` to receiver `r` |
//! |--------------------|------------------------------------------------------|
//! | `Disabled`         | sender's cost to `d`, unchanged                      |
//! | `PoisonedReverse`  | infinity if sender's next hop to `d` is `r`, else the true cost |
//!
//! Poisoning applies only when the next hop is exactly the receiver.  It
//! shapes what each round advertises; without failure injection it does not
//! change the converged costs.
//!
//! Both variants are pure functions of the sender's previous-round table and
//! the receiver's identity.

use crate::cost::Cost;
use crate::table::RoutingTable;
use crate::topology::NodeId;

/// Rewrite applied to every advertised vector.  Fixed for a whole simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReversePolicy {
    /// Advertise true costs unconditionally.
    #[default]
    Disabled,
    /// Advertise infinity for routes whose next hop is the receiver.
    PoisonedReverse,
}

impl ReversePolicy {
    /// `PoisonedReverse` when `enabled`, otherwise `Disabled`.
    pub fn from_flag(enabled: bool) -> Self {
        if enabled {
            Self::PoisonedReverse
        } else {
            Self::Disabled
        }
    }

    pub fn is_poisoning(self) -> bool {
        self == Self::PoisonedReverse
    }

    /// Cost `sender` advertises to `receiver` for `destination`.
    pub fn advertised_cost(
        self,
        sender: &RoutingTable,
        receiver: NodeId,
        destination: NodeId,
    ) -> Cost {
        let route = sender.route(destination);
        match self {
            Self::PoisonedReverse if route.next_hop == Some(receiver) => Cost::INFINITY,
            _ => route.cost,
        }
    }

    /// Full vector `sender` advertises to `receiver`.
    pub fn advertise(self, sender: &RoutingTable, receiver: NodeId) -> Advertisement {
        let costs = sender
            .routes()
            .map(|(destination, _)| self.advertised_cost(sender, receiver, destination))
            .collect();
        Advertisement {
            sender: sender.owner(),
            receiver,
            costs,
        }
    }
}

/// Distance vector sent from one node to one neighbor during a round.
///
/// Ephemeral: built from the previous-round snapshot and dropped once the
/// receiver has relaxed against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advertisement {
    pub sender: NodeId,
    pub receiver: NodeId,
    costs: Vec<Cost>,
}

impl Advertisement {
    pub fn cost(&self, destination: NodeId) -> Cost {
        self.costs[destination.index()]
    }

    /// `(destination, advertised cost)` pairs in destination order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Cost)> + '_ {
        self.costs
            .iter()
            .enumerate()
            .map(|(i, &c)| (NodeId::from_index(i), c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::initialize;
    use crate::topology::Topology;

    /// X routes to Z through Y.
    fn chain() -> (Topology, [NodeId; 3]) {
        let t = Topology::new(["X", "Y", "Z"], [("X", "Y", 1), ("Y", "Z", 1)]).unwrap();
        let ids = ["X", "Y", "Z"].map(|n| t.id(n).unwrap());
        (t, ids)
    }

    fn table_of_x(t: &Topology, [x, y, z]: [NodeId; 3]) -> RoutingTable {
        let mut table = initialize(t).swap_remove(x.index());
        assert!(table.apply_update(z, Cost::link(2), y));
        table
    }

    #[test]
    fn poisons_routes_through_the_receiver() {
        let (t, ids @ [x, y, z]) = chain();
        let table = table_of_x(&t, ids);

        let adv = ReversePolicy::PoisonedReverse.advertise(&table, y);
        assert_eq!(adv.sender, x);
        assert_eq!(adv.receiver, y);
        assert_eq!(adv.cost(z), Cost::INFINITY);
        // X's route to Y also goes through Y.
        assert_eq!(adv.cost(y), Cost::INFINITY);
        assert_eq!(adv.cost(x), Cost::ZERO);
    }

    #[test]
    fn disabled_advertises_true_costs() {
        let (t, ids @ [x, y, z]) = chain();
        let table = table_of_x(&t, ids);

        let adv = ReversePolicy::Disabled.advertise(&table, y);
        assert_eq!(adv.cost(z), Cost::link(2));
        assert_eq!(adv.cost(y), Cost::link(1));
        assert_eq!(adv.cost(x), Cost::ZERO);
    }

    #[test]
    fn other_receivers_see_true_costs() {
        let (t, ids @ [_, _, z]) = chain();
        let table = table_of_x(&t, ids);

        // None of X's routes go through Z.
        let adv = ReversePolicy::PoisonedReverse.advertise(&table, z);
        let costs: Vec<_> = adv.iter().map(|(_, c)| c).collect();
        assert_eq!(costs, [Cost::ZERO, Cost::link(1), Cost::link(2)]);
    }

    #[test]
    fn flag_selects_policy() {
        assert_eq!(ReversePolicy::from_flag(true), ReversePolicy::PoisonedReverse);
        assert_eq!(ReversePolicy::from_flag(false), ReversePolicy::default());
        assert!(!ReversePolicy::Disabled.is_poisoning());
    }
}
