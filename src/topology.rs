//! Static network description.
//!
//! A [`Topology`] is built once from a node list and a list of undirected,
//! weighted links, validated, and never mutated afterwards.  Node labels are
//! interned into dense [`NodeId`] indices at construction so every other
//! module can address per-node state with plain `Vec` indexing.
//!
//! # Validation rules
//!
//! - Node labels are non-empty and unique.
//! - Every link endpoint names a declared node; self-links are rejected.
//! - Link cost is strictly positive and fits the finite range of [`Cost`].
//! - At most one link per unordered pair.  Any repeat is rejected, even with
//!   an identical cost.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::cost::Cost;

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Dense index of a node inside one [`Topology`].
///
/// Only meaningful for the topology that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Malformed topology input.  Raised only at construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("node label must not be empty")]
    EmptyNodeId,
    #[error("node '{0}' declared more than once")]
    DuplicateNode(String),
    #[error("link {from}-{to} references unknown node '{unknown}'")]
    UnknownNode {
        from: String,
        to: String,
        unknown: String,
    },
    #[error("link {0}-{0} connects a node to itself")]
    SelfLoop(String),
    #[error("link {from}-{to} has non-positive cost {cost}")]
    NonPositiveCost { from: String, to: String, cost: i64 },
    #[error("link {from}-{to} cost {cost} exceeds the maximum link cost {max}")]
    CostOutOfRange {
        from: String,
        to: String,
        cost: i64,
        max: u32,
    },
    #[error("link {from}-{to} given more than once")]
    DuplicateLink { from: String, to: String },
}

// ---------------------------------------------------------------------------
// Topology
// ---------------------------------------------------------------------------

/// Validated node set plus symmetric adjacency.
#[derive(Debug, Clone)]
pub struct Topology {
    names: Vec<String>,
    index: HashMap<String, NodeId>,
    /// Per node, `(neighbor, link cost)` in link declaration order.
    neighbors: Vec<Vec<(NodeId, u32)>>,
    link_count: usize,
}

impl Topology {
    /// Build a topology from node labels and `(u, v, cost)` link triples.
    ///
    /// Costs are taken as `i64` so callers feeding untrusted input get a
    /// [`TopologyError::NonPositiveCost`] rather than a conversion failure.
    pub fn new<N, L, S>(nodes: N, links: L) -> Result<Self, TopologyError>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        L: IntoIterator<Item = (S, S, i64)>,
        S: AsRef<str>,
    {
        let mut names = Vec::new();
        let mut index = HashMap::new();
        for name in nodes {
            let name: String = name.into();
            if name.is_empty() {
                return Err(TopologyError::EmptyNodeId);
            }
            if index.contains_key(&name) {
                return Err(TopologyError::DuplicateNode(name));
            }
            index.insert(name.clone(), NodeId(names.len()));
            names.push(name);
        }

        let mut topology = Self {
            neighbors: vec![Vec::new(); names.len()],
            names,
            index,
            link_count: 0,
        };
        for (u, v, cost) in links {
            topology.add_link(u.as_ref(), v.as_ref(), cost)?;
        }
        Ok(topology)
    }

    fn add_link(&mut self, u: &str, v: &str, cost: i64) -> Result<(), TopologyError> {
        let lookup = |name: &str| {
            self.index
                .get(name)
                .copied()
                .ok_or_else(|| TopologyError::UnknownNode {
                    from: u.to_string(),
                    to: v.to_string(),
                    unknown: name.to_string(),
                })
        };
        let a = lookup(u)?;
        let b = lookup(v)?;

        if a == b {
            return Err(TopologyError::SelfLoop(u.to_string()));
        }
        if cost <= 0 {
            return Err(TopologyError::NonPositiveCost {
                from: u.to_string(),
                to: v.to_string(),
                cost,
            });
        }
        let cost = u32::try_from(cost).map_err(|_| TopologyError::CostOutOfRange {
            from: u.to_string(),
            to: v.to_string(),
            cost,
            max: u32::MAX,
        })?;
        if self.link_cost(a, b).is_some() {
            return Err(TopologyError::DuplicateLink {
                from: u.to_string(),
                to: v.to_string(),
            });
        }

        self.neighbors[a.0].push((b, cost));
        self.neighbors[b.0].push((a, cost));
        self.link_count += 1;
        Ok(())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of undirected links.
    pub fn link_count(&self) -> usize {
        self.link_count
    }

    /// All node ids in declaration order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + Clone {
        (0..self.names.len()).map(NodeId)
    }

    /// Look a node up by label.
    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Label of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` was not issued by this topology.
    pub fn name(&self, node: NodeId) -> &str {
        &self.names[node.0]
    }

    /// Neighbors of `node` with link costs, in link declaration order.
    pub fn neighbors(&self, node: NodeId) -> &[(NodeId, u32)] {
        &self.neighbors[node.0]
    }

    /// Cost of the direct link between `a` and `b`, if any.
    pub fn link_cost(&self, a: NodeId, b: NodeId) -> Option<Cost> {
        self.neighbors[a.0]
            .iter()
            .find(|(n, _)| *n == b)
            .map(|&(_, c)| Cost::link(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Topology {
        Topology::new(
            ["A", "B", "C"],
            [("A", "B", 1), ("B", "C", 1), ("A", "C", 4)],
        )
        .unwrap()
    }

    #[test]
    fn links_are_symmetric() {
        let t = triangle();
        let (a, c) = (t.id("A").unwrap(), t.id("C").unwrap());
        assert_eq!(t.link_cost(a, c), Some(Cost::link(4)));
        assert_eq!(t.link_cost(c, a), Some(Cost::link(4)));
        assert_eq!(t.link_count(), 3);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn neighbors_follow_declaration_order() {
        let t = triangle();
        let a = t.id("A").unwrap();
        let names: Vec<_> = t.neighbors(a).iter().map(|&(n, _)| t.name(n)).collect();
        assert_eq!(names, ["B", "C"]);
    }

    #[test]
    fn rejects_unknown_node() {
        let err = Topology::new(["A", "B"], [("A", "Z", 1)]).unwrap_err();
        assert!(matches!(err, TopologyError::UnknownNode { ref unknown, .. } if unknown == "Z"));
    }

    #[test]
    fn rejects_non_positive_cost() {
        for cost in [0, -3] {
            let err = Topology::new(["A", "B"], [("A", "B", cost)]).unwrap_err();
            assert!(matches!(err, TopologyError::NonPositiveCost { .. }));
        }
    }

    #[test]
    fn rejects_cost_above_link_range() {
        let err = Topology::new(["A", "B"], [("A", "B", i64::from(u32::MAX) + 1)]).unwrap_err();
        assert!(matches!(err, TopologyError::CostOutOfRange { .. }));
    }

    #[test]
    fn rejects_any_duplicate_pair() {
        // Same cost, reversed endpoints.
        let err = Topology::new(["A", "B"], [("A", "B", 2), ("B", "A", 2)]).unwrap_err();
        assert_eq!(
            err,
            TopologyError::DuplicateLink {
                from: "B".into(),
                to: "A".into()
            }
        );
        let err = Topology::new(["A", "B"], [("A", "B", 2), ("A", "B", 5)]).unwrap_err();
        assert!(matches!(err, TopologyError::DuplicateLink { .. }));
    }

    #[test]
    fn rejects_bad_node_lists() {
        assert_eq!(
            Topology::new(["A", "A"], Vec::<(&str, &str, i64)>::new()).unwrap_err(),
            TopologyError::DuplicateNode("A".into())
        );
        assert_eq!(
            Topology::new([""], Vec::<(&str, &str, i64)>::new()).unwrap_err(),
            TopologyError::EmptyNodeId
        );
        assert_eq!(
            Topology::new(["A"], [("A", "A", 1)]).unwrap_err(),
            TopologyError::SelfLoop("A".into())
        );
    }
}
