//! Path cost arithmetic.
//!
//! A [`Cost`] is either a finite, non-negative path cost or the designated
//! [`Cost::INFINITY`] sentinel meaning "no known route".  All arithmetic
//! saturates: once a sum touches infinity it stays there, and no addition
//! can wrap around.
//!
//! Link costs are `u32` while path costs are `u64`.  A simple path visits
//! fewer than 2^32 nodes, so no finite sum of link costs along one can reach
//! the sentinel.

use std::fmt;
use std::ops::Add;

/// Cost of reaching a destination.
///
/// Ordering is the natural integer order, so infinity sorts after every
/// finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cost(u64);

impl Cost {
    /// Cost of the self route.
    pub const ZERO: Cost = Cost(0);

    /// "No route" sentinel.
    pub const INFINITY: Cost = Cost(u64::MAX);

    /// Finite cost of a single link.
    pub fn link(cost: u32) -> Self {
        Cost(u64::from(cost))
    }

    /// `true` unless this is the infinity sentinel.
    pub fn is_finite(self) -> bool {
        self != Self::INFINITY
    }

    pub fn is_infinite(self) -> bool {
        !self.is_finite()
    }

    /// The finite value, or `None` for infinity.
    pub fn finite(self) -> Option<u64> {
        self.is_finite().then_some(self.0)
    }

    /// Saturating sum; any infinite operand yields infinity.
    pub fn saturating_add(self, rhs: Cost) -> Cost {
        if self.is_infinite() || rhs.is_infinite() {
            return Cost::INFINITY;
        }
        Cost(self.0.saturating_add(rhs.0))
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        self.saturating_add(rhs)
    }
}

impl From<u32> for Cost {
    fn from(cost: u32) -> Self {
        Cost::link(cost)
    }
}

impl fmt::Display for Cost {
    /// Finite costs print as integers, infinity as `INF`.  Width and
    /// alignment flags are honoured so the report can pad columns.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.finite() {
            Some(c) => f.pad(&c.to_string()),
            None => f.pad("INF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinity_sorts_last() {
        assert!(Cost::link(u32::MAX) < Cost::INFINITY);
        assert!(Cost::ZERO < Cost::link(1));
        assert_eq!(
            [Cost::INFINITY, Cost::link(3), Cost::ZERO].iter().max(),
            Some(&Cost::INFINITY)
        );
    }

    #[test]
    fn addition_saturates_at_infinity() {
        assert_eq!(Cost::link(2) + Cost::INFINITY, Cost::INFINITY);
        assert_eq!(Cost::INFINITY + Cost::link(2), Cost::INFINITY);
        assert_eq!(Cost::INFINITY + Cost::INFINITY, Cost::INFINITY);
        assert_eq!(Cost::link(2) + Cost::link(5), Cost::link(7));
    }

    #[test]
    fn large_finite_sums_do_not_wrap() {
        let near = Cost(u64::MAX - 1);
        assert_eq!(near + Cost::link(10), Cost::INFINITY);
    }

    #[test]
    fn display_pads_like_strings() {
        assert_eq!(format!("{:>8}", Cost::link(12)), "      12");
        assert_eq!(format!("{:>8}", Cost::INFINITY), "     INF");
        assert_eq!(Cost::INFINITY.finite(), None);
        assert_eq!(Cost::link(4).finite(), Some(4));
    }
}
