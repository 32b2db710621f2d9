//! Plain-text rendering of routing tables and round traces.
//!
//! Output format per node:
//!
//! ```text
//! Node A:
//!   Dest     Cost  NextHop
//! --------------------------
//!      A        0        A
//!      C        2        B
//!      D      INF        -
//! ```

use std::fmt;

use crate::driver::{RoundReport, SimulationState};
use crate::exchange::Improvement;
use crate::table::RoutingTable;
use crate::topology::Topology;

/// All tables, preceded by a `Routing tables:` banner.
pub struct TablesReport<'a> {
    pub topology: &'a Topology,
    pub tables: &'a [RoutingTable],
}

impl fmt::Display for TablesReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Routing tables:")?;
        for table in self.tables {
            writeln!(f)?;
            write!(
                f,
                "{}",
                TableReport {
                    topology: self.topology,
                    table
                }
            )?;
        }
        Ok(())
    }
}

/// One node's table.
pub struct TableReport<'a> {
    pub topology: &'a Topology,
    pub table: &'a RoutingTable,
}

impl fmt::Display for TableReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.topology;
        writeln!(f, "Node {}:", t.name(self.table.owner()))?;
        writeln!(f, "{:>6} {:>8} {:>8}", "Dest", "Cost", "NextHop")?;
        writeln!(f, "{}", "-".repeat(26))?;
        for (dest, route) in self.table.routes() {
            let hop = route.next_hop.map_or("-", |h| t.name(h));
            writeln!(f, "{:>6} {:>8} {:>8}", t.name(dest), route.cost, hop)?;
        }
        Ok(())
    }
}

/// `Node U: improved route to D via V cost C`
pub struct ImprovementLine<'a> {
    pub topology: &'a Topology,
    pub improvement: &'a Improvement,
}

impl fmt::Display for ImprovementLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.topology;
        let i = self.improvement;
        write!(
            f,
            "Node {}: improved route to {} via {} cost {}",
            t.name(i.node),
            t.name(i.destination),
            t.name(i.via),
            i.cost
        )
    }
}

/// Verbose trace of one round: header, one line per improvement, and the
/// closing line when the round ended the run.
pub struct RoundTrace<'a> {
    pub topology: &'a Topology,
    pub report: &'a RoundReport,
}

impl fmt::Display for RoundTrace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Iteration {} ===", self.report.iteration)?;
        for improvement in &self.report.delta.improvements {
            writeln!(
                f,
                "{}",
                ImprovementLine {
                    topology: self.topology,
                    improvement
                }
            )?;
        }
        match self.report.state {
            SimulationState::Converged => {
                writeln!(f, "\nConverged: no updates in this iteration.")
            }
            SimulationState::AbortedOnIterationLimit => writeln!(
                f,
                "\nStopping after {} iterations (safety limit).",
                self.report.iteration
            ),
            SimulationState::Running => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Simulation, SimulationConfig};

    fn pair_and_island() -> Topology {
        Topology::new(["A", "B", "Z"], [("A", "B", 3)]).unwrap()
    }

    #[test]
    fn renders_table_rows() {
        let t = pair_and_island();
        let mut sim = Simulation::new(t, SimulationConfig::default());
        sim.run();
        let a = sim.topology().id("A").unwrap();
        let out = TableReport {
            topology: sim.topology(),
            table: &sim.tables()[a.index()],
        }
        .to_string();

        let expected = "\
Node A:
  Dest     Cost  NextHop
--------------------------
     A        0        A
     B        3        B
     Z      INF        -
";
        assert_eq!(out, expected);
    }

    #[test]
    fn renders_every_node() {
        let mut sim = Simulation::new(pair_and_island(), SimulationConfig::default());
        sim.run();
        let out = TablesReport {
            topology: sim.topology(),
            tables: sim.tables(),
        }
        .to_string();
        assert!(out.starts_with("Routing tables:\n\nNode A:"));
        assert_eq!(out.matches("Node ").count(), 3);
    }

    #[test]
    fn round_trace_lists_improvements() {
        let t = Topology::new(
            ["A", "B", "C"],
            [("A", "B", 1), ("B", "C", 1), ("A", "C", 4)],
        )
        .unwrap();
        let config = SimulationConfig {
            trace: true,
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(t, config);
        let first = sim.step();
        let out = RoundTrace {
            topology: sim.topology(),
            report: &first,
        }
        .to_string();
        assert_eq!(
            out,
            "=== Iteration 1 ===\n\
             Node A: improved route to C via B cost 2\n\
             Node C: improved route to A via B cost 2\n"
        );

        let second = sim.step();
        let out = RoundTrace {
            topology: sim.topology(),
            report: &second,
        }
        .to_string();
        assert_eq!(
            out,
            "=== Iteration 2 ===\n\nConverged: no updates in this iteration.\n"
        );
    }
}
