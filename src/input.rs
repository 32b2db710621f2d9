//! JSON topology descriptions.
//!
//! ```json
//! {
//!   "nodes": ["A", "B", "C"],
//!   "links": [["A", "B", 1], ["B", "C", 1], ["A", "C", 4]]
//! }
//! ```
//!
//! Costs are read as signed integers so that `0` or `-1` surface as
//! [`TopologyError::NonPositiveCost`] instead of a parse error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::topology::{Topology, TopologyError};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read topology file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed topology file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Unvalidated topology as written in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyFile {
    pub nodes: Vec<String>,
    pub links: Vec<(String, String, i64)>,
}

impl TopologyFile {
    pub fn from_json(text: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validate into a [`Topology`].
    pub fn into_topology(self) -> Result<Topology, InputError> {
        Ok(Topology::new(self.nodes, self.links)?)
    }
}

/// Read and validate a topology file in one go.
pub fn load_topology(path: impl AsRef<Path>) -> Result<Topology, InputError> {
    TopologyFile::load(path)?.into_topology()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nodes_and_links() {
        let file = TopologyFile::from_json(
            r#"{"nodes": ["A", "B"], "links": [["A", "B", 5]]}"#,
        )
        .unwrap();
        assert_eq!(file.links, vec![("A".to_string(), "B".to_string(), 5)]);

        let t = file.into_topology().unwrap();
        assert_eq!(t.link_count(), 1);
    }

    #[test]
    fn zero_cost_is_a_topology_error() {
        let err = TopologyFile::from_json(r#"{"nodes": ["A", "B"], "links": [["A", "B", 0]]}"#)
            .unwrap()
            .into_topology()
            .unwrap_err();
        assert!(matches!(
            err,
            InputError::Topology(TopologyError::NonPositiveCost { cost: 0, .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = TopologyFile::from_json(r#"{"nodes": ["A"]}"#).unwrap_err();
        assert!(matches!(err, InputError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_topology("/nonexistent/topology.json").unwrap_err();
        assert!(matches!(err, InputError::Io(_)));
    }
}
