//! Force-directed relationship map of issues.
//!
//! `graph` turns an issue snapshot into seeded nodes, `simulation` advances
//! them one frame at a time, `interaction` lets a single pointer pin a node,
//! and `component` wires all of it to a canvas and the browser frame loop.

mod component;
mod error;
mod frame_loop;
mod graph;
mod interaction;
mod params;
mod render;
mod simulation;
mod state;
mod types;

pub use component::OrganicCluster;
pub use error::ClusterError;
pub use types::{Edge, Issue, parse_edges, parse_issues};
