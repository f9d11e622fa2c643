use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::f64::consts::PI;
use std::sync::Arc;

use log::{debug, warn};
use rand::Rng;

use super::error::ClusterError;
use super::params::LayoutParams;
use super::types::{Edge, Issue};

/// Kinematic state of a node; the part the simulator double-buffers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
}

#[cfg(test)]
impl Body {
	pub fn speed_sq(&self) -> f64 {
		self.vx * self.vx + self.vy * self.vy
	}
}

/// One issue placed in the relationship map.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: String,
	pub radius: f64,
	pub dragging: bool,
	pub body: Body,
	issue: usize,
}

impl Node {
	pub fn x(&self) -> f64 {
		self.body.x
	}

	pub fn y(&self) -> f64 {
		self.body.y
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		let (dx, dy) = (x - self.body.x, y - self.body.y);
		dx * dx + dy * dy <= self.radius * self.radius
	}
}

pub fn radius_for_likes(likes: u32, params: &LayoutParams) -> f64 {
	(params.radius_base + f64::from(likes) * params.radius_per_like)
		.clamp(params.min_radius, params.max_radius)
}

/// Seed one node per issue on a jittered ring around the canvas center.
pub fn build_nodes(issues: &[Issue], params: &LayoutParams, rng: &mut impl Rng) -> Vec<Node> {
	let (cx, cy) = params.center();
	let count = issues.len() as f64;

	issues
		.iter()
		.enumerate()
		.map(|(i, issue)| {
			let angle = (i as f64) * 2.0 * PI / count;
			let distance = params.seed_distance + rng.random::<f64>() * params.seed_jitter;
			let radius = radius_for_likes(issue.likes, params);
			let (x, y) = params.clamp_position(
				cx + angle.cos() * distance,
				cy + angle.sin() * distance,
				radius,
			);
			Node {
				id: issue.id.clone(),
				radius,
				dragging: false,
				body: Body {
					x,
					y,
					vx: 0.0,
					vy: 0.0,
				},
				issue: i,
			}
		})
		.collect()
}

/// Authoritative issue and edge snapshots plus the nodes derived from them.
#[derive(Debug)]
pub struct GraphModel {
	issues: Arc<[Issue]>,
	edges: Arc<[Edge]>,
	nodes: Vec<Node>,
	index: HashMap<String, usize>,
}

impl Default for GraphModel {
	fn default() -> Self {
		Self {
			issues: Arc::from(Vec::new()),
			edges: Arc::from(Vec::new()),
			nodes: Vec::new(),
			index: HashMap::new(),
		}
	}
}

impl GraphModel {
	/// Swap in a new issue list. Nodes are rebuilt from scratch unless `issues`
	/// is the very snapshot already held. Returns whether a rebuild happened.
	pub fn replace_issues(
		&mut self,
		issues: Arc<[Issue]>,
		params: &LayoutParams,
		rng: &mut impl Rng,
	) -> bool {
		if Arc::ptr_eq(&self.issues, &issues) && self.issues.len() == issues.len() {
			return false;
		}

		self.nodes = build_nodes(&issues, params, rng);
		self.index.clear();
		for (slot, node) in self.nodes.iter().enumerate() {
			match self.index.entry(node.id.clone()) {
				Entry::Vacant(entry) => {
					entry.insert(slot);
				}
				Entry::Occupied(_) => warn!("duplicate issue id {:?}; edges attach to the first", node.id),
			}
		}
		self.issues = issues;
		debug!(
			"rebuilt {} nodes ({} edges, {} dangling)",
			self.nodes.len(),
			self.edges.len(),
			self.dangling_edges()
		);
		true
	}

	pub fn replace_edges(&mut self, edges: Arc<[Edge]>) {
		if !Arc::ptr_eq(&self.edges, &edges) {
			self.edges = edges;
		}
	}

	pub fn ensure_renderable(&self) -> Result<(), ClusterError> {
		if self.nodes.len() < 2 {
			return Err(ClusterError::InsufficientIssues {
				count: self.nodes.len(),
			});
		}
		Ok(())
	}

	/// Node slot for an issue id.
	pub fn resolve(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Both endpoint slots of an edge, or `None` when either is missing.
	pub fn endpoints(&self, edge: &Edge) -> Option<(usize, usize)> {
		Some((self.resolve(&edge.source_id)?, self.resolve(&edge.target_id)?))
	}

	pub fn dangling_edges(&self) -> usize {
		self.edges
			.iter()
			.filter(|edge| self.endpoints(edge).is_none())
			.count()
	}

	pub fn issue(&self, node: &Node) -> &Issue {
		&self.issues[node.issue]
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Write one frame's bodies back, in slot order.
	pub(super) fn commit(&mut self, bodies: &[Body]) {
		for (node, body) in self.nodes.iter_mut().zip(bodies) {
			node.body = *body;
		}
	}
}
